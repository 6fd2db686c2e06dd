//! A two-leg directions route along the Las Vegas Strip.
//!
//! Shaped like `routes[0]` of a Directions API response, with extra fields
//! the point stream ignores.

/// Decoded points of each step, in route order.
pub const STEP_POINTS: &[&[(f64, f64)]] = &[
    &[(36.1147, -115.1728), (36.1160, -115.1728), (36.1175, -115.1722)],
    &[(36.1175, -115.1722), (36.1215, -115.1739)],
    &[(36.1215, -115.1739), (36.1263, -115.1658)],
];

pub const ROUTE_JSON: &str = r#"{
    "summary": "S Las Vegas Blvd",
    "legs": [
        {
            "start_address": "Bellagio, Las Vegas, NV",
            "end_address": "Caesars Palace, Las Vegas, NV",
            "distance": {"text": "0.5 km", "value": 520},
            "steps": [
                {
                    "travel_mode": "DRIVING",
                    "html_instructions": "Head north on S Las Vegas Blvd",
                    "polyline": {"points": "{sl{E~t}}TcG?kHwB"}
                },
                {
                    "travel_mode": "DRIVING",
                    "html_instructions": "Continue onto S Las Vegas Blvd",
                    "polyline": {"points": "kem{Efq}}T_XrI"}
                }
            ]
        },
        {
            "start_address": "Caesars Palace, Las Vegas, NV",
            "end_address": "Wynn Las Vegas, NV",
            "steps": [
                {
                    "travel_mode": "DRIVING",
                    "polyline": {"points": "k~m{Ez{}}T_]sq@"}
                }
            ]
        }
    ],
    "warnings": []
}"#;

/// Every step's points concatenated, as the stream yields them without interpolation.
pub fn flat_points() -> Vec<(f64, f64)> {
    STEP_POINTS.iter().flat_map(|step| step.iter().copied()).collect()
}
