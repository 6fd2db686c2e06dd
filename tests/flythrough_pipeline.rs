//! End-to-end frame pipeline with offline providers.

mod fixtures;

use std::fs;
use std::sync::atomic::Ordering;

use route_flythrough::error::FlythroughError;
use route_flythrough::flythrough::{frame_path, frames, save_frames, write_frame_urls, Frame};
use route_flythrough::route::{Route, Step};
use route_flythrough::traits::DirectionsProvider;

use fixtures::las_vegas_route::ROUTE_JSON;
use fixtures::stubs::{EchoImagery, FixedDirections};

const MAX_DISTANCE: f64 = 0.00025;

fn directions() -> FixedDirections {
    FixedDirections(Route::from_json_str(ROUTE_JSON).expect("fixture route parses"))
}

fn all_frames(route: &Route) -> Vec<Frame> {
    frames(route, MAX_DISTANCE).collect::<Result<_, _>>().unwrap()
}

#[test]
fn lists_one_url_per_frame() {
    let route = directions().route_between("Bellagio", "Wynn").unwrap();
    let expected = all_frames(&route);

    let mut out = Vec::new();
    let count = write_frame_urls(frames(&route, MAX_DISTANCE), &EchoImagery::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(count, expected.len());
    assert_eq!(lines.len(), expected.len());
    assert!(lines[0].starts_with("0\tstub://frame?location=36.1147,-115.1728&heading=0.00"), "{}", lines[0]);
    for (i, line) in lines.iter().enumerate() {
        let (index, url) = line.split_once('\t').unwrap();
        assert_eq!(index.parse::<usize>().unwrap(), i);
        assert!(url.starts_with("stub://frame?"));
    }
}

#[test]
fn headings_follow_the_road() {
    let route = directions().route_between("Bellagio", "Wynn").unwrap();
    let frames = all_frames(&route);

    assert_eq!(frames[0].heading, 0.0);
    // The Strip runs roughly north from the Bellagio.
    assert!(frames[1].heading < 10.0 || frames[1].heading > 350.0, "{}", frames[1].heading);
    for frame in &frames {
        assert!((0.0..360.0).contains(&frame.heading));
    }
}

#[test]
fn saves_every_frame_in_route_order() {
    let route = directions().route_between("Bellagio", "Wynn").unwrap();
    let expected = all_frames(&route);
    let imagery = EchoImagery::default();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("frames");

    let saved = save_frames(frames(&route, MAX_DISTANCE), &imagery, &target, 3).unwrap();

    assert_eq!(saved, expected.len());
    assert_eq!(imagery.fetches.load(Ordering::SeqCst), expected.len());
    assert_eq!(fs::read_dir(&target).unwrap().count(), expected.len());
    for frame in &expected {
        let body = fs::read(frame_path(&target, frame.index)).unwrap();
        assert_eq!(body, EchoImagery::body(frame.point, frame.heading));
    }
}

#[test]
fn single_worker_still_saves_everything() {
    let route = directions().route_between("Bellagio", "Wynn").unwrap();
    let dir = tempfile::tempdir().unwrap();

    let saved = save_frames(frames(&route, 0.0), &EchoImagery::default(), dir.path(), 0).unwrap();
    assert_eq!(saved, 7);
    assert!(frame_path(dir.path(), 6).exists());
    assert!(!frame_path(dir.path(), 7).exists());
}

#[test]
fn fetch_failure_aborts_saving() {
    let route = directions().route_between("Bellagio", "Wynn").unwrap();
    let imagery = EchoImagery {
        fail_on: Some(2),
        ..EchoImagery::default()
    };
    let dir = tempfile::tempdir().unwrap();

    let err = save_frames(frames(&route, MAX_DISTANCE), &imagery, dir.path(), 2).unwrap_err();
    assert!(matches!(err, FlythroughError::Service { .. }), "{err}");
}

#[test]
fn corrupt_step_fails_listing() {
    let mut route = directions().route_between("Bellagio", "Wynn").unwrap();
    route.legs[1].steps.push(Step::new("k~m{Ez{}}T_]s"));

    let mut out = Vec::new();
    let err = write_frame_urls(frames(&route, MAX_DISTANCE), &EchoImagery::default(), &mut out).unwrap_err();
    assert!(matches!(err, FlythroughError::Decode(_)), "{err}");
}
