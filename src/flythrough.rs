//! Frames along a route: each point paired with the direction of travel,
//! listed as image URLs or downloaded to disk.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::iter::{ParallelBridge, ParallelIterator};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::FlythroughError;
use crate::geometry::{euclidean_distance, heading, Coordinate};
use crate::points::{points, RoutePoints};
use crate::polyline::DecodeError;
use crate::route::Route;
use crate::traits::ImageryProvider;

/// Points closer than this share the previous heading instead of computing
/// a direction from rounding noise.
const MIN_HEADING_DISTANCE: f64 = 1e-9;

/// One image position along the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub index: usize,
    pub point: Coordinate,
    /// Compass heading in degrees, 0 for the first frame.
    pub heading: f64,
}

/// Lazily pairs the route's points with headings.
pub fn frames(route: &Route, max_gap: f64) -> Frames<'_> {
    Frames {
        points: points(route, max_gap),
        index: 0,
        previous: None,
        heading: 0.0,
    }
}

#[derive(Debug, Clone)]
pub struct Frames<'a> {
    points: RoutePoints<'a>,
    index: usize,
    previous: Option<Coordinate>,
    heading: f64,
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let point = match self.points.next()? {
            Ok(point) => point,
            Err(err) => return Some(Err(err)),
        };

        if let Some(previous) = self.previous {
            if euclidean_distance(previous, point) > MIN_HEADING_DISTANCE {
                self.heading = heading(previous, point);
            }
        }

        let frame = Frame {
            index: self.index,
            point,
            heading: self.heading,
        };
        self.index += 1;
        self.previous = Some(point);
        Some(Ok(frame))
    }
}

/// Writes one `INDEX\tURL` line per frame, returning the number written.
pub fn write_frame_urls<I, P, W>(frames: I, imagery: &P, out: &mut W) -> Result<usize, FlythroughError>
where
    I: IntoIterator<Item = Result<Frame, DecodeError>>,
    P: ImageryProvider + ?Sized,
    W: Write,
{
    let mut count = 0;
    for frame in frames {
        let frame = frame?;
        writeln!(out, "{}\t{}", frame.index, imagery.frame_url(frame.point, frame.heading))?;
        count += 1;
    }
    Ok(count)
}

/// File name for a saved frame, zero padded so directory order is route order.
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{:05}.jpg", index))
}

/// Downloads every frame into `dir` using up to `parallelism` workers.
///
/// Frames are pulled from the iterator as workers free up, so the route is
/// never fully materialized. The first failure aborts the run; frames
/// already written stay on disk.
pub fn save_frames<I, P>(
    frames: I,
    imagery: &P,
    dir: &Path,
    parallelism: usize,
) -> Result<usize, FlythroughError>
where
    I: Iterator<Item = Result<Frame, DecodeError>> + Send,
    P: ImageryProvider + ?Sized,
{
    fs::create_dir_all(dir)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism.max(1))
        .build()?;

    let saved = pool.install(|| {
        frames
            .par_bridge()
            .map(|frame| -> Result<usize, FlythroughError> {
                let frame = frame?;
                let bytes = imagery.fetch_frame(frame.point, frame.heading)?;
                let path = frame_path(dir, frame.index);
                write_atomic(&path, &bytes)?;
                debug!(index = frame.index, bytes = bytes.len(), "saved frame");
                Ok(1)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))
    })?;

    info!(frames = saved, dir = %dir.display(), "saved frames");
    Ok(saved)
}

fn write_atomic(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = dest.with_extension("jpg.tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{Leg, Step};

    fn straight_north() -> Route {
        // (0, 0) -> (0.001, 0) -> (0.001, 0.001)
        Route::new(vec![Leg::new(vec![Step::new("??gE?"), Step::new("gEgE")])])
    }

    #[test]
    fn test_first_frame_heading_is_zero() {
        let route = straight_north();
        let all: Vec<Frame> = frames(&route, 0.0).collect::<Result<_, _>>().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].heading, 0.0);
        assert!((all[1].heading - 0.0).abs() < 1e-9);
        assert!((all[2].heading - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_indices_are_contiguous_with_interpolation() {
        let route = straight_north();
        let all: Vec<Frame> = frames(&route, 0.0004).collect::<Result<_, _>>().unwrap();
        for (i, frame) in all.iter().enumerate() {
            assert_eq!(frame.index, i);
        }
        // 1 + (3 + 1) + (3 + 1)
        assert_eq!(all.len(), 9);
    }

    #[test]
    fn test_repeated_point_keeps_heading() {
        let route = Route::new(vec![Leg::new(vec![Step::new("???gE??")])]);
        let all: Vec<Frame> = frames(&route, 0.0).collect::<Result<_, _>>().unwrap();
        assert_eq!(all.len(), 3);
        assert!((all[1].heading - 90.0).abs() < 1e-9);
        assert!((all[2].heading - 90.0).abs() < 1e-9);
    }
}
