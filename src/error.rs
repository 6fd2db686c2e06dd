use thiserror::Error;

use crate::polyline::DecodeError;
use crate::route::RouteError;

#[derive(Debug, Error)]
pub enum FlythroughError {
    #[error("failed to decode route polyline: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directions service returned {status}: {message}")]
    Service { status: String, message: String },

    #[error("no directions between {origin:?} and {destination:?}")]
    NoRoute { origin: String, destination: String },

    #[error("invalid service url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
