//! Geometry and vector helpers
#[allow(clippy::module_inception)]
mod utils;

pub use self::utils::*;
