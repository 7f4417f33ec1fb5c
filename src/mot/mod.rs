//! Export contents of `mot` folder
mod centroid;
mod centroid_tracker;
mod config;
mod detection;
mod distance;
pub mod mot_errors;
mod track;

pub use self::{
    centroid::*,
    centroid_tracker::*,
    config::*,
    detection::*,
    distance::*,
    mot_errors::*,
    track::*,
};
