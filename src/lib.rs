//! Dead simple identity tracking over feature vectors.
//!
//! Every frame the caller hands over anonymous detections (a bounding region
//! plus a fixed-length feature vector, e.g. a 128-d face embedding). The
//! [`mot::CentroidTracker`] matches each one against the centroid of every
//! known track and either extends the nearest track or starts a new one.
//! Tracks that go unmatched for too long are evicted.
//!
//! ```
//! use feature_mot::mot::{CentroidTracker, Detection};
//! use feature_mot::utils::BoundingRegion;
//!
//! let mut tracker = CentroidTracker::new(0.5, 1).unwrap();
//! let region = BoundingRegion::new(10.0, 60.0, 60.0, 10.0);
//! let present = tracker
//!     .update(vec![Detection::new(vec![1.0, 0.0], region)])
//!     .unwrap();
//! assert!(present.contains_key(&0));
//! ```
pub mod mot;
pub mod utils;
