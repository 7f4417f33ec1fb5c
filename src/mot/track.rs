use std::fmt;

use chrono::{DateTime, Utc};

use crate::mot::{Detection, FeatureVector};
use crate::utils::BoundingRegion;

/// Identifier of a track. Assigned in increasing order and never reused.
pub type TrackId = u64;

/// History of a single persistent identity.
///
/// Features and regions are stored as parallel vectors which always have the
/// same length and are never empty.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    features: Vec<FeatureVector>,
    regions: Vec<BoundingRegion>,
    // Number of consecutive updates without a matching detection
    disappeared: usize,
    first_seen: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

impl Track {
    pub fn new(id: TrackId, detection: Detection) -> Self {
        let now = Utc::now();
        Track {
            id,
            features: vec![detection.feature],
            regions: vec![detection.region],
            disappeared: 0,
            first_seen: now,
            last_seen: now,
        }
    }
    /// Appends new observation and marks track as seen in this frame
    pub fn extend(&mut self, detection: Detection) {
        self.features.push(detection.feature);
        self.regions.push(detection.region);
        self.disappeared = 0;
        self.last_seen = Utc::now();
    }
    pub fn get_id(&self) -> TrackId {
        self.id
    }
    pub fn get_features(&self) -> &[FeatureVector] {
        &self.features
    }
    pub fn get_regions(&self) -> &[BoundingRegion] {
        &self.regions
    }
    pub fn get_last_region(&self) -> BoundingRegion {
        // Never empty: a track is born with one observation and only grows
        self.regions[self.regions.len() - 1]
    }
    pub fn get_last_feature(&self) -> &FeatureVector {
        &self.features[self.features.len() - 1]
    }
    pub fn track_len(&self) -> usize {
        self.features.len()
    }
    pub fn get_disappeared(&self) -> usize {
        self.disappeared
    }
    pub fn inc_disappeared(&mut self) {
        self.disappeared += 1
    }
    pub fn get_first_seen(&self) -> DateTime<Utc> {
        self.first_seen
    }
    pub fn get_last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<Track {:03} contains {} examples>",
            self.id,
            self.features.len()
        )
    }
}
