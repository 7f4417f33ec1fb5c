use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mot::{distance_by_name, TrackerError};

fn default_distance() -> String {
    "euclidean".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Defines what the tracker's YAML config file should contain.
pub struct TrackerConfig {
    /// Maximum distance between a centroid and a feature vector to consider them the same identity.
    pub similarity_threshold: f32,
    /// Number of consecutive frames a track may go unmatched before it is evicted.
    pub max_disappeared: usize,
    /// Name of the distance function: euclidean, cosine or manhattan.
    #[serde(default = "default_distance")]
    pub distance: String,
    /// Average only the last N observations of a track. Full history when absent.
    #[serde(default)]
    pub centroid_window: Option<usize>,
    /// Fixed feature dimensionality. Learned from the first detection when absent.
    #[serde(default)]
    pub dimension: Option<usize>,
    /// Let each track accept at most one detection per frame.
    #[serde(default)]
    pub exclusive_claims: bool,
    /// How many frames per second the caller intends to feed into the tracker.
    #[serde(default)]
    pub tracking_fps: Option<f32>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            similarity_threshold: 0.6,
            max_disappeared: 10,
            distance: default_distance(),
            centroid_window: None,
            dimension: None,
            exclusive_claims: false,
            tracking_fps: None,
        }
    }
}

impl TrackerConfig {
    /// Parses and validates config from YAML text
    ///
    /// Basic usage:
    ///
    /// ```
    /// use feature_mot::mot::TrackerConfig;
    /// let text = "similarity_threshold: 0.6\nmax_disappeared: 10\n";
    /// let cfg = TrackerConfig::from_yaml_str(text).unwrap();
    /// assert_eq!(cfg.max_disappeared, 10);
    /// assert_eq!(cfg.distance, "euclidean");
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self, TrackerError> {
        let cfg: TrackerConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, TrackerError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !self.similarity_threshold.is_finite() || self.similarity_threshold <= 0.0 {
            return Err(TrackerError::BadConfig(format!(
                "similarity_threshold must be a positive number, got {}",
                self.similarity_threshold
            )));
        }
        if self.centroid_window == Some(0) {
            return Err(TrackerError::BadConfig(
                "centroid_window must be at least 1".to_string(),
            ));
        }
        if self.dimension == Some(0) {
            return Err(TrackerError::BadConfig(
                "dimension must be at least 1".to_string(),
            ));
        }
        if let Some(fps) = self.tracking_fps {
            if !fps.is_finite() || fps <= 0.0 {
                return Err(TrackerError::BadConfig(format!(
                    "tracking_fps must be a positive number, got {}",
                    fps
                )));
            }
        }
        distance_by_name(&self.distance)?;
        Ok(())
    }
    /// Every N-th source frame the caller should feed into the tracker to reach `tracking_fps`.
    /// The tracker itself never skips frames.
    pub fn frame_stride(&self, source_fps: f32) -> usize {
        match self.tracking_fps {
            Some(fps) if source_fps.is_finite() && source_fps > 0.0 => {
                usize::max((source_fps / fps).floor() as usize, 1)
            }
            _ => 1,
        }
    }
}
