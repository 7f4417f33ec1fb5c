use std::fmt;

use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("DimensionMismatch: {}", .0.iter().join("; "))]
    DimensionMismatch(Vec<DimensionMismatch>),
    #[error("BadConfig: {0}")]
    BadConfig(String),
    #[error("UnknownDistance: {0}")]
    UnknownDistance(String),
    #[error("ConfigParse: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
}

/// Detection rejected because its feature vector length differs from the tracker's dimensionality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// Position of the detection in the frame it was supplied with
    pub index: usize,
    pub expected: usize,
    pub got: usize,
}

impl fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "detection #{} has {} features, expected {}",
            self.index, self.got, self.expected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_rejected_detection() {
        let err = TrackerError::DimensionMismatch(vec![
            DimensionMismatch { index: 1, expected: 4, got: 3 },
            DimensionMismatch { index: 3, expected: 4, got: 5 },
        ]);
        assert_eq!(
            err.to_string(),
            "DimensionMismatch: detection #1 has 3 features, expected 4; \
             detection #3 has 5 features, expected 4"
        );
    }
}
