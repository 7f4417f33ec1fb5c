use crate::utils::BoundingRegion;

/// Fixed-length embedding produced by an external feature extractor
pub type FeatureVector = Vec<f32>;

/// Single anonymous observation for the current frame.
/// Detections carry no identity: matching is the tracker's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub feature: FeatureVector,
    pub region: BoundingRegion,
}

impl Detection {
    pub fn new(feature: FeatureVector, region: BoundingRegion) -> Self {
        Detection { feature, region }
    }
    pub fn dimension(&self) -> usize {
        self.feature.len()
    }
}

impl From<(FeatureVector, BoundingRegion)> for Detection {
    fn from((feature, region): (FeatureVector, BoundingRegion)) -> Self {
        Detection::new(feature, region)
    }
}
