use crate::mot::TrackerError;
use crate::utils::{dot, euclidean_distance, manhattan_distance, norm};

/// Distance between a track centroid and a detection's feature vector.
/// Both slices always have the same length. Smaller means more similar.
///
/// Any `Fn(&[f32], &[f32]) -> f32` closure can be used as well:
///
/// ```
/// use feature_mot::mot::CentroidTracker;
/// let chebyshev = |a: &[f32], b: &[f32]| {
///     a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f32::max)
/// };
/// let tracker = CentroidTracker::new(0.5, 3).unwrap().with_distance(chebyshev);
/// ```
pub trait Distance: Send + Sync {
    fn distance(&self, centroid: &[f32], feature: &[f32]) -> f32;
}

impl<F> Distance for F
where
    F: Fn(&[f32], &[f32]) -> f32 + Send + Sync,
{
    fn distance(&self, centroid: &[f32], feature: &[f32]) -> f32 {
        self(centroid, feature)
    }
}

/// L2 distance. This is what face embeddings are usually compared with
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl Distance for EuclideanDistance {
    fn distance(&self, centroid: &[f32], feature: &[f32]) -> f32 {
        euclidean_distance(centroid, feature)
    }
}

/// `1 - cos(angle)`. Zero vectors have no direction and are at distance 1 from anything
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineDistance;

impl Distance for CosineDistance {
    fn distance(&self, centroid: &[f32], feature: &[f32]) -> f32 {
        let denominator = norm(centroid) * norm(feature);
        if denominator == 0.0 {
            return 1.0;
        }
        1.0 - dot(centroid, feature) / denominator
    }
}

/// L1 distance
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl Distance for ManhattanDistance {
    fn distance(&self, centroid: &[f32], feature: &[f32]) -> f32 {
        manhattan_distance(centroid, feature)
    }
}

/// Looks up a built-in distance by its name (case insensitive)
pub fn distance_by_name(name: &str) -> Result<Box<dyn Distance>, TrackerError> {
    match name.to_ascii_lowercase().as_str() {
        "euclidean" | "l2" => Ok(Box::new(EuclideanDistance)),
        "cosine" => Ok(Box::new(CosineDistance)),
        "manhattan" | "l1" => Ok(Box::new(ManhattanDistance)),
        _ => Err(TrackerError::UnknownDistance(name.to_string())),
    }
}
