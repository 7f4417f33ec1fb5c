use crate::mot::FeatureVector;
use crate::utils::mean_vector;

/// Aggregates the feature history of a track into a single comparison anchor.
/// The history passed in is never empty.
pub trait Centroid: Send + Sync {
    fn centroid(&self, features: &[FeatureVector]) -> FeatureVector;
}

impl<F> Centroid for F
where
    F: Fn(&[FeatureVector]) -> FeatureVector + Send + Sync,
{
    fn centroid(&self, features: &[FeatureVector]) -> FeatureVector {
        self(features)
    }
}

/// Element-wise mean over the whole history.
///
/// Cost grows linearly with the number of observations of a track, and so does
/// memory since the history is never truncated. Sums are kept in f64, so the
/// result stays accurate over long histories. Use [`WindowedMeanCentroid`]
/// for long-lived tracks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanCentroid;

impl Centroid for MeanCentroid {
    fn centroid(&self, features: &[FeatureVector]) -> FeatureVector {
        mean_vector(features)
    }
}

/// Element-wise mean over the most recent `window` observations
#[derive(Debug, Clone, Copy)]
pub struct WindowedMeanCentroid {
    window: usize,
}

impl WindowedMeanCentroid {
    /// Window of zero is treated as one
    pub fn new(window: usize) -> Self {
        WindowedMeanCentroid {
            window: usize::max(window, 1),
        }
    }
    pub fn get_window(&self) -> usize {
        self.window
    }
}

impl Centroid for WindowedMeanCentroid {
    fn centroid(&self, features: &[FeatureVector]) -> FeatureVector {
        let start = features.len().saturating_sub(self.window);
        mean_vector(&features[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_feature_centroid_is_exact() {
        let feature = vec![0.1, -0.7, 3.3333, 1e-7];
        let centroid = MeanCentroid.centroid(&[feature.clone()]);
        assert_eq!(centroid, feature);
    }

    #[test]
    fn test_mean_centroid() {
        let history = vec![vec![1.0, 0.0], vec![1.0, 0.05], vec![1.0, 0.1]];
        let centroid = MeanCentroid.centroid(&history);
        assert!((centroid[0] - 1.0).abs() < 1e-6);
        assert!((centroid[1] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_windowed_centroid() {
        let history = vec![vec![100.0], vec![1.0], vec![3.0]];
        let windowed = WindowedMeanCentroid::new(2);
        assert_eq!(windowed.centroid(&history), vec![2.0]);
        // Window larger than history degrades to full mean
        assert_eq!(
            WindowedMeanCentroid::new(10).centroid(&history),
            MeanCentroid.centroid(&history)
        );
        assert_eq!(WindowedMeanCentroid::new(0).get_window(), 1);
        assert_eq!(WindowedMeanCentroid::new(0).centroid(&history), vec![3.0]);
    }
}
