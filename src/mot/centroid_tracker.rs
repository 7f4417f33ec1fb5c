use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::mot::mot_errors::DimensionMismatch;
use crate::mot::{
    distance_by_name, Centroid, Detection, Distance, EuclideanDistance, FeatureVector,
    MeanCentroid, Track, TrackId, TrackerConfig, TrackerError, WindowedMeanCentroid,
};

/// What happens to a track which has already been matched by an earlier detection of the same frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimPolicy {
    /// Track stays eligible (with its centroid already shifted), so several
    /// detections of one frame may extend the same track one after another
    #[default]
    Reclaimable,
    /// Track is skipped for the rest of the frame: at most one detection per track per frame
    Exclusive,
}

/// Nearest track found for a feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub track_id: TrackId,
    pub distance: f32,
    pub centroid: FeatureVector,
}

/// Identity tracker which compares detections against the centroid of every known track.
///
/// Detections are resolved one by one in the order given, and the registry is
/// mutated right after each of them: a later detection of the same frame sees
/// tracks created or extended by an earlier one.
pub struct CentroidTracker {
    // Maximum distance (exclusive) between a centroid and a feature vector to match them
    similarity_threshold: f32,
    // Max number of consecutive frames a track may stay unmatched before eviction
    max_disappeared: usize,
    // Feature dimensionality. Either fixed upfront or learned from the first detection
    dimension: Option<usize>,
    fixed_dimension: bool,
    claim_policy: ClaimPolicy,
    distance: Box<dyn Distance>,
    centroid: Box<dyn Centroid>,
    next_id: TrackId,
    // Storage. Iteration order is ascending id, i.e. insertion order
    objects: BTreeMap<TrackId, Track>,
    // Tracks created or matched during the last update
    present: BTreeSet<TrackId>,
}

impl CentroidTracker {
    /// Creates new instance of CentroidTracker with Euclidean distance
    /// and full-history mean centroid
    ///
    /// Basic usage:
    ///
    /// ```
    /// use feature_mot::mot::CentroidTracker;
    /// let similarity_threshold: f32 = 0.6;
    /// let max_disappeared: usize = 10;
    /// let mut tracker = CentroidTracker::new(similarity_threshold, max_disappeared).unwrap();
    /// assert!(tracker.is_empty());
    /// ```
    pub fn new(similarity_threshold: f32, max_disappeared: usize) -> Result<Self, TrackerError> {
        if !similarity_threshold.is_finite() || similarity_threshold <= 0.0 {
            return Err(TrackerError::BadConfig(format!(
                "similarity_threshold must be a positive number, got {}",
                similarity_threshold
            )));
        }
        Ok(CentroidTracker::with_params(similarity_threshold, max_disappeared))
    }
    // Threshold is expected to be validated already
    fn with_params(similarity_threshold: f32, max_disappeared: usize) -> Self {
        CentroidTracker {
            similarity_threshold,
            max_disappeared,
            dimension: None,
            fixed_dimension: false,
            claim_policy: ClaimPolicy::default(),
            distance: Box::new(EuclideanDistance),
            centroid: Box::new(MeanCentroid),
            next_id: 0,
            objects: BTreeMap::new(),
            present: BTreeSet::new(),
        }
    }
    /// Creates new instance of CentroidTracker from parsed configuration
    ///
    /// Basic usage:
    ///
    /// ```
    /// use feature_mot::mot::{CentroidTracker, TrackerConfig};
    /// let text = "similarity_threshold: 0.3\nmax_disappeared: 5\ndistance: cosine";
    /// let cfg = TrackerConfig::from_yaml_str(text).unwrap();
    /// let tracker = CentroidTracker::from_config(&cfg).unwrap();
    /// assert_eq!(tracker.get_max_disappeared(), 5);
    /// ```
    pub fn from_config(cfg: &TrackerConfig) -> Result<Self, TrackerError> {
        cfg.validate()?;
        let mut tracker = CentroidTracker::new(cfg.similarity_threshold, cfg.max_disappeared)?;
        tracker.distance = distance_by_name(&cfg.distance)?;
        if let Some(window) = cfg.centroid_window {
            tracker = tracker.with_centroid(WindowedMeanCentroid::new(window));
        }
        if let Some(dimension) = cfg.dimension {
            tracker = tracker.with_dimension(dimension);
        }
        if cfg.exclusive_claims {
            tracker = tracker.with_claim_policy(ClaimPolicy::Exclusive);
        }
        Ok(tracker)
    }
    pub fn with_distance<D: Distance + 'static>(mut self, distance: D) -> Self {
        self.distance = Box::new(distance);
        self
    }
    pub fn with_centroid<C: Centroid + 'static>(mut self, centroid: C) -> Self {
        self.centroid = Box::new(centroid);
        self
    }
    /// Fixes feature dimensionality instead of learning it from the first detection.
    /// Zero is ignored.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        if dimension == 0 {
            warn!("zero feature dimension ignored");
            return self;
        }
        self.dimension = Some(dimension);
        self.fixed_dimension = true;
        self
    }
    pub fn with_claim_policy(mut self, claim_policy: ClaimPolicy) -> Self {
        self.claim_policy = claim_policy;
        self
    }
    pub fn get_similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }
    pub fn get_max_disappeared(&self) -> usize {
        self.max_disappeared
    }
    pub fn get_dimension(&self) -> Option<usize> {
        self.dimension
    }
    pub fn get_claim_policy(&self) -> ClaimPolicy {
        self.claim_policy
    }
    /// Identifier the next new track will get
    pub fn get_next_id(&self) -> TrackId {
        self.next_id
    }
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.objects.get(&id)
    }
    /// Every registered track, present in the last frame or not, ordered by id
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.objects.values()
    }
    pub fn len(&self) -> usize {
        self.objects.len()
    }
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
    /// Tracks created or matched during the last update
    pub fn current_tracks(&self) -> BTreeMap<TrackId, &Track> {
        self.present
            .iter()
            .filter_map(|id| self.objects.get(id).map(|track| (*id, track)))
            .collect()
    }
    /// Drops every track. Identifiers keep growing so none is ever reused
    pub fn reset(&mut self) {
        self.objects.clear();
        self.present.clear();
        if !self.fixed_dimension {
            self.dimension = None;
        }
    }
    /// Looks for the nearest track without mutating anything.
    /// Returns None when no centroid is strictly closer than the similarity threshold.
    pub fn find_match(&self, feature: &[f32]) -> Option<Match> {
        self.nearest(feature, None)
    }
    fn nearest(&self, feature: &[f32], claimed: Option<&BTreeSet<TrackId>>) -> Option<Match> {
        let mut best: Option<Match> = None;
        for (id, track) in self.objects.iter() {
            if claimed.map_or(false, |ids| ids.contains(id)) {
                continue;
            }
            let centroid = self.centroid.centroid(track.get_features());
            if centroid.len() != feature.len() {
                warn!(
                    track_id = id,
                    expected = feature.len(),
                    got = centroid.len(),
                    "track skipped: centroid dimension mismatch"
                );
                continue;
            }
            let distance = self.distance.distance(&centroid, feature);
            trace!(track_id = id, distance, "candidate");
            let best_distance = best.as_ref().map_or(f32::INFINITY, |m| m.distance);
            // Strict comparisons: ties go to the older track and the threshold itself never matches
            if distance < best_distance && distance < self.similarity_threshold {
                best = Some(Match {
                    track_id: *id,
                    distance,
                    centroid,
                });
            }
        }
        best
    }
    fn register(&mut self, detection: Detection) -> TrackId {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(id, Track::new(id, detection));
        debug!(track_id = id, "new track");
        id
    }
    /// Processes detections of a single frame and returns tracks present in it.
    ///
    /// Detections with a feature vector of the wrong length are skipped: the rest
    /// of the frame is still processed (including disappearance handling) and the
    /// call then returns [`TrackerError::DimensionMismatch`] listing every skipped
    /// detection. Tracks present in such a frame are available via [`Self::current_tracks`].
    ///
    /// Basic usage:
    ///
    /// ```
    /// use feature_mot::mot::{CentroidTracker, Detection};
    /// use feature_mot::utils::BoundingRegion;
    /// let mut tracker = CentroidTracker::new(0.5, 1).unwrap();
    /// let region = BoundingRegion::new(0.0, 10.0, 10.0, 0.0);
    /// tracker.update(vec![Detection::new(vec![1.0, 0.0], region)]).unwrap();
    /// let present = tracker.update(vec![Detection::new(vec![1.0, 0.05], region)]).unwrap();
    /// assert_eq!(present.keys().copied().collect::<Vec<_>>(), vec![0]);
    /// assert_eq!(present[&0].track_len(), 2);
    /// ```
    pub fn update(
        &mut self,
        detections: Vec<Detection>,
    ) -> Result<BTreeMap<TrackId, &Track>, TrackerError> {
        self.present.clear();
        let mut rejected: Vec<DimensionMismatch> = Vec::new();

        for (index, detection) in detections.into_iter().enumerate() {
            let expected = *self.dimension.get_or_insert(detection.dimension());
            if detection.dimension() != expected {
                warn!(
                    index,
                    expected,
                    got = detection.dimension(),
                    "detection rejected: feature dimension mismatch"
                );
                rejected.push(DimensionMismatch {
                    index,
                    expected,
                    got: detection.dimension(),
                });
                continue;
            }
            let claimed = match self.claim_policy {
                ClaimPolicy::Reclaimable => None,
                ClaimPolicy::Exclusive => Some(&self.present),
            };
            let matched = self.nearest(&detection.feature, claimed);
            let matched_track = matched
                .and_then(|m| self.objects.get_mut(&m.track_id).map(|t| (t, m.distance)));
            let id = match matched_track {
                Some((track, distance)) => {
                    track.extend(detection);
                    debug!(track_id = track.get_id(), distance, "track matched");
                    track.get_id()
                }
                None => self.register(detection),
            };
            self.present.insert(id);
        }

        self.handle_disappeared();

        if !rejected.is_empty() {
            return Err(TrackerError::DimensionMismatch(rejected));
        }
        Ok(self.current_tracks())
    }
    // Ages every track missing in the current frame and evicts the ones gone for too long
    fn handle_disappeared(&mut self) {
        let present = &self.present;
        let max_disappeared = self.max_disappeared;
        self.objects.retain(|id, track| {
            if present.contains(id) {
                return true;
            }
            track.inc_disappeared();
            let delete = track.get_disappeared() > max_disappeared;
            if delete {
                info!(track_id = id, examples = track.track_len(), "track evicted");
            }
            !delete // <- if we want to keep object closure should return true
        });
    }
}

impl Default for CentroidTracker {
    fn default() -> Self {
        CentroidTracker::with_params(0.6, 10)
    }
}

impl fmt::Display for CentroidTracker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<CentroidTracker size={}>", self.objects.len())
    }
}

impl fmt::Debug for CentroidTracker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CentroidTracker")
            .field("similarity_threshold", &self.similarity_threshold)
            .field("max_disappeared", &self.max_disappeared)
            .field("dimension", &self.dimension)
            .field("claim_policy", &self.claim_policy)
            .field("next_id", &self.next_id)
            .field("objects", &self.objects.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
