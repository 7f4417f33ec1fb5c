use std::collections::BTreeSet;

use feature_mot::mot::{CentroidTracker, ClaimPolicy, Detection, TrackId};
use feature_mot::utils::BoundingRegion;

fn region(left: f32) -> BoundingRegion {
    BoundingRegion::new(10.0, left + 40.0, 50.0, left)
}

fn det(feature: &[f32], left: f32) -> Detection {
    Detection::from((feature.to_vec(), region(left)))
}

// Deterministic pseudo random frames: a handful of objects which come and go with jitter
fn generate_frames(seed: u64, frames: usize) -> Vec<Vec<Detection>> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as f32) / (u32::MAX >> 1) as f32
    };
    let anchors: Vec<[f32; 3]> = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
    ];
    (0..frames)
        .map(|_| {
            anchors
                .iter()
                .enumerate()
                .filter_map(|(i, anchor)| {
                    if next() < 0.35 {
                        return None;
                    }
                    let feature: Vec<f32> =
                        anchor.iter().map(|x| x + (next() - 0.5) * 0.2).collect();
                    Some(Detection::new(feature, region(i as f32 * 60.0)))
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_single_object_lifecycle() {
    // threshold=0.5, max_disappeared=1
    let mut tracker = CentroidTracker::new(0.5, 1).unwrap();

    let present = tracker.update(vec![det(&[1.0, 0.0], 0.0)]).unwrap();
    assert_eq!(present.keys().copied().collect::<Vec<_>>(), vec![0]);

    let present = tracker.update(vec![det(&[1.0, 0.05], 3.0)]).unwrap();
    assert_eq!(present.keys().copied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(present[&0].get_disappeared(), 0);
    assert_eq!(present[&0].get_last_region(), region(3.0));

    let present = tracker.update(vec![]).unwrap();
    assert!(present.is_empty());
    assert_eq!(tracker.get(0).unwrap().get_disappeared(), 1);

    let present = tracker.update(vec![]).unwrap();
    assert!(present.is_empty());
    assert!(tracker.is_empty());
}

#[test]
fn test_no_identifier_reuse() {
    let mut tracker = CentroidTracker::new(0.3, 2).unwrap();
    let mut seen: BTreeSet<TrackId> = BTreeSet::new();
    let mut evicted: BTreeSet<TrackId> = BTreeSet::new();
    let mut previous: BTreeSet<TrackId> = BTreeSet::new();

    for frame in generate_frames(7, 200) {
        let present = tracker.update(frame).unwrap();
        for (id, track) in present.iter() {
            assert!(track.track_len() >= 1);
            assert_eq!(track.get_features().len(), track.get_regions().len());
            assert_eq!(track.get_id(), *id);
            assert!(!evicted.contains(id), "identifier {} reused after eviction", id);
            seen.insert(*id);
        }
        let registered: BTreeSet<TrackId> = tracker.tracks().map(|t| t.get_id()).collect();
        evicted.extend(previous.difference(&registered).copied());
        previous = registered;
    }
    assert!(!seen.is_empty());
    assert!(seen.iter().all(|id| *id < tracker.get_next_id()));
    assert!(!evicted.is_empty());
}

#[test]
fn test_determinism() {
    let frames = generate_frames(42, 150);
    let mut first = CentroidTracker::new(0.25, 3).unwrap();
    let mut second = CentroidTracker::new(0.25, 3).unwrap();

    for (frame_a, frame_b) in itertools::izip!(frames.clone(), frames) {
        let ids_a: Vec<(TrackId, usize)> = first
            .update(frame_a)
            .unwrap()
            .iter()
            .map(|(id, t)| (*id, t.track_len()))
            .collect();
        let ids_b: Vec<(TrackId, usize)> = second
            .update(frame_b)
            .unwrap()
            .iter()
            .map(|(id, t)| (*id, t.track_len()))
            .collect();
        assert_eq!(ids_a, ids_b);
        let registry_a: Vec<(TrackId, usize)> = first
            .tracks()
            .map(|t| (t.get_id(), t.get_disappeared()))
            .collect();
        let registry_b: Vec<(TrackId, usize)> = second
            .tracks()
            .map(|t| (t.get_id(), t.get_disappeared()))
            .collect();
        assert_eq!(registry_a, registry_b);
    }
}

#[test]
fn test_three_objects_keep_their_ids() {
    let object_one = vec![[0.0_f32, 0.0], [0.02, 0.01], [0.03, -0.01], [0.01, 0.0]];
    let object_two = vec![[1.0_f32, 0.0], [0.98, 0.02], [1.01, 0.01], [1.0, -0.02]];
    let object_three = vec![[0.0_f32, 1.0], [0.01, 1.02], [-0.02, 0.99], [0.0, 1.01]];

    let mut tracker = CentroidTracker::new(0.2, 5).unwrap();
    for (one, two, three) in itertools::izip!(object_one, object_two, object_three) {
        let present = tracker
            .update(vec![det(&three, 120.0), det(&one, 0.0), det(&two, 60.0)])
            .unwrap();
        assert_eq!(present.len(), 3);
        assert_eq!(present[&0].get_last_region(), region(120.0));
        assert_eq!(present[&1].get_last_region(), region(0.0));
        assert_eq!(present[&2].get_last_region(), region(60.0));
    }
    assert_eq!(tracker.len(), 3);
    assert!(tracker.tracks().all(|t| t.track_len() == 4));
}

#[test]
fn test_same_frame_duplicates_under_both_policies() {
    let frame = || vec![det(&[0.0, 0.1], 0.0), det(&[0.0, -0.1], 50.0)];

    let mut reclaim = CentroidTracker::new(0.5, 1).unwrap();
    reclaim.update(vec![det(&[0.0, 0.0], 0.0)]).unwrap();
    let present = reclaim.update(frame()).unwrap();
    assert_eq!(present.len(), 1);
    assert_eq!(present[&0].track_len(), 3);
    assert_eq!(present[&0].get_last_region(), region(50.0));

    let mut exclusive = CentroidTracker::new(0.5, 1)
        .unwrap()
        .with_claim_policy(ClaimPolicy::Exclusive);
    exclusive.update(vec![det(&[0.0, 0.0], 0.0)]).unwrap();
    let present = exclusive.update(frame()).unwrap();
    assert_eq!(present.len(), 2);
    assert_eq!(present[&0].track_len(), 2);
    assert_eq!(present[&1].track_len(), 1);
    assert_eq!(present[&1].get_last_region(), region(50.0));
}

#[test]
fn test_empty_frames_on_empty_tracker() {
    let mut tracker = CentroidTracker::default();
    for _ in 0..5 {
        assert!(tracker.update(vec![]).unwrap().is_empty());
    }
    assert!(tracker.is_empty());
    assert_eq!(tracker.get_next_id(), 0);
}
