use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Bounding region of a detection in image-pixel space.
/// Coordinates follow the (top, right, bottom, left) order face detectors emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl BoundingRegion {
    pub fn new(_top: f32, _right: f32, _bottom: f32, _left: f32) -> Self {
        BoundingRegion {
            top: _top,
            right: _right,
            bottom: _bottom,
            left: _left,
        }
    }
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
    pub fn center(&self) -> Point {
        Point::new(
            self.left + 0.5 * self.width(),
            self.top + 0.5 * self.height(),
        )
    }
}

impl Default for BoundingRegion {
    fn default() -> Self {
        BoundingRegion::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(_x: f32, _y: f32) -> Self {
        Point { x: _x, y: _y }
    }
}

/// L2 distance between two equally sized vectors.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip_eq(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// L1 distance between two equally sized vectors.
pub fn manhattan_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip_eq(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip_eq(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

/// Element-wise arithmetic mean of non-empty set of equally sized vectors.
/// Returns empty vector when nothing is given.
/// Sums are accumulated in f64 so long histories do not drift.
pub fn mean_vector<V: AsRef<[f32]>>(vectors: &[V]) -> Vec<f32> {
    let first = match vectors.first() {
        Some(v) => v.as_ref(),
        None => return Vec::new(),
    };
    let mut sum = vec![0.0_f64; first.len()];
    for v in vectors {
        for (acc, x) in sum.iter_mut().zip_eq(v.as_ref().iter()) {
            *acc += *x as f64;
        }
    }
    let n = vectors.len() as f64;
    sum.into_iter().map(|acc| (acc / n) as f32).collect()
}
