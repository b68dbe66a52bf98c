use std::collections::HashMap;
use std::sync::Arc;

use lexis_types::StringId;

use crate::error::{VocabError, VocabResult};

/// Table of fixed-width dense vectors keyed by string id.
///
/// The width is either fixed up front or taken from the first vector added;
/// every later vector must match it.
#[derive(Clone, Debug, Default)]
pub struct Vectors {
    width: Option<usize>,
    data: HashMap<StringId, Arc<[f32]>>,
}

impl Vectors {
    /// Create an empty table whose width is set by the first vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a fixed width.
    pub fn with_width(width: usize) -> VocabResult<Self> {
        if width == 0 {
            return Err(VocabError::EmptyVector);
        }
        Ok(Self {
            width: Some(width),
            data: HashMap::new(),
        })
    }

    /// Add or replace the vector of `id`.
    pub fn add(&mut self, id: StringId, vector: Vec<f32>) -> VocabResult<()> {
        if vector.is_empty() {
            return Err(VocabError::EmptyVector);
        }
        match self.width {
            Some(expected) if expected != vector.len() => {
                return Err(VocabError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            Some(_) => {}
            None => self.width = Some(vector.len()),
        }
        self.data.insert(id, Arc::from(vector));
        Ok(())
    }

    /// The vector of `id`, if any.
    pub fn get(&self, id: StringId) -> Option<Arc<[f32]>> {
        self.data.get(&id).cloned()
    }

    pub fn contains(&self, id: StringId) -> bool {
        self.data.contains_key(&id)
    }

    /// The vector width, once known.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Cosine similarity of two equally sized vectors.
///
/// Returns `None` when either vector has zero norm, where the cosine is
/// undefined. The result is clamped to [-1, 1] to absorb rounding.
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    Some(sim.clamp(-1.0, 1.0) as f32)
}

/// Element-wise mean of equally sized vectors.
///
/// Returns `None` for an empty input.
pub fn mean_vector<'a, I>(vectors: I) -> Option<Vec<f32>>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut iter = vectors.into_iter();
    let first = iter.next()?;
    let mut sum: Vec<f64> = first.iter().map(|x| f64::from(*x)).collect();
    let mut count = 1usize;
    for v in iter {
        for (acc, x) in sum.iter_mut().zip(v) {
            *acc += f64::from(*x);
        }
        count += 1;
    }
    Some(sum.into_iter().map(|s| (s / count as f64) as f32).collect())
}
