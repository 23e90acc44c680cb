use std::collections::HashMap;
use std::sync::RwLock;
use crate::ircore::Weight;
use crate::ircore::error::EngineError;

/// Pairwise similarity cache owned by one ranking run.
///
/// Keys are canonical (smaller id first), so `(a, b)` and `(b, a)` share one
/// entry. Concurrent first writes store the same value, which makes racing
/// inserts harmless.
#[derive(Debug, Default)]
pub struct SimilarityMemo {
    scores: RwLock<HashMap<(String, String), Weight>>,
}

impl SimilarityMemo {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<Weight> {
        let scores = self.scores.read().unwrap_or_else(|e| e.into_inner());
        scores.get(&Self::key(a, b)).copied()
    }

    /// Returns the memoized score for the pair, computing it with `compute` on
    /// first use.
    pub fn get_or_compute<F>(&self, a: &str, b: &str, compute: F) -> Result<Weight, EngineError>
    where
        F: FnOnce() -> Result<Weight, EngineError>,
    {
        if let Some(score) = self.get(a, b) {
            return Ok(score);
        }
        let score = compute()?;
        let mut scores = self.scores.write().unwrap_or_else(|e| e.into_inner());
        Ok(*scores.entry(Self::key(a, b)).or_insert(score))
    }

    pub fn len(&self) -> usize {
        self.scores.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
