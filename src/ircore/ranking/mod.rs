pub mod vsm;
pub mod memo;

use std::cmp::Ordering;
use indexmap::IndexMap;
use crate::ircore::{DocId, Weight};
use crate::ircore::error::EngineError;
use crate::ircore::vectorizer::BowVector;
use memo::SimilarityMemo;
use vsm::cosine_similarity;

#[derive(Debug, Clone, PartialEq)]
pub struct DocScore {
    pub docid: DocId,
    pub score: Weight,
}

/// Ranks every document of `vectors` by similarity to `target`, the target
/// itself included and always first. Equal scores keep the order of
/// `vectors`. Unknown targets rank nothing.
pub fn rank_related(
    target: &str,
    vectors: &IndexMap<DocId, BowVector>,
    memo: &SimilarityMemo,
) -> Result<Vec<DocScore>, EngineError> {
    let Some(target_vec) = vectors.get(target) else {
        return Ok(vec![]);
    };
    let mut scores = Vec::with_capacity(vectors.len());
    for (docid, vec) in vectors {
        let score = memo.get_or_compute(target, docid, || cosine_similarity(target_vec, vec))?;
        scores.push(DocScore { docid: docid.clone(), score });
    }
    // stable sort keeps corpus order among ties
    scores.sort_by(|a, b| {
        match (a.docid == target, b.docid == target) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
        }
    });
    Ok(scores)
}
