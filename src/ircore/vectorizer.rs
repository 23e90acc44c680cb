use std::collections::HashMap;
use indexmap::IndexSet;
use serde::{Serialize, Deserialize};
use super::{Term, Weight};
use super::index::TermWeight;

/// Where a document's vector takes its weights from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VectorFill {
    /// Every term the document produced, so a document can carry weight for
    /// keywords it did not pick itself.
    #[default]
    FullTable,
    /// Only the document's own top-K keywords.
    OwnTopK,
}

/// Keyword dimensions shared by every vector of a run, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSet {
    keywords: IndexSet<Term>,
}

impl KeywordSet {
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.keywords.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

pub type BowVector = Vec<Weight>;

/// Unions the first `k` terms of every ranked list.
pub fn select_keywords<'a, I>(ranked_terms_per_doc: I, k: usize) -> KeywordSet
where
    I: IntoIterator<Item = &'a [TermWeight]>,
{
    let mut keywords = IndexSet::new();
    for ranked in ranked_terms_per_doc {
        for tw in ranked.iter().take(k) {
            keywords.insert(tw.term.clone());
        }
    }
    KeywordSet { keywords }
}

/// Projects one document onto the keyword dimensions. `ranked_terms` is the
/// document's full ranked list.
pub fn vectorize(ranked_terms: &[TermWeight], keywords: &KeywordSet, k: usize, fill: VectorFill) -> BowVector {
    let carried = match fill {
        VectorFill::FullTable => ranked_terms.len(),
        VectorFill::OwnTopK => k.min(ranked_terms.len()),
    };
    let weights: HashMap<&str, Weight> = ranked_terms[..carried]
        .iter()
        .map(|tw| (tw.term.as_str(), tw.tfidf))
        .collect();
    keywords.iter()
        .map(|kw| weights.get(kw).copied().unwrap_or(0.0))
        .collect()
}
