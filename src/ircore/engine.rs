use std::sync::Arc;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use crate::ircore::{DocId, Weight};
use crate::ircore::analyzer::MorphAnalyzer;
use crate::ircore::cache::TokenCache;
use crate::ircore::doc::Document;
use crate::ircore::doc::cfg::RankConfig;
use crate::ircore::error::EngineError;
use crate::ircore::index::{Indexer, TermWeight, TfIdfIndex};
use crate::ircore::ranking::{rank_related, DocScore};
use crate::ircore::ranking::memo::SimilarityMemo;
use crate::ircore::ranking::vsm::cosine_similarity;
use crate::ircore::tokenizer::Segmentator;
use crate::ircore::vectorizer::{select_keywords, vectorize, BowVector, KeywordSet};

/// Related documents of one document, self excluded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedEntry {
    pub id: DocId,
    pub related: Vec<DocId>,
}

pub struct Engine {
    seg: Segmentator,
    cfg: RankConfig,
}

impl Engine {
    pub fn new(cfg: RankConfig) -> Self {
        Self::with_analyzer(cfg, Arc::new(MorphAnalyzer::new()))
    }

    /// Engine sharing an already constructed analyzer, so repeated runs build
    /// the morphological dictionary only once.
    pub fn with_analyzer(cfg: RankConfig, analyzer: Arc<MorphAnalyzer>) -> Self {
        Self::with_segmentator(cfg, Segmentator::with_defaults(analyzer))
    }

    pub fn with_segmentator(cfg: RankConfig, seg: Segmentator) -> Self {
        Engine { seg, cfg }
    }

    pub fn config(&self) -> &RankConfig {
        &self.cfg
    }

    /// Runs the whole pipeline over a corpus snapshot.
    pub fn run(&self, documents: &[Document], cache: Option<&dyn TokenCache>) -> Result<RankRun, EngineError> {
        let strategy = self.seg.strategy(&self.cfg.doc_lang)?;
        let index = Indexer::new(strategy, cache)
            .scoped(&Segmentator::lang_key(&self.cfg.doc_lang))
            .index(documents);

        let ranked: Vec<(DocId, Vec<TermWeight>)> = index.doc_ids()
            .map(|id| (id.to_string(), index.list_terms(id)))
            .collect();
        let k = self.cfg.each_bow_size;
        let keywords = select_keywords(ranked.iter().map(|(_, terms)| terms.as_slice()), k);
        let vectors: IndexMap<DocId, BowVector> = ranked.iter()
            .map(|(id, terms)| (id.clone(), vectorize(terms, &keywords, k, self.cfg.vector_fill)))
            .collect();
        log::info!("bow vectors generated, dimension: {}", keywords.len());

        Ok(RankRun {
            index,
            keywords,
            vectors,
            each_bow_size: k,
            memo: SimilarityMemo::new(),
        })
    }
}

/// Result of one run: the vectors plus the run's own similarity memo.
pub struct RankRun {
    index: TfIdfIndex,
    keywords: KeywordSet,
    vectors: IndexMap<DocId, BowVector>,
    each_bow_size: usize,
    memo: SimilarityMemo,
}

impl RankRun {
    pub fn doc_count(&self) -> usize {
        self.vectors.len()
    }

    pub fn dimension(&self) -> usize {
        self.keywords.len()
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn vector(&self, id: &str) -> Option<&BowVector> {
        self.vectors.get(id)
    }

    pub fn index(&self) -> &TfIdfIndex {
        &self.index
    }

    /// The terms a document contributed to the keyword set.
    pub fn top_terms(&self, id: &str) -> Vec<TermWeight> {
        let mut terms = self.index.list_terms(id);
        terms.truncate(self.each_bow_size);
        terms
    }

    /// Memoized similarity of two documents; `None` when either is unknown.
    pub fn similarity(&self, a: &str, b: &str) -> Result<Option<Weight>, EngineError> {
        match (self.vectors.get(a), self.vectors.get(b)) {
            (Some(va), Some(vb)) => self.memo.get_or_compute(a, b, || cosine_similarity(va, vb)).map(Some),
            _ => Ok(None),
        }
    }

    pub fn rank_scores(&self, id: &str) -> Result<Vec<DocScore>, EngineError> {
        rank_related(id, &self.vectors, &self.memo)
    }

    /// Every document id, `id` first, by descending similarity to `id`.
    pub fn rank_related(&self, id: &str) -> Result<Vec<DocId>, EngineError> {
        Ok(self.rank_scores(id)?.into_iter().map(|s| s.docid).collect())
    }

    /// Ranking with the document itself dropped, cut to `limit` entries.
    pub fn related(&self, id: &str, limit: Option<usize>) -> Result<Vec<DocId>, EngineError> {
        let mut ranked = self.rank_related(id)?;
        if ranked.is_empty() {
            return Ok(ranked);
        }
        ranked.remove(0);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }

    /// Related lists for every document, in corpus order. Documents are
    /// ranked in parallel and share this run's memo.
    pub fn rank_all(&self, limit: Option<usize>) -> Result<Vec<RelatedEntry>, EngineError> {
        let ids: Vec<&str> = self.vectors.keys().map(String::as_str).collect();
        ids.par_iter()
            .map(|&id| self.related(id, limit).map(|related| RelatedEntry {
                id: id.to_string(),
                related,
            }))
            .collect()
    }

    pub fn memo_size(&self) -> usize {
        self.memo.len()
    }
}
