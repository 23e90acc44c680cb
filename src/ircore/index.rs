use std::collections::HashMap;
use std::sync::Arc;
use indexmap::IndexMap;
use super::{DocId, Term, Weight};
use super::cache::{cache_key, TokenCache};
use super::doc::Document;
use super::normalizer::normalize;
use super::tokenizer::Tokenize;

/// Weight of one term inside one document.
#[derive(Debug, Clone, PartialEq)]
pub struct TermWeight {
    pub term: Term,
    pub tf: u32,
    pub idf: Weight,
    pub tfidf: Weight,
}

#[derive(Debug)]
struct DocTerms {
    id: DocId,
    // term -> count, in order of first occurrence
    term_frequency: IndexMap<Term, u32>,
    // number of tokens
    length: usize,
}

impl DocTerms {
    fn from_tokens(id: &str, tokens: &[String]) -> Self {
        let mut term_frequency = IndexMap::new();
        for token in tokens {
            *term_frequency.entry(token.clone()).or_insert(0) += 1;
        }
        DocTerms { id: id.to_string(), term_frequency, length: tokens.len() }
    }
}

/// Corpus term statistics.
///
/// `idf` is a snapshot taken by `compute_idf`; call it once after the last
/// document has been added.
#[derive(Debug, Default)]
pub struct TfIdfIndex {
    docs: Vec<DocTerms>,
    positions: HashMap<DocId, usize>,
    // the number of documents in the collection containing the term
    document_frequency: HashMap<Term, u32>,
    idf: HashMap<Term, Weight>,
}

impl TfIdfIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tokenized document. A second document with an existing id
    /// replaces the first one and keeps its position.
    pub fn add_document(&mut self, id: &str, tokens: &[String]) {
        let doc = DocTerms::from_tokens(id, tokens);
        for term in doc.term_frequency.keys() {
            *self.document_frequency.entry(term.clone()).or_insert(0) += 1;
        }
        if let Some(&pos) = self.positions.get(id) {
            log::warn!("document {} added twice, replacing the earlier one", id);
            let old = std::mem::replace(&mut self.docs[pos], doc);
            for term in old.term_frequency.keys() {
                if let Some(count) = self.document_frequency.get_mut(term) {
                    *count -= 1;
                    if *count == 0 {
                        self.document_frequency.remove(term);
                    }
                }
            }
        } else {
            self.positions.insert(id.to_string(), self.docs.len());
            self.docs.push(doc);
        }
    }

    // IDF = 1 + ln(N / (1 + Nt))
    //   N: total count of documents
    //   Nt: count of documents that contain term t
    pub fn compute_idf(&mut self) {
        let n = self.docs.len() as f64;
        self.idf = self.document_frequency
            .iter()
            .map(|(term, &df)| (term.clone(), 1.0 + (n / (1.0 + df as f64)).ln()))
            .collect();
        log::debug!("idf computed over {} documents, {} terms", self.docs.len(), self.idf.len());
    }

    pub fn get_document_count(&self) -> usize {
        self.docs.len()
    }

    pub fn get_vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// Document ids in the order they were first added.
    pub fn doc_ids(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.id.as_str())
    }

    pub fn get_document_length(&self, id: &str) -> Option<usize> {
        self.doc(id).map(|d| d.length)
    }

    pub fn get_document_frequency(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn tf(&self, term: &str, id: &str) -> u32 {
        self.doc(id)
            .and_then(|d| d.term_frequency.get(term).copied())
            .unwrap_or(0)
    }

    /// Zero for terms absent from the corpus.
    pub fn idf(&self, term: &str) -> Weight {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Every distinct term of the document, highest `tf * idf` first. Equal
    /// weights keep the order in which the terms first appeared.
    pub fn list_terms(&self, id: &str) -> Vec<TermWeight> {
        let Some(doc) = self.doc(id) else {
            return vec![];
        };
        let mut terms: Vec<TermWeight> = doc.term_frequency
            .iter()
            .map(|(term, &tf)| {
                let idf = self.idf(term);
                TermWeight { term: term.clone(), tf, idf, tfidf: tf as Weight * idf }
            })
            .collect();
        terms.sort_by(|a, b| b.tfidf.total_cmp(&a.tfidf));
        terms
    }

    fn doc(&self, id: &str) -> Option<&DocTerms> {
        self.positions.get(id).map(|&pos| &self.docs[pos])
    }
}

/// Turns documents into a `TfIdfIndex`, consulting an optional token cache.
pub struct Indexer<'a> {
    strategy: Arc<dyn Tokenize>,
    cache: Option<&'a dyn TokenCache>,
    // cache area of the strategy, tokens of other strategies never match
    scope: String,
}

impl<'a> Indexer<'a> {
    pub fn new(strategy: Arc<dyn Tokenize>, cache: Option<&'a dyn TokenCache>) -> Self {
        Indexer { strategy, cache, scope: String::new() }
    }

    /// Keeps this indexer's cache entries under `scope`, usually the
    /// language code the strategy was resolved for.
    pub fn scoped(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    fn key(&self, doc: &Document) -> String {
        let key = cache_key(doc.get_raw());
        if self.scope.is_empty() {
            key
        } else {
            format!("{}/{}", self.scope, key)
        }
    }

    /// Token sequence of one document. Malformed documents are indexed as
    /// empty ones.
    pub fn tokens(&self, doc: &Document) -> Vec<String> {
        let text = match doc.get_content() {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{}, indexing it as an empty document", e);
                return vec![];
            }
        };
        let key = self.key(doc);
        if let Some(cache) = self.cache {
            match cache.get(&key) {
                Ok(Some(tokens)) => {
                    log::debug!("{}: token cache hit", doc.get_id());
                    return tokens;
                },
                Ok(None) => (),
                Err(e) => log::warn!("{}: token cache read failed: {}", doc.get_id(), e),
            }
        }
        let tokens = self.strategy.tokenize(&normalize(text));
        if let Some(cache) = self.cache {
            if let Err(e) = cache.set(&key, &tokens) {
                log::warn!("{}: token cache write failed: {}", doc.get_id(), e);
            }
        }
        tokens
    }

    pub fn index(&self, documents: &[Document]) -> TfIdfIndex {
        let mut index = TfIdfIndex::new();
        for doc in documents {
            let tokens = self.tokens(doc);
            index.add_document(doc.get_id(), &tokens);
            if index.get_document_count() % 1000 == 0 {
                log::debug!("{} documents tokenized", index.get_document_count());
            }
        }
        index.compute_idf();
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ircore::cache::MemoryCache;
    use crate::ircore::error::CacheError;
    use crate::ircore::tokenizer::DefaultSplit;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn sample_index() -> TfIdfIndex {
        let mut idx = TfIdfIndex::new();
        idx.add_document("a", &tokens("apple apple banana"));
        idx.add_document("b", &tokens("banana banana cherry"));
        idx.add_document("c", &tokens("zebra zebra zebra"));
        idx.compute_idf();
        idx
    }

    #[test]
    fn test_term_statistics() {
        let idx = sample_index();
        assert_eq!(idx.get_document_count(), 3);
        assert_eq!(idx.get_vocabulary_size(), 4);
        assert_eq!(idx.tf("apple", "a"), 2);
        assert_eq!(idx.tf("apple", "b"), 0);
        assert_eq!(idx.get_document_frequency("banana"), 2);
        assert_eq!(idx.get_document_length("c"), Some(3));
        let epsilon = 1e-12;
        assert!((idx.idf("banana") - 1.0).abs() < epsilon);
        assert!((idx.idf("apple") - (1.0 + 1.5f64.ln())).abs() < epsilon);
        assert!(idx.idf("apple") > idx.idf("banana"));
        assert_eq!(idx.idf("missing"), 0.0);
    }

    #[test]
    fn test_list_terms_sorted() {
        let idx = sample_index();
        let terms = idx.list_terms("a");
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].term, "apple");
        assert_eq!(terms[0].tf, 2);
        assert!((terms[0].tfidf - terms[0].tf as f64 * terms[0].idf).abs() < 1e-12);
        assert_eq!(terms[1].term, "banana");
        assert!(idx.list_terms("nope").is_empty());
    }

    #[test]
    fn test_list_terms_ties_keep_first_occurrence() {
        let mut idx = TfIdfIndex::new();
        idx.add_document("a", &tokens("pear fig kiwi"));
        idx.add_document("b", &tokens("plum"));
        idx.compute_idf();
        let order: Vec<String> = idx.list_terms("a").into_iter().map(|t| t.term).collect();
        assert_eq!(order, vec!["pear", "fig", "kiwi"]);
    }

    #[test]
    fn test_empty_document_counts_towards_n() {
        let mut idx = TfIdfIndex::new();
        idx.add_document("a", &tokens("apple"));
        idx.add_document("empty", &[]);
        idx.compute_idf();
        assert_eq!(idx.get_document_count(), 2);
        assert!(idx.list_terms("empty").is_empty());
        assert!((idx.idf("apple") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_id_replaces() {
        let mut idx = TfIdfIndex::new();
        idx.add_document("a", &tokens("apple"));
        idx.add_document("b", &tokens("banana"));
        idx.add_document("a", &tokens("cherry"));
        idx.compute_idf();
        assert_eq!(idx.get_document_count(), 2);
        assert_eq!(idx.doc_ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(idx.get_document_frequency("apple"), 0);
        assert_eq!(idx.tf("cherry", "a"), 1);
    }

    struct FailingCache;
    impl TokenCache for FailingCache {
        fn get(&self, _key: &str) -> Result<Option<Vec<String>>, CacheError> {
            Err(CacheError::Io(std::io::Error::new(std::io::ErrorKind::Other, "down")))
        }
        fn set(&self, _key: &str, _tokens: &[String]) -> Result<(), CacheError> {
            Err(CacheError::Io(std::io::Error::new(std::io::ErrorKind::Other, "down")))
        }
    }

    struct CountingSplit(AtomicUsize);
    impl Tokenize for CountingSplit {
        fn tokenize(&self, text: &str) -> Vec<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            DefaultSplit.tokenize(text)
        }
    }

    #[test]
    fn test_indexer_uses_cache() {
        let docs = vec![Document::new("a", "Apple *apple* banana"), Document::new("b", "cherry")];
        let cache = MemoryCache::new();
        let split = Arc::new(CountingSplit(AtomicUsize::new(0)));
        let indexer = Indexer::new(split.clone(), Some(&cache));
        let first = indexer.index(&docs);
        assert_eq!(split.0.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
        let second = indexer.index(&docs);
        assert_eq!(split.0.load(Ordering::SeqCst), 2);
        assert_eq!(first.list_terms("a"), second.list_terms("a"));
        assert_eq!(first.tf("apple", "a"), 2);
    }

    #[test]
    fn test_scoped_cache_keys() {
        let docs = vec![Document::new("a", "apple banana")];
        let cache = MemoryCache::new();
        Indexer::new(Arc::new(DefaultSplit), Some(&cache)).scoped("en").index(&docs);
        let en_key = format!("en/{}", cache_key(docs[0].get_raw()));
        assert!(cache.get(&en_key).unwrap().is_some());
        assert_eq!(cache.get(&cache_key(docs[0].get_raw())).unwrap(), None);

        // another scope misses and tokenizes again
        let split = Arc::new(CountingSplit(AtomicUsize::new(0)));
        Indexer::new(split.clone(), Some(&cache)).scoped("zh").index(&docs);
        assert_eq!(split.0.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_indexer_survives_cache_failure() {
        let docs = vec![Document::new("a", "apple apple banana")];
        let failing = FailingCache;
        let with_cache = Indexer::new(Arc::new(DefaultSplit), Some(&failing)).index(&docs);
        let without = Indexer::new(Arc::new(DefaultSplit), None).index(&docs);
        assert_eq!(with_cache.list_terms("a"), without.list_terms("a"));
    }

    #[test]
    fn test_malformed_document_is_empty() {
        let docs = vec![
            Document::new("a", "apple"),
            Document::from_bytes("bad", vec![0xff, 0xfe, 0x00]),
        ];
        let idx = Indexer::new(Arc::new(DefaultSplit), None).index(&docs);
        assert_eq!(idx.get_document_count(), 2);
        assert!(idx.list_terms("bad").is_empty());
    }
}
