use std::collections::HashMap;
use std::sync::Arc;
use super::analyzer::MorphAnalyzer;
use super::error::EngineError;

/// A tokenization strategy for one language.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Lowercases and splits on whitespace. Newlines and tabs separate words
/// too, and runs of whitespace never produce empty tokens.
#[derive(Debug, Default)]
pub struct DefaultSplit;

impl Tokenize for DefaultSplit {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Keeps general and proper nouns found by a morphological analyzer.
#[derive(Debug)]
pub struct Morphological {
    analyzer: Arc<MorphAnalyzer>,
}

impl Morphological {
    pub fn new(analyzer: Arc<MorphAnalyzer>) -> Self {
        Morphological { analyzer }
    }
}

impl Tokenize for Morphological {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.analyzer.nouns(text)
    }
}

/// Language code to strategy table.
pub struct Segmentator {
    strategies: HashMap<String, Arc<dyn Tokenize>>,
}

impl Segmentator {
    pub fn new() -> Self {
        Segmentator { strategies: HashMap::new() }
    }

    /// Registers `en` (whitespace split) and `zh` (nouns through `analyzer`).
    pub fn with_defaults(analyzer: Arc<MorphAnalyzer>) -> Self {
        let mut seg = Self::new();
        seg.register("en", Arc::new(DefaultSplit));
        seg.register("zh", Arc::new(Morphological::new(analyzer)));
        seg
    }

    pub fn register(&mut self, lang: &str, strategy: Arc<dyn Tokenize>) {
        self.strategies.insert(Self::lang_key(lang), strategy);
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Resolves the strategy for `lang`; done once per run.
    pub fn strategy(&self, lang: &str) -> Result<Arc<dyn Tokenize>, EngineError> {
        self.strategies
            .get(&Self::lang_key(lang))
            .cloned()
            .ok_or_else(|| EngineError::UnsupportedLanguage(lang.to_string()))
    }

    pub fn tokenize(&self, lang: &str, text: &str) -> Result<Vec<String>, EngineError> {
        Ok(self.strategy(lang)?.tokenize(text))
    }

    /// Canonical form of a language code.
    pub fn lang_key(lang: &str) -> String {
        lang.trim().to_lowercase()
    }
}

impl Default for Segmentator {
    fn default() -> Self {
        Self::with_defaults(Arc::new(MorphAnalyzer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_split() {
        let seg = Segmentator::default();
        let tokens = seg.tokenize("en", "Quarrel sir  no\nSir").unwrap();
        assert_eq!(tokens, vec!["quarrel", "sir", "no", "sir"]);
    }

    #[test]
    fn test_empty_text_yields_no_tokens() {
        let seg = Segmentator::default();
        assert!(seg.tokenize("en", "").unwrap().is_empty());
        assert!(seg.tokenize("en", "   \n ").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_language() {
        let seg = Segmentator::default();
        assert_eq!(seg.tokenize("xx", "hello").err(),
            Some(EngineError::UnsupportedLanguage("xx".to_string())));
    }

    #[test]
    fn test_language_code_case_insensitive() {
        let seg = Segmentator::default();
        assert!(seg.strategy(" EN ").is_ok());
        assert_eq!(seg.languages(), vec!["en", "zh"]);
    }

    #[test]
    fn test_morphological_keeps_nouns() {
        let analyzer = Arc::new(MorphAnalyzer::new());
        let seg = Segmentator::with_defaults(Arc::clone(&analyzer));
        assert!(!analyzer.is_built());
        let tokens = seg.tokenize("zh", "今天纽约的天气真好啊").unwrap();
        assert!(analyzer.is_built());
        assert!(tokens.contains(&"纽约".to_string()));
        assert!(!tokens.contains(&"的".to_string()));
    }

    #[test]
    fn test_register_custom_strategy() {
        struct Chars;
        impl Tokenize for Chars {
            fn tokenize(&self, text: &str) -> Vec<String> {
                text.chars().filter(|c| !c.is_whitespace()).map(String::from).collect()
            }
        }
        let mut seg = Segmentator::new();
        seg.register("chars", Arc::new(Chars));
        assert_eq!(seg.tokenize("chars", "a b").unwrap(), vec!["a", "b"]);
        assert!(seg.tokenize("en", "a b").is_err());
    }
}
