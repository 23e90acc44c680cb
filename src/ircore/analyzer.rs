use jieba_rs::Jieba;
use once_cell::sync::OnceCell;

/// One analyzed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Morpheme {
    pub surface: String,
    /// dictionary form, when the analyzer knows one
    pub base_form: Option<String>,
    pub pos: String,
}

impl Morpheme {
    pub fn form(&self) -> &str {
        self.base_form.as_deref().unwrap_or(&self.surface)
    }
}

// general noun, then the proper noun sub-categories (person, place,
// organization, other)
const NOUN_TAGS: [&str; 5] = ["n", "nr", "ns", "nt", "nz"];

/// Morphological analyzer backed by a jieba dictionary.
///
/// Building the dictionary is expensive, so it happens on first use and at
/// most once, even when several threads race for it. Share one instance
/// through an `Arc`.
#[derive(Default)]
pub struct MorphAnalyzer {
    seg: OnceCell<Jieba>,
}

impl MorphAnalyzer {
    pub fn new() -> Self {
        MorphAnalyzer { seg: OnceCell::new() }
    }

    pub fn is_built(&self) -> bool {
        self.seg.get().is_some()
    }

    fn segmenter(&self) -> &Jieba {
        self.seg.get_or_init(|| {
            log::info!("building morphological dictionary");
            Jieba::new()
        })
    }

    pub fn analyze(&self, text: &str) -> Vec<Morpheme> {
        self.segmenter()
            .tag(text, true)
            .into_iter()
            .filter(|tag| !tag.word.trim().is_empty())
            .map(|tag| Morpheme {
                surface: tag.word.to_string(),
                base_form: None,
                pos: tag.tag.to_string(),
            })
            .collect()
    }

    pub fn is_kept_noun(morpheme: &Morpheme) -> bool {
        NOUN_TAGS.contains(&morpheme.pos.as_str())
    }

    /// Nouns of the allow-listed sub-categories, in dictionary form.
    pub fn nouns(&self, text: &str) -> Vec<String> {
        self.analyze(text)
            .iter()
            .filter(|m| Self::is_kept_noun(m))
            .map(|m| m.form().to_string())
            .collect()
    }
}

impl std::fmt::Debug for MorphAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphAnalyzer")
            .field("built", &self.is_built())
            .finish()
    }
}
