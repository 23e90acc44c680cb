use std::fs;
use std::io;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::ircore::{CFG_NAME, DEFAULT_EACH_BOW_SIZE};
use crate::ircore::error::ConfigError;
use crate::ircore::vectorizer::VectorFill;

/// Settings of one ranking run.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(default)]
pub struct RankConfig {
    pub doc_lang: String,
    pub each_bow_size: usize,
    pub vector_fill: VectorFill,
    pub limit: Option<usize>,
    pub extensions: Vec<String>,
}

impl Default for RankConfig {
    fn default() -> Self {
        RankConfig {
            doc_lang: String::from("en"),
            each_bow_size: DEFAULT_EACH_BOW_SIZE,
            vector_fill: VectorFill::FullTable,
            limit: None,
            extensions: vec!["md".to_string(), "markdown".to_string(), "txt".to_string()],
        }
    }
}

impl RankConfig {
    pub fn from_str(cfg_str: &str) -> Result<Self, ConfigError> {
        let cfg: RankConfig = serde_yaml::from_str(cfg_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads `.rrdcfg` under `corpus_dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(corpus_dir: &Path) -> Result<Self, ConfigError> {
        let cfg_path = corpus_dir.join(CFG_NAME);
        match fs::read_to_string(&cfg_path) {
            Ok(cfg_str) => {
                log::debug!("loading config from {}", cfg_path.display());
                Self::from_str(&cfg_str)
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io {
                path: cfg_path.to_string_lossy().to_string(),
                source: e,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.each_bow_size == 0 {
            return Err(ConfigError::Invalid("each_bow_size must be at least 1".to_string()));
        }
        if self.doc_lang.trim().is_empty() {
            return Err(ConfigError::Invalid("doc_lang must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
