pub mod error;
pub mod normalizer;
pub mod analyzer;
pub mod tokenizer;
pub mod doc;
pub mod cache;
pub mod index;
pub mod vectorizer;
pub mod ranking;
pub mod engine;
pub mod utils;

pub type DocId = String;
pub type Term = String;
pub type Weight = f64;

pub const CFG_NAME: &str = ".rrdcfg";
pub const DEFAULT_EACH_BOW_SIZE: usize = 30;
pub const CACHE_KEY_PREFIX: &str = "related-posts-ssd-";
