pub mod cfg;
pub mod dir;
pub mod text;

use encoding_rs::UTF_8;
use crate::ircore::error::EngineError;

#[derive(PartialEq, Debug, Clone)]
pub struct Document {
    id: String,
    raw: Vec<u8>,
}

impl Document {
    pub fn new(id: &str, content: &str) -> Self {
        Document {
            id: id.to_string(),
            raw: content.as_bytes().to_vec(),
        }
    }

    /// Document whose bytes may not be text at all.
    pub fn from_bytes(id: &str, raw: Vec<u8>) -> Self {
        Document { id: id.to_string(), raw }
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn get_content(&self) -> Result<&str, EngineError> {
        match UTF_8.decode_without_bom_handling_and_without_replacement(&self.raw) {
            Some(std::borrow::Cow::Borrowed(text)) => Ok(text),
            _ => Err(EngineError::MalformedInput { id: self.id.clone() }),
        }
    }
}
