use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use encoding_rs_io::DecodeReaderBytesBuilder;
use super::Document;

pub trait TextFileLoader {
    fn parse_file(id: &str, path: &Path) -> io::Result<Document>;
    fn read_bytes_bom_sniffing(path: &Path) -> io::Result<Vec<u8>>;
}

impl TextFileLoader for Document {
    fn parse_file(id: &str, path: &Path) -> io::Result<Document> {
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::Other,
                format!("{} is not a file", path.display())));
        }
        let raw = Self::read_bytes_bom_sniffing(path)?;
        Ok(Document::from_bytes(id, raw))
    }

    // UTF-16 files with a BOM are transcoded to UTF-8; anything else is
    // passed through untouched and validated later by the engine
    fn read_bytes_bom_sniffing(path: &Path) -> io::Result<Vec<u8>> {
        let source_file = File::open(path)?;
        let mut decoder = DecodeReaderBytesBuilder::new()
            .bom_sniffing(true)
            .strip_bom(true)
            .build(source_file);
        let mut dest = vec![];
        decoder.read_to_end(&mut dest)?;
        Ok(dest)
    }
}
