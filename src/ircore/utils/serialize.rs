use std::path::Path;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use serde::{Serialize, de::DeserializeOwned};
use crate::ircore::error::CacheError;

pub fn write_file<T: Serialize>(filepath: &Path, obj: &T) -> Result<(), CacheError> {
    if let Some(dir) = filepath.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut writer = BufWriter::new(File::create(filepath)?);
    bincode::serialize_into(&mut writer, obj)?;
    writer.flush()?;
    Ok(())
}

/// Lengths read from the file are checked against its size, so a corrupt
/// file fails with a codec error instead of a huge allocation.
pub fn read_file<T: DeserializeOwned>(filepath: &Path) -> Result<T, CacheError> {
    let bytes = fs::read(filepath)?;
    Ok(bincode::deserialize(&bytes)?)
}
