//! Directory-backed key-value store
//!
//! One file per key. File names are the percent-encoded key plus `.json`,
//! so keys like `verification:VER1` stay portable across filesystems.
//! Writes land in a temp file first and are renamed into place.

use std::fs;
use std::path::PathBuf;

use super::{KeyValueStore, StoreError};

const FILE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        tracing::debug!("File store opened at {}", base_dir.display());
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("empty key".to_string()));
        }
        Ok(self.base_dir.join(format!("{}.{}", encode_key(key), FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(TEMP_EXTENSION);

        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |e| e != FILE_EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match decode_key(stem) {
                Some(key) => keys.push(key),
                None => tracing::warn!("Skipping undecodable file name: {}", path.display()),
            }
        }

        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// `None` when the stem is not valid UTF-8 once decoded
fn decode_key(stem: &str) -> Option<String> {
    urlencoding::decode(stem).ok().map(|key| key.into_owned())
}
