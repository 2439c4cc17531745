use std::fmt;

use super::DocumentId;

/// Longest single path component most filesystems accept.
const MAX_FILE_NAME_BYTES: usize = 255;
/// Hyphenated UUID plus the `-` separator.
const ID_PREFIX_BYTES: usize = 37;
const MAX_SAFE_NAME_BYTES: usize = MAX_FILE_NAME_BYTES - ID_PREFIX_BYTES;
const MAX_KEPT_EXTENSION_BYTES: usize = 16;

/// Flat, collision-free name of a staged upload inside the staging root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(document_id: &DocumentId, filename: &str) -> Self {
        let safe_name: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let safe_name = shorten(safe_name.trim_start_matches('.'));

        if safe_name.is_empty() {
            Self(document_id.as_uuid().to_string())
        } else {
            Self(format!("{}-{}", document_id.as_uuid(), safe_name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cuts the stem so the name fits one path component, keeping a short
/// extension. Input is ASCII, so byte slicing is safe.
fn shorten(name: &str) -> String {
    if name.len() <= MAX_SAFE_NAME_BYTES {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, extension))
            if !stem.is_empty() && extension.len() <= MAX_KEPT_EXTENSION_BYTES =>
        {
            let keep = MAX_SAFE_NAME_BYTES - extension.len() - 1;
            format!("{}.{}", &stem[..keep], extension)
        }
        _ => name[..MAX_SAFE_NAME_BYTES].to_string(),
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
