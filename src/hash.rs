use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Result, VeriscanError};

/// Chunk size for incremental digest updates; bounds peak memory
/// regardless of file size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Digests and filesystem metadata for one readable file.
#[derive(Debug, Clone)]
pub struct HashOutcome {
    pub sha256: String,
    pub blake3: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub permissions: Option<String>,
    pub readonly: bool,
}

fn access_error(path: &Path, source: std::io::Error) -> VeriscanError {
    VeriscanError::Access {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn permission_string(metadata: &fs::Metadata) -> Option<String> {
    use std::os::unix::fs::MetadataExt;
    Some(format!("{:03o}", metadata.mode() & 0o777))
}

#[cfg(not(unix))]
fn permission_string(_metadata: &fs::Metadata) -> Option<String> {
    None
}

/// Reads the file in bounded chunks, updating two independent digests.
///
/// # Errors
/// Returns [`VeriscanError::Access`] when the file is missing, unreadable,
/// or fails mid-read; the caller maps this directly to INACCESSIBLE.
pub fn hash_file(path: &Path) -> Result<HashOutcome> {
    let metadata = fs::metadata(path).map_err(|e| access_error(path, e))?;
    let mut file = File::open(path).map_err(|e| access_error(path, e))?;

    let mut sha256 = Sha256::new();
    let mut blake3 = blake3::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|e| access_error(path, e))?;
        if n == 0 {
            break;
        }
        sha256.update(&buf[..n]);
        blake3.update(&buf[..n]);
    }

    let modified = metadata
        .modified()
        .ok()
        .map(DateTime::<Utc>::from);

    Ok(HashOutcome {
        sha256: format!("{:x}", sha256.finalize()),
        blake3: blake3.finalize().to_hex().to_string(),
        size: metadata.len(),
        modified,
        permissions: permission_string(&metadata),
        readonly: metadata.permissions().readonly(),
    })
}

/// Reads up to `limit` leading bytes for content sniffing.
///
/// # Errors
/// Returns [`VeriscanError::Access`] when the file cannot be opened.
pub fn read_head(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| access_error(path, e))?;
    let mut head = Vec::with_capacity(limit);
    file.take(limit as u64)
        .read_to_end(&mut head)
        .map_err(|e| access_error(path, e))?;
    Ok(head)
}

#[cfg(test)]
#[path = "hash_tests.rs"]
mod tests;
