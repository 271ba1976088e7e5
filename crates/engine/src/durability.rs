//! Load/persist cycle for the backing file.
//!
//! The backing file holds one JSON object: collection name → document id →
//! fields. Loading happens once, when a store opens. Every mutation rewrites
//! the whole file (no appends, no diffs) through a temp-sibling-then-rename
//! so a crash mid-write can never leave a truncated file behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use docket_core::{Collections, Error, Result};
use tracing::{debug, warn};

/// Load the mapping from `path`, creating an empty backing file if absent.
///
/// An undecodable file is renamed to a `.corrupt` sibling before the error
/// is returned: the original bytes survive for manual recovery, and the
/// next open starts from an empty store. A zero-length file decodes as the
/// empty store; `load` itself never writes one, but external truncation
/// should not read as corruption.
pub(crate) fn load(path: &Path) -> Result<Collections> {
    if !path.exists() {
        let empty = Collections::new();
        persist(path, &empty)?;
        debug!(path = %path.display(), "created empty store file");
        return Ok(empty);
    }

    let bytes = fs::read(path)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Collections::new());
    }

    match serde_json::from_slice::<Collections>(&bytes) {
        Ok(mut collections) => {
            // A collection name exists only while it holds documents; an
            // externally edited file may disagree.
            collections.retain(|_, docs| !docs.is_empty());
            debug!(
                path = %path.display(),
                collections = collections.len(),
                "loaded store file"
            );
            Ok(collections)
        }
        Err(source) => {
            let quarantine = sibling(path, "corrupt");
            fs::rename(path, &quarantine)?;
            warn!(
                path = %path.display(),
                quarantine = %quarantine.display(),
                "backing file undecodable, set aside"
            );
            Err(Error::Corrupted {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Overwrite the backing file with the full `collections` mapping.
///
/// The mapping is serialized in one piece, written to a temp sibling,
/// synced, and renamed over `path`, so a reader at rest only ever observes
/// a complete file.
pub(crate) fn persist(path: &Path, collections: &Collections) -> Result<()> {
    let bytes =
        serde_json::to_vec(collections).map_err(|e| Error::Serialization(e.to_string()))?;

    let tmp = sibling(path, "tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), bytes = bytes.len(), "persisted store file");
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
