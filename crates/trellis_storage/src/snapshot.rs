//! Site snapshots in `MessagePack`.
//!
//! A snapshot holds the configuration, every folder and every annotation,
//! orders included. Handlers and the event journal are not persisted; a
//! loaded site gets its handlers back from its configuration.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use trellis_foundation::{Error, ErrorKind, Result};

use crate::site::Site;

/// Serializes a site to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(site: &Site) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(site).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a site from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Site> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Saves a site to a file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(site: &Site, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(site)?;

    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    log::debug!("saved site snapshot to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Loads a site from a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Site> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}

impl Site {
    /// Serializes this site; see [`to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        to_bytes(self)
    }

    /// Restores a site from [`to_snapshot`](Self::to_snapshot) output.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        from_bytes(bytes)
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} file '{}': {err}",
        path.display()
    )))
}
