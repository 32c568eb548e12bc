//! Build a [`VirtualFileSystem`] from a CSV description.
//!
//! The CSV has a header row. Columns:
//!
//! | column     | required | meaning                                        |
//! |------------|----------|------------------------------------------------|
//! | `path`     | yes      | `/`-separated, leading `/` optional            |
//! | `type`     | no       | `directory`, anything else (or empty) = file   |
//! | `content`  | no       | file payload                                   |
//! | `encoding` | no       | `base64` to decode `content`, else plain text  |
//!
//! Rows are applied in order, so a later row for the same path overrides an
//! earlier one. Rows may be shorter or longer than the header: missing
//! columns read as empty and extra ones are ignored. A row without a path
//! aborts the load; rows already applied stay in the tree.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;
use tracing::{debug, warn};

use super::traits::DirEntryKind;
use super::tree::VirtualFileSystem;
use crate::error::{Result, VfsError};

/// Standard alphabet, accepting payloads with or without `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One CSV row, before interpretation.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    path: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows applied.
    pub rows: usize,
    /// Nodes in the tree afterwards, root included.
    pub nodes: usize,
}

/// Load a CSV file into `vfs`.
pub fn load_csv_path(vfs: &mut VirtualFileSystem, path: impl AsRef<Path>) -> Result<LoadReport> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading vfs description");
    let file = File::open(path)?;
    load_csv_reader(vfs, file)
}

/// Load CSV data from any reader into `vfs`.
pub fn load_csv_reader<R: Read>(vfs: &mut VirtualFileSystem, reader: R) -> Result<LoadReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut rows = 0;
    for (index, record) in rdr.deserialize::<Row>().enumerate() {
        let row_num = index + 1;
        let row = record?;

        let path = match row.path.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => {
                return Err(VfsError::Load {
                    row: row_num,
                    message: "missing path".to_string(),
                });
            }
        };
        let is_directory = row
            .kind
            .as_deref()
            .is_some_and(|k| k.trim().eq_ignore_ascii_case(DirEntryKind::Directory.as_str()));
        let raw = row.content.unwrap_or_default();

        let content = if !is_directory && row.encoding.as_deref().map(str::trim) == Some("base64") {
            decode_base64(&raw).unwrap_or_else(|err| {
                warn!(row = row_num, %path, error = %err, "base64 decode failed, keeping raw content");
                raw
            })
        } else {
            raw
        };

        vfs.create_path(&path, is_directory, &content)?;
        rows += 1;
    }

    let report = LoadReport {
        rows,
        nodes: vfs.node_count(),
    };
    debug!(rows = report.rows, nodes = report.nodes, "vfs loaded");
    Ok(report)
}

/// Decode a base64 payload, ignoring line wrapping and other ASCII whitespace.
fn decode_base64(encoded: &str) -> std::result::Result<String, String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT.decode(compact).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

impl VirtualFileSystem {
    /// Create a filesystem from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut vfs = Self::new();
        load_csv_path(&mut vfs, path)?;
        Ok(vfs)
    }
}
