// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Torrent metainfo parsing.

use std::collections::HashMap;
use std::path::Path;

use dirscanner_core::DirScannerError;
use serde_bencode::value::Value;
use sha1::{Digest, Sha1};

/// One file described by a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    /// Path elements joined with `/`.
    pub path: String,
    pub size: u64,
}

/// What the scanner exports from a `.torrent` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentMetadata {
    /// Lowercase hex SHA-1 of the canonical encoding of the `info` dictionary.
    pub info_hash: String,
    pub name: String,
    pub total_size: u64,
    pub files: Vec<TorrentFile>,
}

type Dict = HashMap<Vec<u8>, Value>;

impl TorrentMetadata {
    /// Parse a bencoded metainfo document.
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        let root: Value = serde_bencode::from_bytes(data).map_err(|e| e.to_string())?;
        let Value::Dict(root) = root else {
            return Err("metainfo is not a dictionary".into());
        };
        let info = root.get(&b"info"[..]).ok_or("missing info dictionary")?;
        let Value::Dict(fields) = info else {
            return Err("info is not a dictionary".into());
        };
        // Dictionary keys are re-emitted sorted, which is how a valid info
        // dictionary is already encoded.
        let encoded = serde_bencode::to_bytes(info).map_err(|e| e.to_string())?;

        let name = text(fields, "name").ok_or("missing info.name")?;

        let files = match fields.get(&b"files"[..]) {
            Some(list) => multi_file(list)?,
            None => {
                let size = int(fields, "length").ok_or("missing info.length")?;
                vec![TorrentFile {
                    path: name.clone(),
                    size: non_negative(size)?,
                }]
            }
        };

        let total_size = files.iter().map(|f| f.size).sum();
        Ok(Self {
            info_hash: hex::encode(Sha1::digest(&encoded)),
            name,
            total_size,
            files,
        })
    }

    /// Read and parse a `.torrent` file.
    pub fn from_path(path: &Path) -> Result<Self, DirScannerError> {
        let data = std::fs::read(path).map_err(|e| DirScannerError::io(path, e))?;
        Self::from_bytes(&data).map_err(|message| DirScannerError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}

fn multi_file(list: &Value) -> Result<Vec<TorrentFile>, String> {
    let Value::List(entries) = list else {
        return Err("info.files is not a list".into());
    };
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let Value::Dict(entry) = entry else {
                return Err(format!("info.files[{i}] is not a dictionary"));
            };
            let size = int(entry, "length").ok_or_else(|| format!("info.files[{i}] has no length"))?;
            let Some(Value::List(elements)) = entry.get(&b"path"[..]) else {
                return Err(format!("info.files[{i}] has no path"));
            };
            let path = elements
                .iter()
                .map(|el| match el {
                    Value::Bytes(b) => Ok(String::from_utf8_lossy(b).into_owned()),
                    _ => Err(format!("info.files[{i}].path has a non-string element")),
                })
                .collect::<Result<Vec<_>, _>>()?
                .join("/");
            Ok(TorrentFile {
                path,
                size: non_negative(size)?,
            })
        })
        .collect()
}

fn text(dict: &Dict, key: &str) -> Option<String> {
    match dict.get(key.as_bytes()) {
        Some(Value::Bytes(b)) => Some(String::from_utf8_lossy(b).into_owned()),
        _ => None,
    }
}

fn int(dict: &Dict, key: &str) -> Option<i64> {
    match dict.get(key.as_bytes()) {
        Some(Value::Int(n)) => Some(*n),
        _ => None,
    }
}

fn non_negative(n: i64) -> Result<u64, String> {
    u64::try_from(n).map_err(|_| format!("negative length {n}"))
}
