// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for synthetic `.torrent` files.

#![allow(dead_code)]

/// Bencoded single-file torrent.
pub fn single_file(name: &str, length: u64) -> Vec<u8> {
    format!(
        "d8:announce18:http://tracker/ann4:infod6:lengthi{length}e4:name{}:{name}12:piece lengthi16384eee",
        name.len()
    )
    .into_bytes()
}

/// Bencoded multi-file torrent; each file is `(slash-separated path, length)`.
pub fn multi_file(name: &str, files: &[(&str, u64)]) -> Vec<u8> {
    let mut out = String::from("d4:infod5:filesl");
    for (path, length) in files {
        out.push_str(&format!("d6:lengthi{length}e4:pathl"));
        for element in path.split('/') {
            out.push_str(&format!("{}:{element}", element.len()));
        }
        out.push_str("ee");
    }
    out.push_str(&format!("e4:name{}:{name}ee", name.len()));
    out.into_bytes()
}
