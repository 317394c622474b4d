// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional `torrentscanner.toml` settings.

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TorrentConfig {
    /// Field separator for CSV output. Must be a single ASCII character.
    pub delimiter: char,
}

impl Default for TorrentConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl TorrentConfig {
    /// The delimiter as a byte, falling back to the default for non-ASCII
    /// or line-breaking characters.
    pub fn delimiter_byte(&self) -> u8 {
        match u8::try_from(self.delimiter) {
            Ok(b) if b.is_ascii() && b != b'\n' && b != b'\r' && b != b'"' => b,
            _ => {
                warn!(delimiter = %self.delimiter.escape_default(), "unusable delimiter, using ','");
                DEFAULT_DELIMITER as u8
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_byte() {
        assert_eq!(TorrentConfig::default().delimiter_byte(), b',');
        assert_eq!(TorrentConfig { delimiter: ';' }.delimiter_byte(), b';');
        assert_eq!(TorrentConfig { delimiter: '\t' }.delimiter_byte(), b'\t');
        assert_eq!(TorrentConfig { delimiter: 'é' }.delimiter_byte(), b',');
        assert_eq!(TorrentConfig { delimiter: '\n' }.delimiter_byte(), b',');
    }
}
