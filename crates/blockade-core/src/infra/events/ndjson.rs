// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Line-delimited JSON framing of progress events, as used on the push channel between a
//! trusted backend and its client.

use anyhow::{Context, Result};

use crate::domain::blocking::models::ProgressEvent;

pub fn encode_event(event: &ProgressEvent) -> Result<String> {
    let mut line = serde_json::to_string(event)?;
    line.push('\n');
    Ok(line)
}

/// Decodes a single line. Blank lines (e.g. keep-alives) yield `None`.
pub fn decode_event(line: &str) -> Result<Option<ProgressEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(Some)
        .with_context(|| format!("Malformed progress event '{line}'"))
}
