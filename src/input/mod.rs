//! Reading the text to translate from a file or stdin.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Inputs larger than this are rejected before any request is made.
pub const MAX_INPUT_BYTES: u64 = 1024 * 1024;

/// Reads `path`, or stdin when `path` is `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            read_limited(file, &path.display().to_string())
        }
        None => read_limited(io::stdin().lock(), "stdin"),
    }
}

fn read_limited(reader: impl Read, source: &str) -> Result<String> {
    let mut buffer = Vec::new();
    // One extra byte tells "exactly at the limit" apart from "over it".
    reader
        .take(MAX_INPUT_BYTES + 1)
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read from {source}"))?;

    if buffer.len() as u64 > MAX_INPUT_BYTES {
        bail!(
            "Input from {source} exceeds the maximum allowed size (1 MB)\n\n\
             Split it into smaller parts and translate them separately."
        );
    }

    String::from_utf8(buffer).with_context(|| format!("Input from {source} is not valid UTF-8"))
}
