//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod format;
pub mod info;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read from a stream, refusing to buffer more than `max_bytes`.
pub fn read_input_stream<R: Read>(reader: R, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let read = reader
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            if read > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut reader = reader;
            reader
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
        }
    }
    Ok(content)
}
