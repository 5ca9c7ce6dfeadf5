//! Overlay output.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Pretty-print `document` to `path`, or to stdout when `path` is `None`.
pub fn write_document(document: &Value, path: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(document)?;
    match path {
        Some(path) => fs::write(path, text + "\n")
            .with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
            Ok(())
        }
    }
}
