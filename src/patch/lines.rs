use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, ScaffoldError};

/// Reads a file as an ordered sequence of lines. A missing file is an empty sequence.
pub fn load(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(split_lines(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(ScaffoldError::io(path, e)),
    }
}

/// Writes the sequence back joined with `\n`, replacing the file in one rename.
pub fn save(path: &Path, lines: &[String]) -> Result<()> {
    write_atomic(path, lines.join("\n").as_bytes())
}

/// Splits on `\n` and `\r\n`. A trailing newline yields a trailing empty line,
/// so joining with `\n` reproduces the input.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ScaffoldError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ScaffoldError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| ScaffoldError::io(path, e))?;
    // The temp file starts out owner-only; keep the target's mode instead.
    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| ScaffoldError::io(path, e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(ScaffoldError::io(path, e)),
    }
    tmp.persist(path).map_err(|e| ScaffoldError::io(path, e.error))?;
    Ok(())
}
