//! Atomic file output.
//!
//! The PDF is staged in a temp file next to the destination and renamed into
//! place, so an interrupted run never leaves a truncated document behind.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tempfile::NamedTempFile;

pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    // Stage in the destination directory so the final rename stays on one
    // filesystem.
    let dir = match path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;
    staged.persist(path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_bytes_to_the_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.pdf");

        write_atomic(&path, b"%PDF-stub").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"%PDF-stub");
    }

    #[test]
    fn replaces_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.pdf");
        fs::write(&path, b"old contents").unwrap();

        write_atomic(&path, b"new contents").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new contents");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.pdf");

        write_atomic(&path, b"%PDF-stub").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
