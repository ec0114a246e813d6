// src/file.rs

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, ScrapeError};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Usage(format!(
            "path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
    }
    Ok(())
}

/// Write `value` as pretty-printed JSON, overwriting any previous file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ScrapeError::io(path, std::io::Error::other(e)))?;
    fs::write(path, json).map_err(|e| ScrapeError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("dac_scrape_{name}"));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn ensure_directory_creates_missing_levels() {
        let dir = tmp_dir("ensure").join("a").join("b");
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
        // Second call is a no-op.
        ensure_directory(&dir).unwrap();
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tmp_dir("reject");
        let file = dir.join("occupied");
        fs::write(&file, b"x").unwrap();
        assert!(ensure_directory(&file).is_err());
    }

    #[test]
    fn json_is_written_pretty() {
        let dir = tmp_dir("json");
        let path = dir.join("out.json");
        write_json(&path, &serde_json::json!({ "code": "MC102" })).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"code\": \"MC102\""));
    }
}
