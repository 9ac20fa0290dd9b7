// src/source/mod.rs
use crate::utils::error::SourceError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads edition text dumps from a base directory.
pub struct SourceLoader {
    base_dir: PathBuf,
}

impl SourceLoader {
    /// Creates a new SourceLoader rooted at the specified directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self { base_dir: base_dir.as_ref().to_path_buf() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Relative names resolve against the base directory; absolute paths are used as-is.
    pub fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Loads a whole document as UTF-8 text.
    pub async fn load(&self, file: &str) -> Result<String, SourceError> {
        let path = self.resolve(file);
        tracing::debug!("Loading source document {}", path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                tracing::info!("Loaded {} ({} bytes)", path.display(), content.len());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(SourceError::MissingDocument(path)),
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_relative_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("to1.txt"), "=== PAGE 1 ===Alpha").unwrap();

        let loader = SourceLoader::new(dir.path());
        let content = tokio_test::block_on(loader.load("to1.txt")).unwrap();
        assert_eq!(content, "=== PAGE 1 ===Alpha");
    }

    #[test]
    fn test_load_absolute_file_ignores_base_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("abs.txt");
        std::fs::write(&file, "text").unwrap();

        let loader = SourceLoader::new("/nonexistent-base");
        let content = tokio_test::block_on(loader.load(file.to_str().unwrap())).unwrap();
        assert_eq!(content, "text");
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let loader = SourceLoader::new(dir.path());
        let err = tokio_test::block_on(loader.load("missing.txt")).unwrap_err();
        match err {
            SourceError::MissingDocument(path) => assert_eq!(path, dir.path().join("missing.txt")),
            other => panic!("expected MissingDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bin.txt"), [0xff, 0xfe, 0x00]).unwrap();
        let loader = SourceLoader::new(dir.path());
        let err = tokio_test::block_on(loader.load("bin.txt")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
