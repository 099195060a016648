//! Recursive discovery of scannable files under the scan root.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Collect every file with `extension` under `root`, recursively.
///
/// Hidden directories (leading dot, e.g. `.git`) are skipped. The result is
/// sorted so downstream reports are stable across platforms and readdir
/// orderings.
pub async fn collect_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                let hidden = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with('.'));
                if !hidden {
                    pending.push(path);
                }
            } else if file_type.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(extension)
            {
                files.push(path);
            }
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "collected files");
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collects_recursively_and_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("src/a.rs"), "").unwrap();
        std::fs::write(nested.join("b.rs"), "").unwrap();
        std::fs::write(nested.join("notes.md"), "").unwrap();

        let files = collect_files(dir.path(), "rs").await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "rs"));
    }

    #[tokio::test]
    async fn hidden_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let hidden = dir.path().join(".git").join("objects");
        std::fs::create_dir_all(&hidden).unwrap();
        std::fs::write(hidden.join("c.rs"), "").unwrap();
        std::fs::write(dir.path().join("a.rs"), "").unwrap();

        let files = collect_files(dir.path(), "rs").await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.rs"));
    }

    #[tokio::test]
    async fn result_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.rs", "m.rs", "a.rs"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let files = collect_files(dir.path(), "rs").await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.rs", "m.rs", "z.rs"]);
    }

    #[tokio::test]
    async fn missing_root_propagates_error() {
        let result = collect_files(Path::new("/definitely/not/here"), "rs").await;
        assert!(result.is_err());
    }
}
