//! Fixed file-path conventions of a scan run.
//!
//! All behavior is driven by the layout of the scanned core checkout and the
//! destination tree; there is no persisted configuration surface. The
//! conventions mirror the upstream checkout: the canonical constants text
//! lives at `src/constants.rs`, the legacy transport at
//! `src/addon_transport/http_transport/legacy/mod.rs`, and generated
//! declaration files under `bindings/`.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Marker subdirectory whose presence proves the core checkout exists.
const CORE_MARKER: &str = ".git";

/// Reserved declaration filename excluded from binding transformation.
pub const RESERVED_BINDING_FILE: &str = "index.ts";

/// Resolved paths for one run.
#[derive(Debug, Clone)]
pub struct Layout {
    core_dir: PathBuf,
    target_dir: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `core_dir`, emitting into `target_dir`.
    #[must_use]
    pub fn new(core_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            core_dir: core_dir.into(),
            target_dir: target_dir.into(),
        }
    }

    /// Root of the scanned source tree.
    #[must_use]
    pub fn core_dir(&self) -> &Path {
        &self.core_dir
    }

    /// The canonical constants text.
    #[must_use]
    pub fn constants_path(&self) -> PathBuf {
        self.core_dir.join("src").join("constants.rs")
    }

    /// The legacy-transport text used for exclusion-set derivation.
    #[must_use]
    pub fn legacy_transport_path(&self) -> PathBuf {
        self.core_dir
            .join("src")
            .join("addon_transport")
            .join("http_transport")
            .join("legacy")
            .join("mod.rs")
    }

    /// Directory of generated per-type declaration files.
    #[must_use]
    pub fn bindings_dir(&self) -> PathBuf {
        self.core_dir.join("bindings")
    }

    /// Destination directory for transformed declaration files.
    #[must_use]
    pub fn types_dir(&self) -> PathBuf {
        self.target_dir.join("types")
    }

    /// Path of the aggregated re-export module.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.target_dir.join("index.ts")
    }

    /// Precondition: the core checkout must exist before any scanning.
    ///
    /// Detection goes through the marker subdirectory rather than the root
    /// itself so a half-created directory does not pass.
    pub fn ensure_core_present(&self) -> Result<()> {
        if self.core_dir.join(CORE_MARKER).is_dir() {
            Ok(())
        } else {
            Err(Error::NotFound(format!(
                "core checkout not found at {}; run the setup step to fetch it first",
                self.core_dir.display()
            )))
        }
    }

    /// Precondition: the declaration source directory must exist.
    pub fn ensure_bindings_present(&self) -> Result<()> {
        if self.bindings_dir().is_dir() {
            Ok(())
        } else {
            Err(Error::NotFound(format!(
                "declaration directory not found at {}; generate the bindings first",
                self.bindings_dir().display()
            )))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_fixed_conventions() {
        let layout = Layout::new("/work/core", "/work/sdk/src");
        assert_eq!(
            layout.constants_path(),
            Path::new("/work/core/src/constants.rs")
        );
        assert_eq!(
            layout.legacy_transport_path(),
            Path::new("/work/core/src/addon_transport/http_transport/legacy/mod.rs")
        );
        assert_eq!(layout.bindings_dir(), Path::new("/work/core/bindings"));
        assert_eq!(layout.types_dir(), Path::new("/work/sdk/src/types"));
        assert_eq!(layout.index_path(), Path::new("/work/sdk/src/index.ts"));
    }

    #[test]
    fn core_marker_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let core = dir.path().join("core");
        std::fs::create_dir_all(&core).unwrap();

        let layout = Layout::new(&core, dir.path().join("out"));
        assert!(layout.ensure_core_present().is_err());

        std::fs::create_dir_all(core.join(".git")).unwrap();
        assert!(layout.ensure_core_present().is_ok());
    }

    #[test]
    fn bindings_dir_is_required_for_binding_runs() {
        let dir = tempfile::tempdir().unwrap();
        let core = dir.path().join("core");
        std::fs::create_dir_all(core.join(".git")).unwrap();

        let layout = Layout::new(&core, dir.path().join("out"));
        let err = layout.ensure_bindings_present().unwrap_err();
        assert!(err.to_string().contains("generate the bindings"));

        std::fs::create_dir_all(core.join("bindings")).unwrap();
        assert!(layout.ensure_bindings_present().is_ok());
    }
}
