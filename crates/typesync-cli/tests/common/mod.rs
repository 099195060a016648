#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a configured `typesync` command suitable for integration tests.
#[allow(dead_code)]
pub fn typesync_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("typesync"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Scaffold a minimal core checkout under a fresh temp dir.
///
/// Returns the temp dir; the checkout root is `<dir>/core` and the output
/// tree is `<dir>/src`.
#[allow(dead_code)]
pub fn scaffold_core() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create test dir");
    let core = dir.path().join("core");

    fs::create_dir_all(core.join(".git")).unwrap();
    write(
        &core,
        "src/constants.rs",
        r#"
pub const SEARCH_EXTRA_NAME: &str = "search";
pub const CATALOG_RESOURCE_NAME: &str = "catalog";

pub enum ContentType {
    Movie,
}

pub enum ExtraType {
    Search,
}

pub enum ResourceType {
    Catalog,
}
"#,
    );
    write(
        &core,
        "src/addon_transport/http_transport/legacy/mod.rs",
        "use crate::constants::{CATALOG_RESOURCE_NAME};\n",
    );
    write(
        &core,
        "src/catalog.rs",
        r#"
pub fn default() -> MetaItem {
    MetaItem {
        r#type: "movie".to_owned(),
    }
}

pub fn wants_search(extra_name: &str) -> bool {
    extra_name == "search"
}

pub fn stream() -> ResourcePath {
    ResourcePath {
        resource: "stream".to_owned(),
    }
}
"#,
    );

    dir
}

#[allow(dead_code)]
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
