use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create an empty temporary vault directory
pub fn create_test_vault() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file in the vault, including any parent folders
pub fn create_test_note(vault: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = vault.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
