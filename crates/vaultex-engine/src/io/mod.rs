use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid vault directory: {}", .0.display())]
    InvalidVault(PathBuf),
}

/// Read a note relative to the vault root
pub fn read_file(relative_path: &RelativePath, vault_root: &Path) -> Result<String, IoError> {
    read_path(&relative_path.to_path(vault_root))
}

/// Read any text file, reporting a missing file as [`IoError::NotFound`]
pub fn read_path(path: &Path) -> Result<String, IoError> {
    if !path.is_file() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write generated output, creating parent directories as needed
pub fn write_path(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| IoError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn validate_vault_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidVault(path.to_path_buf()));
    }

    Ok(())
}
