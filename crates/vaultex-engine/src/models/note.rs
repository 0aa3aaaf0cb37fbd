use relative_path::{RelativePath, RelativePathBuf};

/// A note in the vault: the folder it lives in plus its name without `.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRef {
    base: RelativePathBuf,
    name: String,
    relative_path: RelativePathBuf,
}

impl NoteRef {
    pub const EXTENSION: &'static str = "md";

    pub fn new(base: RelativePathBuf, name: impl Into<String>) -> Self {
        let name = name.into();
        let relative_path = base.join(format!("{name}.{}", Self::EXTENSION));
        Self {
            base,
            name,
            relative_path,
        }
    }

    /// The vault index note at the root.
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(RelativePathBuf::new(), name)
    }

    /// Folder the note lives in, relative to the vault root
    pub fn base(&self) -> &RelativePath {
        &self.base
    }

    /// Note name, used as the header title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the markdown file relative to the vault root
    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }
}
