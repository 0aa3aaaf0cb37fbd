pub mod meta;
pub mod note;

pub use meta::{MetaValue, Metadata, parse_yaml_metadata};
pub use note::NoteRef;
