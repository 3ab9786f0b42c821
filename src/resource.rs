//! Language resources and the stores that provide them.
/// Directory-backed store
mod directory;
/// Resource record and header parsing
mod language;
/// Store contract and in-memory store
mod store;

pub(crate) use language::strip_bom;
pub use directory::{
    DirectoryStore,
    StoreError,
};
pub use language::{
    LanguageResource,
    NAME_DIRECTIVE,
    extract_display_name,
    key_from_path,
};
pub use store::{
    MemoryStore,
    ResourceStore,
};
