//! Scene hierarchies as JSON documents.
//!
//! A live hierarchy is captured into a [`NodeRecord`] tree with [`export::capture`], written out
//! with [`formats::encode_tree`], read back with [`formats::decode_tree`] and rebuilt into a host
//! with [`import::reconstruct`]. Reusable templates live in a [`TemplateCatalog`], and
//! [`session::EditorSession`] ties the whole workflow together.

pub mod capability;
pub mod catalog;
pub mod export;
pub mod formats;
pub mod host;
pub mod import;
pub mod math;
pub mod persist;
pub mod record;
pub mod scene;
pub mod session;

pub use catalog::{InvalidSelectionError, TemplateCatalog};
pub use record::NodeRecord;

/// Document written on a fresh session before any template exists.
pub const EMPTY_CATALOG_DOCUMENT: &str = "{\"elements\":[]}";
