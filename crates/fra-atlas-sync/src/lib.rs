//! Data loading for FRA Atlas: concurrent HTTP pulls and local-directory
//! loads, both producing an immutable [`Snapshot`].

pub mod file;
pub mod http;
pub mod snapshot;

pub use file::{LoadError, load_dir};
pub use http::{AtlasClient, FetchError};
pub use snapshot::Snapshot;
