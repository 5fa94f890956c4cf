//! Store crate: driver/travel records, the shared in-memory record store,
//! query operations, and the SQLite archive.
//!
//! ## Modules
//!
//! - [`error`] – Store error types
//! - [`models`] – Driver, Travel
//! - [`store`] – RecordStore (in-memory, write-through persistence)
//! - [`query`] – Travel search and best-rated drivers
//! - [`archive`] – Archive trait and SqliteArchive

mod archive;
mod error;
mod models;
mod query;
mod store;

pub use archive::{Archive, SqliteArchive};
pub use error::StoreError;
pub use models::{Driver, Travel};
pub use query::SortOrder;
pub use store::RecordStore;
