//! Persistence layer: record trait, generic store and schema migrations.

mod migration;
mod record;
mod record_store;

pub use migration::{MigrationChain, MigrationStep};
pub use record::Record;
pub use record_store::RecordStore;
