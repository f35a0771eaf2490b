//! The contract every persisted record type fulfils.

use crate::codec::{FieldResult, Fields};

/// A value kept in a [`RecordStore`](super::RecordStore).
///
/// The associated constants tie a type to its data file, its config keys and
/// the schema version its codec reads and writes. Older versions are handled
/// by a [`MigrationChain`](super::MigrationChain) before `decode` ever sees a
/// line.
pub trait Record: Sized {
    /// Short name used in internal config keys (`"<kind>:version"`).
    const KIND: &'static str;

    /// File name inside the data directory.
    const FILE_NAME: &'static str;

    /// Schema version written by `encode` and read by `decode`.
    const SCHEMA_VERSION: u32;

    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    fn encode(&self) -> Fields;

    fn decode(fields: &Fields) -> FieldResult<Self>;
}
