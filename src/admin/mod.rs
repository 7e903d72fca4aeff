//! Admin module - collection export/import over a record store

mod entity;
mod store;
mod transfer;

pub use entity::EntityKind;
pub use store::{MemoryStore, RecordStore, StoreError, ID_FIELD};
pub use transfer::{AdminError, AdminService, CsvExport, ImportSummary, CSV_CONTENT_TYPE};
