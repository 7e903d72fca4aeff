//! Data Transfer Module
//! CSV export and import of whole collections for the admin panel.

use super::entity::EntityKind;
use super::store::{RecordStore, StoreError};
use crate::codec::{objects_to_csv, parse_document};
use crate::config::AdminConfig;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Content type of an export response body.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Import body is {size} bytes, limit is {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("Unknown columns for {entity}: {}", .columns.join(", "))]
    UnknownColumns {
        entity: EntityKind,
        columns: Vec<String>,
    },
}

/// A rendered export, ready to be sent as a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub entity: EntityKind,
    pub content_type: &'static str,
    pub filename: String,
    pub rows: usize,
    pub body: String,
}

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub entity: EntityKind,
    pub inserted: usize,
    #[serde(rename = "raggedRows")]
    pub ragged_rows: usize,
}

/// Export and import of collections held by a [`RecordStore`].
pub struct AdminService<S> {
    store: S,
    config: AdminConfig,
}

impl<S: RecordStore> AdminService<S> {
    pub fn new(store: S, config: AdminConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Render every record of `entity` as CSV in the configured column order.
    pub fn export(&self, entity: EntityKind) -> Result<CsvExport, AdminError> {
        let records = self.store.find_all(entity)?;
        let fields = self.config.fields_for(entity);
        let body = objects_to_csv(&records, &fields);

        tracing::info!(%entity, rows = records.len(), bytes = body.len(), "exported collection");

        Ok(CsvExport {
            entity,
            content_type: CSV_CONTENT_TYPE,
            filename: format!("{entity}.csv"),
            rows: records.len(),
            body,
        })
    }

    /// Decode `body` and bulk-insert its rows into `entity`.
    pub fn import(&mut self, entity: EntityKind, body: &str) -> Result<ImportSummary, AdminError> {
        let limit = self.config.max_import_bytes;
        if body.len() > limit {
            return Err(AdminError::PayloadTooLarge {
                size: body.len(),
                limit,
            });
        }

        let document = parse_document(body);

        if self.config.strict_headers {
            let known = self.config.fields_for(entity);
            let unknown: Vec<String> = document
                .fields
                .iter()
                .filter(|field| !known.contains(field))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                return Err(AdminError::UnknownColumns {
                    entity,
                    columns: unknown,
                });
            }
        }

        let ragged_rows = document.ragged_rows;
        let inserted = self.store.insert_many(entity, document.records)?;

        tracing::info!(%entity, inserted, ragged_rows, "imported collection");

        Ok(ImportSummary {
            entity,
            inserted,
            ragged_rows,
        })
    }
}

impl<S: RecordStore + Sync> AdminService<S> {
    /// Export every collection, in [`EntityKind::ALL`] order.
    pub fn export_all(&self) -> Result<Vec<CsvExport>, AdminError> {
        // Use rayon to render collections in parallel
        EntityKind::ALL
            .par_iter()
            .map(|entity| self.export(*entity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::MemoryStore;
    use crate::codec::record;

    #[test]
    fn export_uses_configured_order() {
        let mut store = MemoryStore::new();
        store
            .insert_many(
                EntityKind::ShopItems,
                vec![record([("_id", "s1"), ("name", "Magnet"), ("price", "40")])],
            )
            .unwrap();

        let mut config = AdminConfig::default();
        config
            .field_orders
            .insert(EntityKind::ShopItems, vec!["name".into(), "price".into()]);

        let service = AdminService::new(store, config);
        let export = service.export(EntityKind::ShopItems).unwrap();
        assert_eq!(export.body, "name,price\nMagnet,40\n");
        assert_eq!(export.content_type, CSV_CONTENT_TYPE);
        assert_eq!(export.filename, "shop-items.csv");
        assert_eq!(export.rows, 1);
    }

    #[test]
    fn import_rejects_oversized_body() {
        let config = AdminConfig {
            max_import_bytes: 8,
            ..Default::default()
        };
        let mut service = AdminService::new(MemoryStore::new(), config);
        let err = service
            .import(EntityKind::Levels, "_id,title\nl1,Gravity\n")
            .unwrap_err();
        assert!(matches!(err, AdminError::PayloadTooLarge { limit: 8, .. }));
        assert!(service.store().is_empty(EntityKind::Levels));
    }

    #[test]
    fn strict_headers_reject_unknown_columns() {
        let config = AdminConfig {
            strict_headers: true,
            ..Default::default()
        };
        let mut service = AdminService::new(MemoryStore::new(), config);
        let err = service
            .import(EntityKind::Levels, "_id,title,secret\nl1,Gravity,x\n")
            .unwrap_err();
        match err {
            AdminError::UnknownColumns { entity, columns } => {
                assert_eq!(entity, EntityKind::Levels);
                assert_eq!(columns, vec!["secret"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
