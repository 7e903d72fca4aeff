//! Game Data CSV - CSV import/export for the physics game admin panel
//!
//! The [`codec`] module converts between records and CSV text; [`admin`]
//! exports and imports whole collections through a record store, and
//! [`data`] loads decoded documents into Polars for inspection.

pub mod admin;
pub mod codec;
pub mod config;
pub mod data;

pub use codec::{csv_to_objects, objects_to_csv, parse_csv_line, Document, Record, Value};
