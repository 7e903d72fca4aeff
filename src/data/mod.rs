//! Data module - Polars views over decoded CSV documents

mod frame;

pub use frame::{document_to_frame, frame_to_document, summarize, ColumnSummary, FrameError};
