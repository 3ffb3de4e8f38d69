//! 元数据卡片表格导出

pub mod csv_transformer;
pub mod projection;
pub mod tabular;

pub use csv_transformer::{CSV_MIME_TYPE, CSV_TRANSFORMER_ID, CsvExportTransformer, ExportContent};
pub use projection::{ExportColumn, project};
pub use tabular::{serialize, serialize_with_format};
