//! 导入方向的转换
//!
//! - `coercion`: JSON值到强类型属性值
//! - `property_json`: 属性JSON文档到元数据卡片

pub mod coercion;
pub mod property_json;

pub use coercion::{coerce, coerce_scalar, parse_date, round_half_up};
pub use property_json::PropertyJsonReader;
