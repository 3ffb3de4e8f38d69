//! 错误类型定义
//!
//! 所有转换器共享同一个错误枚举，调用方拿到的总是带类型的错误而不是部分结果

use crate::types::AttributeFormat;
use thiserror::Error;

/// rat_metacard 统一错误类型
#[derive(Error, Debug)]
pub enum MetacardError {
    /// 输入为空或结构不符合要求
    #[error("输入无效: {message}")]
    InvalidInput { message: String },

    /// 无法识别或不支持的几何类型
    #[error("不支持的几何类型 '{geometry_type}'，无法执行KML转换")]
    UnsupportedGeometry { geometry_type: String },

    /// WKT文本语法错误
    #[error("WKT解析失败: {message}")]
    GeometryParse { message: String },

    /// 值与目标格式之间没有定义转换
    #[error("无法将{value_kind} [{value}] 转换为 {format}")]
    UnsupportedConversion {
        value_kind: String,
        value: String,
        format: AttributeFormat,
    },

    /// JSON值既不是字符串、数字，也不是它们组成的列表
    #[error("无法识别的JSON值类型: [{value}]")]
    UnrecognizedValueType { value: String },

    /// 数字文本格式错误
    #[error("数字格式错误: '{text}' 无法解析为 {format}")]
    NumberFormat { text: String, format: AttributeFormat },

    /// 日期文本格式错误
    #[error("日期解析失败: '{text}' - {message}")]
    DateParse { text: String, message: String },

    /// 投影配置不满足约束
    #[error("配置无效: {message}")]
    ConfigInvalid { message: String },

    /// 序列化/反序列化失败
    #[error("序列化失败: {message}")]
    SerializationError { message: String },

    /// CSV写入失败
    #[error("CSV写入失败: {0}")]
    CsvError(#[from] csv::Error),

    /// IO错误
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),
}

/// rat_metacard 结果类型
pub type MetacardResult<T> = Result<T, MetacardError>;

impl From<serde_json::Error> for MetacardError {
    fn from(e: serde_json::Error) -> Self {
        MetacardError::SerializationError {
            message: e.to_string(),
        }
    }
}

/// 快速构造错误的宏
///
/// ```ignore
/// metacard_error!(invalid_input, "WKT为空");
/// metacard_error!(config, format!("第{}项缺少名称", idx));
/// ```
#[macro_export]
macro_rules! metacard_error {
    (invalid_input, $msg:expr) => {
        $crate::error::MetacardError::InvalidInput {
            message: $msg.to_string(),
        }
    };
    (geometry_parse, $msg:expr) => {
        $crate::error::MetacardError::GeometryParse {
            message: $msg.to_string(),
        }
    };
    (unsupported_geometry, $geometry_type:expr) => {
        $crate::error::MetacardError::UnsupportedGeometry {
            geometry_type: $geometry_type.to_string(),
        }
    };
    (unrecognized_value, $value:expr) => {
        $crate::error::MetacardError::UnrecognizedValueType {
            value: $value.to_string(),
        }
    };
    (config, $msg:expr) => {
        $crate::error::MetacardError::ConfigInvalid {
            message: $msg.to_string(),
        }
    };
    (serialization, $msg:expr) => {
        $crate::error::MetacardError::SerializationError {
            message: $msg.to_string(),
        }
    };
}
