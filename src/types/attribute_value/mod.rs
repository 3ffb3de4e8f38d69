use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::attribute_format::AttributeFormat;

/// 强类型属性值 - 每个变体对应一种 AttributeFormat
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// 字符串
    String(String),
    /// 32位整数
    Integer(i32),
    /// 64位整数
    Long(i64),
    /// 16位整数
    Short(i16),
    /// 单精度浮点数
    Float(f32),
    /// 双精度浮点数
    Double(f64),
    /// 布尔值
    Boolean(bool),
    /// UTC日期时间
    Date(DateTime<Utc>),
    /// 几何，保存WKT文本
    Geometry(String),
    /// 二进制
    Binary(Vec<u8>),
    /// XML文本
    Xml(String),
    /// 任意对象
    Object(serde_json::Value),
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Long(l) => write!(f, "{}", l),
            AttributeValue::Short(s) => write!(f, "{}", s),
            // Debug 格式保留整数值的 ".0"，例如 1.0 而不是 1
            AttributeValue::Float(fl) => write!(f, "{:?}", fl),
            AttributeValue::Double(d) => write!(f, "{:?}", d),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Date(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            AttributeValue::Geometry(wkt) => write!(f, "{}", wkt),
            AttributeValue::Binary(bytes) => write!(f, "[{} bytes]", bytes.len()),
            AttributeValue::Xml(xml) => write!(f, "{}", xml),
            AttributeValue::Object(json) => write!(f, "{}", json),
        }
    }
}

impl std::fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 与 DataValue 一致，Debug 显示格式名和实际值
        write!(f, "{}({})", self.format(), self)
    }
}

impl AttributeValue {
    /// 获取值对应的属性格式
    pub fn format(&self) -> AttributeFormat {
        match self {
            AttributeValue::String(_) => AttributeFormat::String,
            AttributeValue::Integer(_) => AttributeFormat::Integer,
            AttributeValue::Long(_) => AttributeFormat::Long,
            AttributeValue::Short(_) => AttributeFormat::Short,
            AttributeValue::Float(_) => AttributeFormat::Float,
            AttributeValue::Double(_) => AttributeFormat::Double,
            AttributeValue::Boolean(_) => AttributeFormat::Boolean,
            AttributeValue::Date(_) => AttributeFormat::Date,
            AttributeValue::Geometry(_) => AttributeFormat::Geometry,
            AttributeValue::Binary(_) => AttributeFormat::Binary,
            AttributeValue::Xml(_) => AttributeFormat::Xml,
            AttributeValue::Object(_) => AttributeFormat::Object,
        }
    }

    /// 取字符串内容（String / Geometry / Xml）
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) | AttributeValue::Geometry(s) | AttributeValue::Xml(s) => {
                Some(s.as_str())
            }
            _ => None,
        }
    }

    /// 取日期值
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            AttributeValue::Date(dt) => Some(dt),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i16> for AttributeValue {
    fn from(value: i16) -> Self {
        AttributeValue::Short(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Long(value)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::Date(value)
    }
}
