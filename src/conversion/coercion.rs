//! JSON值到强类型属性值的转换
//!
//! 按目标 AttributeFormat 把解码后的 JSON 标量或列表转换为 AttributeValue。
//! 纯函数，无共享状态，可以并发调用

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{MetacardError, MetacardResult};
use crate::types::{AttributeFormat, AttributeValue};

/// 日期文本格式 yyyy-MM-dd'T'HH:mm:ss.SSSZ
pub const ISO_8601_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

static ISO_8601_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}[+-]\d{4}$").unwrap()
});

/// 可转换的原始标量
#[derive(Debug, Clone, Copy, PartialEq)]
enum RawScalar<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
}

impl<'a> RawScalar<'a> {
    fn classify(raw: &'a Value) -> MetacardResult<Self> {
        match raw {
            Value::String(s) => Ok(RawScalar::Text(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RawScalar::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(RawScalar::Float(f))
                } else {
                    Err(crate::metacard_error!(unrecognized_value, n))
                }
            }
            other => Err(crate::metacard_error!(unrecognized_value, other)),
        }
    }
}

/// 将原始JSON值转换为目标格式的属性值
///
/// 标量返回单个值；列表中的每个元素独立转换，任一元素失败则整个调用失败
pub fn coerce(raw: &Value, format: AttributeFormat) -> MetacardResult<Vec<AttributeValue>> {
    match raw {
        Value::Array(items) => items
            .iter()
            .map(|item| coerce_scalar(item, format))
            .collect(),
        other => Ok(vec![coerce_scalar(other, format)?]),
    }
}

/// 转换单个JSON标量，列表/对象/布尔/null 都会被拒绝
pub fn coerce_scalar(raw: &Value, format: AttributeFormat) -> MetacardResult<AttributeValue> {
    match RawScalar::classify(raw)? {
        RawScalar::Text(text) => from_text(text, format),
        RawScalar::Integer(i) => from_integer(i, format),
        RawScalar::Float(f) => from_float(f, format),
    }
}

fn from_text(text: &str, format: AttributeFormat) -> MetacardResult<AttributeValue> {
    let number_error = || MetacardError::NumberFormat {
        text: text.to_string(),
        format,
    };

    let value = match format {
        AttributeFormat::Boolean => AttributeValue::Boolean(text.eq_ignore_ascii_case("true")),
        AttributeFormat::Date => AttributeValue::Date(parse_date(text)?),
        AttributeFormat::Short => AttributeValue::Short(text.parse().map_err(|_| number_error())?),
        AttributeFormat::Integer => {
            AttributeValue::Integer(text.parse().map_err(|_| number_error())?)
        }
        AttributeFormat::Long => AttributeValue::Long(text.parse().map_err(|_| number_error())?),
        AttributeFormat::Float => {
            AttributeValue::Float(text.trim().parse().map_err(|_| number_error())?)
        }
        AttributeFormat::Double => {
            AttributeValue::Double(text.trim().parse().map_err(|_| number_error())?)
        }
        AttributeFormat::String => AttributeValue::String(text.to_string()),
        AttributeFormat::Geometry => AttributeValue::Geometry(text.to_string()),
        AttributeFormat::Binary => AttributeValue::Binary(text.as_bytes().to_vec()),
        AttributeFormat::Xml => AttributeValue::Xml(text.to_string()),
        AttributeFormat::Object => AttributeValue::Object(Value::String(text.to_string())),
    };
    Ok(value)
}

// 窄化转换与 `as` 语义一致：整数截断回绕，浮点转整数饱和
fn from_integer(value: i64, format: AttributeFormat) -> MetacardResult<AttributeValue> {
    match format {
        AttributeFormat::Integer => Ok(AttributeValue::Integer(value as i32)),
        AttributeFormat::Long => Ok(AttributeValue::Long(value)),
        AttributeFormat::Float => Ok(AttributeValue::Float(value as f32)),
        AttributeFormat::Double => Ok(AttributeValue::Double(value as f64)),
        AttributeFormat::Short => Ok(AttributeValue::Short(value as i16)),
        AttributeFormat::String => Ok(AttributeValue::String(value.to_string())),
        AttributeFormat::Boolean
        | AttributeFormat::Date
        | AttributeFormat::Geometry
        | AttributeFormat::Binary
        | AttributeFormat::Xml
        | AttributeFormat::Object => Err(MetacardError::UnsupportedConversion {
            value_kind: "整数".to_string(),
            value: value.to_string(),
            format,
        }),
    }
}

fn from_float(value: f64, format: AttributeFormat) -> MetacardResult<AttributeValue> {
    match format {
        AttributeFormat::Integer => Ok(AttributeValue::Integer(round_half_up(value) as i32)),
        AttributeFormat::Long => Ok(AttributeValue::Long(round_half_up(value))),
        AttributeFormat::Short => Ok(AttributeValue::Short(round_half_up(value) as i16)),
        AttributeFormat::Float => Ok(AttributeValue::Float(value as f32)),
        AttributeFormat::Double => Ok(AttributeValue::Double(value)),
        AttributeFormat::String => Ok(AttributeValue::String(format!("{:?}", value))),
        AttributeFormat::Boolean
        | AttributeFormat::Date
        | AttributeFormat::Geometry
        | AttributeFormat::Binary
        | AttributeFormat::Xml
        | AttributeFormat::Object => Err(MetacardError::UnsupportedConversion {
            value_kind: "浮点数".to_string(),
            value: format!("{:?}", value),
            format,
        }),
    }
}

/// 四舍五入，0.5 一律向正无穷方向进位：2.5 -> 3，-2.5 -> -2
///
/// NaN 得 0，超出范围时饱和到 i64 的边界
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// 按 yyyy-MM-dd'T'HH:mm:ss.SSSZ 解析日期，结果统一为UTC
pub fn parse_date(text: &str) -> MetacardResult<DateTime<Utc>> {
    if !ISO_8601_DATE_REGEX.is_match(text) {
        return Err(MetacardError::DateParse {
            text: text.to_string(),
            message: "期望格式: yyyy-MM-dd'T'HH:mm:ss.SSSZ，例如 2024-01-15T14:30:00.000+0800"
                .to_string(),
        });
    }

    DateTime::parse_from_str(text, ISO_8601_DATE_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MetacardError::DateParse {
            text: text.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_string_to_numbers() {
        assert_eq!(
            coerce(&json!("3.7"), AttributeFormat::Double).unwrap(),
            vec![AttributeValue::Double(3.7)]
        );
        assert_eq!(
            coerce(&json!("42"), AttributeFormat::Short).unwrap(),
            vec![AttributeValue::Short(42)]
        );
        assert_eq!(
            coerce(&json!("9000000000"), AttributeFormat::Long).unwrap(),
            vec![AttributeValue::Long(9_000_000_000)]
        );
        assert!(matches!(
            coerce(&json!("not-a-number"), AttributeFormat::Integer),
            Err(MetacardError::NumberFormat { format: AttributeFormat::Integer, .. })
        ));
        assert!(matches!(
            coerce(&json!("70000"), AttributeFormat::Short),
            Err(MetacardError::NumberFormat { .. })
        ));
    }

    #[test]
    fn test_float_rounding() {
        assert_eq!(
            coerce(&json!(3.7), AttributeFormat::Integer).unwrap(),
            vec![AttributeValue::Integer(4)]
        );
        assert_eq!(
            coerce(&json!(-2.5), AttributeFormat::Integer).unwrap(),
            vec![AttributeValue::Integer(-2)]
        );
        assert_eq!(
            coerce(&json!(2.5), AttributeFormat::Long).unwrap(),
            vec![AttributeValue::Long(3)]
        );
        assert_eq!(
            coerce(&json!(-3.7), AttributeFormat::Short).unwrap(),
            vec![AttributeValue::Short(-4)]
        );
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn test_integer_source() {
        assert_eq!(
            coerce(&json!(101), AttributeFormat::Integer).unwrap(),
            vec![AttributeValue::Integer(101)]
        );
        assert_eq!(
            coerce(&json!(101), AttributeFormat::Double).unwrap(),
            vec![AttributeValue::Double(101.0)]
        );
        assert_eq!(
            coerce(&json!(101), AttributeFormat::String).unwrap(),
            vec![AttributeValue::String("101".to_string())]
        );
        assert!(matches!(
            coerce(&json!(1), AttributeFormat::Boolean),
            Err(MetacardError::UnsupportedConversion { format: AttributeFormat::Boolean, .. })
        ));
        assert!(matches!(
            coerce(&json!(1.5), AttributeFormat::Date),
            Err(MetacardError::UnsupportedConversion { format: AttributeFormat::Date, .. })
        ));
    }

    #[test]
    fn test_permissive_boolean() {
        assert_eq!(
            coerce(&json!("TRUE"), AttributeFormat::Boolean).unwrap(),
            vec![AttributeValue::Boolean(true)]
        );
        assert_eq!(
            coerce(&json!("yes"), AttributeFormat::Boolean).unwrap(),
            vec![AttributeValue::Boolean(false)]
        );
    }

    #[test]
    fn test_date_parsing() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 6, 30, 0).unwrap();
        assert_eq!(
            coerce(&json!("2024-01-15T14:30:00.000+0800"), AttributeFormat::Date).unwrap(),
            vec![AttributeValue::Date(expected)]
        );
        assert!(matches!(
            coerce(&json!("2024-01-15 14:30:00"), AttributeFormat::Date),
            Err(MetacardError::DateParse { .. })
        ));
        assert!(matches!(
            coerce(&json!("2024-13-45T14:30:00.000+0000"), AttributeFormat::Date),
            Err(MetacardError::DateParse { .. })
        ));
    }

    #[test]
    fn test_list_is_all_or_nothing() {
        assert_eq!(
            coerce(&json!(["1", 2, 3.4]), AttributeFormat::Long).unwrap(),
            vec![
                AttributeValue::Long(1),
                AttributeValue::Long(2),
                AttributeValue::Long(3)
            ]
        );
        assert!(matches!(
            coerce(&json!(["1", "x"]), AttributeFormat::Long),
            Err(MetacardError::NumberFormat { .. })
        ));
        assert!(matches!(
            coerce(&json!(["1", [2]]), AttributeFormat::Long),
            Err(MetacardError::UnrecognizedValueType { .. })
        ));
    }

    #[test]
    fn test_unrecognized_value_types() {
        for raw in [json!(true), json!(null), json!({"a": 1})] {
            assert!(matches!(
                coerce(&raw, AttributeFormat::String),
                Err(MetacardError::UnrecognizedValueType { .. })
            ));
        }
    }

    #[test]
    fn test_passthrough_formats() {
        assert_eq!(
            coerce(&json!("POINT (1 2)"), AttributeFormat::Geometry).unwrap(),
            vec![AttributeValue::Geometry("POINT (1 2)".to_string())]
        );
        assert_eq!(
            coerce(&json!("<a/>"), AttributeFormat::Xml).unwrap(),
            vec![AttributeValue::Xml("<a/>".to_string())]
        );
        assert_eq!(
            coerce(&json!("ab"), AttributeFormat::Binary).unwrap(),
            vec![AttributeValue::Binary(b"ab".to_vec())]
        );
    }
}
