//! 属性JSON导入
//!
//! 读取 `{"properties": {...}}` 形式的文档并按卡片类型生成 Metacard

use serde_json::Value;
use std::sync::Arc;

use super::coercion::coerce;
use crate::debug_log;
use crate::error::MetacardResult;
use crate::i18n::t;
use crate::types::{Metacard, MetacardType, names};
use rat_logger::info;

/// 属性JSON读取器
///
/// 持有默认卡片类型和已注册的卡片类型，根据文档中的 `metacard-type` 选择类型
#[derive(Debug, Clone)]
pub struct PropertyJsonReader {
    default_type: Arc<MetacardType>,
    metacard_types: Vec<Arc<MetacardType>>,
}

impl PropertyJsonReader {
    /// 创建读取器
    pub fn new(default_type: MetacardType) -> Self {
        Self {
            default_type: Arc::new(default_type),
            metacard_types: Vec::new(),
        }
    }

    /// 注册卡片类型
    pub fn add_metacard_type(&mut self, metacard_type: MetacardType) {
        info!("注册卡片类型: {}", metacard_type.name());
        self.metacard_types.push(Arc::new(metacard_type));
    }

    /// 按名称移除卡片类型
    pub fn remove_metacard_type(&mut self, name: &str) {
        self.metacard_types.retain(|t| t.name() != name);
    }

    /// 从JSON文本读取卡片
    pub fn read_str(&self, json: &str, id: Option<&str>) -> MetacardResult<Metacard> {
        let document: Value = serde_json::from_str(json)?;
        self.read(&document, id)
    }

    /// 从已解码的JSON文档读取卡片
    ///
    /// 未知属性跳过；任何属性转换失败都会使整个读取失败
    pub fn read(&self, document: &Value, id: Option<&str>) -> MetacardResult<Metacard> {
        let properties = document
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| crate::metacard_error!(invalid_input, t("error.properties_missing")))?;

        let metacard_type = self.find_metacard_type(properties.get(names::METACARD_TYPE));
        let mut metacard = Metacard::new(id.unwrap_or_default(), metacard_type.clone());

        for (attribute_name, value) in properties {
            if attribute_name == names::SOURCE_ID {
                if let Value::String(source_id) = value {
                    metacard.set_source_id(source_id.as_str());
                    continue;
                }
            }

            match metacard_type.descriptor(attribute_name) {
                Some(descriptor) => {
                    let values = coerce(value, descriptor.format)?;
                    metacard.set_attribute(attribute_name.as_str(), values);
                }
                None => {
                    debug_log!("跳过无法识别的属性: attributeName={}", attribute_name);
                }
            }
        }

        Ok(metacard)
    }

    fn find_metacard_type(&self, supplied: Option<&Value>) -> Arc<MetacardType> {
        supplied
            .and_then(Value::as_str)
            .and_then(|name| self.metacard_types.iter().find(|t| t.name() == name))
            .cloned()
            .unwrap_or_else(|| self.default_type.clone())
    }
}

impl Default for PropertyJsonReader {
    fn default() -> Self {
        Self::new(MetacardType::basic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetacardError;
    use crate::types::{AttributeDescriptor, AttributeFormat, AttributeValue};
    use serde_json::json;

    fn sensor_type() -> MetacardType {
        MetacardType::new(
            "sensor",
            vec![
                AttributeDescriptor::new("reading", AttributeFormat::Double),
                AttributeDescriptor::new("samples", AttributeFormat::Integer).multivalued(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_read_with_registered_type() {
        let mut reader = PropertyJsonReader::default();
        reader.add_metacard_type(sensor_type());

        let document = json!({
            "properties": {
                "metacard-type": "sensor",
                "source-id": "ddf.distribution",
                "reading": "3.5",
                "samples": [1, 2.6, "3"],
                "unknown": "ignored"
            }
        });

        let metacard = reader.read(&document, Some("abc")).unwrap();
        assert_eq!(metacard.id(), "abc");
        assert_eq!(metacard.metacard_type().name(), "sensor");
        assert_eq!(metacard.source_id(), Some("ddf.distribution"));
        assert_eq!(metacard.values("reading"), Some(&[AttributeValue::Double(3.5)][..]));
        assert_eq!(
            metacard.values("samples"),
            Some(
                &[
                    AttributeValue::Integer(1),
                    AttributeValue::Integer(3),
                    AttributeValue::Integer(3)
                ][..]
            )
        );
        assert!(metacard.values("unknown").is_none());
    }

    #[test]
    fn test_unknown_type_falls_back_to_default() {
        let mut reader = PropertyJsonReader::default();
        reader.add_metacard_type(sensor_type());
        reader.remove_metacard_type("sensor");

        let metacard = reader
            .read_str(r#"{"properties": {"metacard-type": "sensor", "title": "t"}}"#, None)
            .unwrap();
        assert_eq!(metacard.metacard_type().name(), MetacardType::basic().name());
        assert_eq!(metacard.first_value("title"), Some(&AttributeValue::from("t")));
    }

    #[test]
    fn test_missing_properties_rejected() {
        let reader = PropertyJsonReader::default();
        assert!(matches!(
            reader.read(&json!({"title": "t"}), None),
            Err(MetacardError::InvalidInput { .. })
        ));
        assert!(matches!(
            reader.read_str("{not json", None),
            Err(MetacardError::SerializationError { .. })
        ));
    }

    #[test]
    fn test_conversion_failure_fails_read() {
        let reader = PropertyJsonReader::default();
        let document = json!({"properties": {"effective": "yesterday"}});
        assert!(matches!(
            reader.read(&document, None),
            Err(MetacardError::DateParse { .. })
        ));
    }
}
