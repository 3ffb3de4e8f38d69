use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::attribute_format::AttributeFormat;
use super::attribute_value::AttributeValue;
use crate::error::{MetacardError, MetacardResult};

/// 常用属性名称
pub mod names {
    /// 标识
    pub const ID: &str = "id";
    /// 标题
    pub const TITLE: &str = "title";
    /// 位置(WKT)
    pub const LOCATION: &str = "location";
    /// 生效时间
    pub const EFFECTIVE: &str = "effective";
    /// 创建时间
    pub const CREATED: &str = "created";
    /// 修改时间
    pub const MODIFIED: &str = "modified";
    /// 元数据(XML)
    pub const METADATA: &str = "metadata";
    /// 缩略图
    pub const THUMBNAIL: &str = "thumbnail";
    /// 资源地址
    pub const RESOURCE_URI: &str = "resource-uri";
    /// 标签
    pub const TAGS: &str = "metacard-tags";
    /// 来源标识，导入时单独处理
    pub const SOURCE_ID: &str = "source-id";
    /// 元数据卡片类型名，导入时用于选择类型
    pub const METACARD_TYPE: &str = "metacard-type";
}

/// 属性描述符
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// 属性名称，在同一类型内唯一
    pub name: String,
    /// 属性格式
    pub format: AttributeFormat,
    /// 是否多值
    pub multivalued: bool,
}

impl AttributeDescriptor {
    /// 创建单值属性描述符
    pub fn new(name: impl Into<String>, format: AttributeFormat) -> Self {
        Self {
            name: name.into(),
            format,
            multivalued: false,
        }
    }

    /// 设置为多值属性
    pub fn multivalued(mut self) -> Self {
        self.multivalued = true;
        self
    }
}

/// 元数据卡片类型 - 一组按声明顺序排列、名称唯一的属性描述符
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetacardType {
    name: String,
    descriptors: Vec<AttributeDescriptor>,
}

impl MetacardType {
    /// 创建类型，描述符名称重复时报错
    pub fn new(name: impl Into<String>, descriptors: Vec<AttributeDescriptor>) -> MetacardResult<Self> {
        let name = name.into();
        let mut seen = std::collections::HashSet::new();
        for descriptor in &descriptors {
            if descriptor.name.is_empty() {
                return Err(crate::metacard_error!(
                    invalid_input,
                    format!("类型 '{}' 包含名称为空的属性描述符", name)
                ));
            }
            if !seen.insert(descriptor.name.as_str()) {
                return Err(crate::metacard_error!(
                    invalid_input,
                    format!("类型 '{}' 中属性 '{}' 重复定义", name, descriptor.name)
                ));
            }
        }
        Ok(Self { name, descriptors })
    }

    /// 内置的基础类型
    pub fn basic() -> Self {
        let descriptors = vec![
            AttributeDescriptor::new(names::ID, AttributeFormat::String),
            AttributeDescriptor::new(names::TITLE, AttributeFormat::String),
            AttributeDescriptor::new(names::LOCATION, AttributeFormat::Geometry),
            AttributeDescriptor::new(names::EFFECTIVE, AttributeFormat::Date),
            AttributeDescriptor::new(names::CREATED, AttributeFormat::Date),
            AttributeDescriptor::new(names::MODIFIED, AttributeFormat::Date),
            AttributeDescriptor::new(names::METADATA, AttributeFormat::Xml),
            AttributeDescriptor::new(names::THUMBNAIL, AttributeFormat::Binary),
            AttributeDescriptor::new(names::RESOURCE_URI, AttributeFormat::String),
            AttributeDescriptor::new(names::TAGS, AttributeFormat::String).multivalued(),
        ];
        Self {
            name: "ddf.metacard".to_string(),
            descriptors,
        }
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 全部属性描述符
    pub fn descriptors(&self) -> &[AttributeDescriptor] {
        &self.descriptors
    }

    /// 按名称查找属性描述符
    pub fn descriptor(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }
}

/// 元数据卡片
#[derive(Debug, Clone, PartialEq)]
pub struct Metacard {
    id: String,
    source_id: Option<String>,
    metacard_type: Arc<MetacardType>,
    attributes: HashMap<String, Vec<AttributeValue>>,
}

impl Metacard {
    /// 创建空的元数据卡片
    pub fn new(id: impl Into<String>, metacard_type: Arc<MetacardType>) -> Self {
        Self {
            id: id.into(),
            source_id: None,
            metacard_type,
            attributes: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    pub fn set_source_id(&mut self, source_id: impl Into<String>) {
        self.source_id = Some(source_id.into());
    }

    pub fn metacard_type(&self) -> &MetacardType {
        &self.metacard_type
    }

    /// 设置属性值
    ///
    /// 与上游的元数据卡片实现一样不在写入时校验格式，
    /// 值与描述符不一致的卡片会在导出该行时被识别出来
    pub fn set_attribute(&mut self, name: impl Into<String>, values: Vec<AttributeValue>) {
        self.attributes.insert(name.into(), values);
    }

    /// 设置单个属性值
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.set_attribute(name, vec![value.into()]);
    }

    /// 获取属性的全部值
    pub fn values(&self, name: &str) -> Option<&[AttributeValue]> {
        self.attributes.get(name).map(|v| v.as_slice())
    }

    /// 获取属性的第一个值
    pub fn first_value(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name).and_then(|v| v.first())
    }

    /// 渲染某一列的单元格文本
    ///
    /// 期望格式优先取卡片自身类型中的描述符，其次取列描述符；
    /// 多值属性只输出第一个值；缺失值返回 None
    pub fn cell_text(&self, column: &AttributeDescriptor) -> MetacardResult<Option<String>> {
        let value = match self.first_value(&column.name) {
            Some(value) => value,
            None => return Ok(None),
        };

        let expected = self
            .metacard_type
            .descriptor(&column.name)
            .map(|d| d.format)
            .unwrap_or(column.format);

        if value.format() != expected {
            return Err(MetacardError::UnsupportedConversion {
                value_kind: format!("元数据卡片 '{}' 的属性 '{}'", self.id, column.name),
                value: value.to_string(),
                format: expected,
            });
        }

        Ok(Some(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_descriptor_rejected() {
        let result = MetacardType::new(
            "dup",
            vec![
                AttributeDescriptor::new("a", AttributeFormat::String),
                AttributeDescriptor::new("a", AttributeFormat::Integer),
            ],
        );
        assert!(matches!(result, Err(MetacardError::InvalidInput { .. })));
    }

    #[test]
    fn test_cell_text() {
        let ty = Arc::new(MetacardType::basic());
        let mut metacard = Metacard::new("1", ty);
        metacard.set_attribute(
            names::TAGS,
            vec![AttributeValue::from("first"), AttributeValue::from("second")],
        );
        metacard.set_value(names::TITLE, 42i32);

        let tags = AttributeDescriptor::new(names::TAGS, AttributeFormat::String).multivalued();
        assert_eq!(metacard.cell_text(&tags).unwrap(), Some("first".to_string()));

        let missing = AttributeDescriptor::new(names::RESOURCE_URI, AttributeFormat::String);
        assert_eq!(metacard.cell_text(&missing).unwrap(), None);

        let title = AttributeDescriptor::new(names::TITLE, AttributeFormat::String);
        assert!(matches!(
            metacard.cell_text(&title),
            Err(MetacardError::UnsupportedConversion { format: AttributeFormat::String, .. })
        ));
    }
}
