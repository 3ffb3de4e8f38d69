//! 元数据卡片数据模型
//!
//! 定义属性格式、强类型属性值、属性描述符、卡片类型和卡片本身

pub mod attribute_format;
pub mod attribute_value;
pub mod metacard;

// 重新导出所有公共类型
pub use attribute_format::AttributeFormat;
pub use attribute_value::AttributeValue;
pub use metacard::{AttributeDescriptor, Metacard, MetacardType, names};
