use serde::{Deserialize, Serialize};

/// 属性格式 - 封闭枚举，决定合法的类型转换以及是否可以导出为表格列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeFormat {
    /// 字符串
    String,
    /// 32位整数
    Integer,
    /// 64位整数
    Long,
    /// 16位整数
    Short,
    /// 单精度浮点数
    Float,
    /// 双精度浮点数
    Double,
    /// 布尔值
    Boolean,
    /// 日期时间(UTC)
    Date,
    /// 几何(WKT文本)
    Geometry,
    /// 二进制
    Binary,
    /// XML文本
    Xml,
    /// 任意对象
    Object,
}

impl AttributeFormat {
    /// 全部格式，按声明顺序
    pub const ALL: [AttributeFormat; 12] = [
        AttributeFormat::String,
        AttributeFormat::Integer,
        AttributeFormat::Long,
        AttributeFormat::Short,
        AttributeFormat::Float,
        AttributeFormat::Double,
        AttributeFormat::Boolean,
        AttributeFormat::Date,
        AttributeFormat::Geometry,
        AttributeFormat::Binary,
        AttributeFormat::Xml,
        AttributeFormat::Object,
    ];

    /// 获取格式名称
    pub fn name(&self) -> &'static str {
        match self {
            AttributeFormat::String => "STRING",
            AttributeFormat::Integer => "INTEGER",
            AttributeFormat::Long => "LONG",
            AttributeFormat::Short => "SHORT",
            AttributeFormat::Float => "FLOAT",
            AttributeFormat::Double => "DOUBLE",
            AttributeFormat::Boolean => "BOOLEAN",
            AttributeFormat::Date => "DATE",
            AttributeFormat::Geometry => "GEOMETRY",
            AttributeFormat::Binary => "BINARY",
            AttributeFormat::Xml => "XML",
            AttributeFormat::Object => "OBJECT",
        }
    }

    /// 是否可以作为表格列导出
    ///
    /// BINARY 和 OBJECT 没有可读的文本形式，不参与表格导出
    pub fn is_tabular(&self) -> bool {
        !matches!(self, AttributeFormat::Binary | AttributeFormat::Object)
    }
}

impl std::fmt::Display for AttributeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabular_formats() {
        let excluded: Vec<_> = AttributeFormat::ALL
            .iter()
            .filter(|f| !f.is_tabular())
            .collect();
        assert_eq!(excluded, vec![&AttributeFormat::Binary, &AttributeFormat::Object]);
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&AttributeFormat::Geometry).unwrap();
        assert_eq!(json, "\"GEOMETRY\"");
        let format: AttributeFormat = serde_json::from_str("\"SHORT\"").unwrap();
        assert_eq!(format, AttributeFormat::Short);
    }
}
