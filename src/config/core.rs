//! # 配置管理模块 - 核心配置类型
//!
//! 配置值在一次校验中构造完成，构造后不可变；
//! 替换配置就是整体换成一个新的、已经通过校验的值

use crate::error::{MetacardError, MetacardResult};
use crate::i18n::tf;
use rat_logger::handler::term::TermConfig;
use rat_logger::{LevelFilter, LoggerBuilder, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// 投影配置项：属性名和可选的列别名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConfigItem {
    /// 属性名称，不能为空
    pub name: String,
    /// 列别名，缺省时列名即属性名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// 投影配置的原始反序列化形式，名称允许缺失，随后统一校验
#[derive(Debug, Clone, Default, Deserialize)]
struct RawProjectionConfig {
    #[serde(default)]
    attributes: Vec<RawAttributeConfigItem>,
    #[serde(default)]
    excluded: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawAttributeConfigItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    alias: Option<String>,
}

/// 表格导出的投影配置
///
/// `attributes` 非空时为显式模式（按给定顺序输出列），为空时为发现模式（从批次中推导列）。
/// 任一配置项名称缺失或为空，整个配置被拒绝
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProjectionConfig")]
pub struct ProjectionConfig {
    attributes: Vec<AttributeConfigItem>,
    excluded: BTreeSet<String>,
}

impl TryFrom<RawProjectionConfig> for ProjectionConfig {
    type Error = MetacardError;

    fn try_from(raw: RawProjectionConfig) -> MetacardResult<Self> {
        let attributes = raw
            .attributes
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item.name {
                Some(name) if !name.trim().is_empty() => Ok(AttributeConfigItem {
                    name,
                    alias: item.alias,
                }),
                _ => Err(crate::metacard_error!(
                    config,
                    tf("error.config_attribute_name", &[("index", &index.to_string())])
                )),
            })
            .collect::<MetacardResult<Vec<_>>>()?;

        Ok(Self {
            attributes,
            excluded: raw.excluded.into_iter().collect(),
        })
    }
}

impl ProjectionConfig {
    /// 创建投影配置构建器
    pub fn builder() -> super::builders::ProjectionConfigBuilder {
        super::builders::ProjectionConfigBuilder::new()
    }

    /// 从已校验的配置项构造，由构建器调用
    pub(crate) fn from_parts(attributes: Vec<AttributeConfigItem>, excluded: BTreeSet<String>) -> Self {
        Self {
            attributes,
            excluded,
        }
    }

    /// 从JSON文本解析并校验
    ///
    /// `{"attributes": [{"name": "...", "alias": "..."}], "excluded": ["..."]}`
    pub fn from_json(json: &str) -> MetacardResult<Self> {
        let raw: Option<RawProjectionConfig> = serde_json::from_str(json).map_err(|e| {
            crate::metacard_error!(config, tf("error.config_json", &[("message", &e.to_string())]))
        })?;
        let raw = raw.ok_or_else(|| {
            crate::metacard_error!(config, tf("error.config_json", &[("message", "null")]))
        })?;
        Self::try_from(raw)
    }

    /// 从配置文件加载，扩展名为 toml 时按TOML解析，否则按JSON解析
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> MetacardResult<Self> {
        let content = std::fs::read_to_string(config_path.as_ref())?;

        let config = if is_toml(config_path.as_ref()) {
            let raw: RawProjectionConfig = toml::from_str(&content).map_err(|e| {
                crate::metacard_error!(config, tf("error.config_file", &[("message", &e.to_string())]))
            })?;
            Self::try_from(raw)?
        } else {
            Self::from_json(&content)?
        };

        info!("从文件加载投影配置: {:?}", config_path.as_ref());
        Ok(config)
    }

    /// 有序的配置项
    pub fn attributes(&self) -> &[AttributeConfigItem] {
        &self.attributes
    }

    /// 被排除的属性名
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// 属性是否被排除
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// 是否为显式模式
    pub fn is_explicit(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// 属性名 -> 别名；没有别名的配置项不出现在映射中
    ///
    /// 同名配置项重复出现时以第一次为准
    pub fn alias_map(&self) -> HashMap<&str, &str> {
        let mut aliases = HashMap::new();
        for item in &self.attributes {
            if let Some(alias) = item.alias.as_deref() {
                aliases.entry(item.name.as_str()).or_insert(alias);
            }
        }
        aliases
    }
}

/// 记录分隔符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    /// \r\n
    Crlf,
    /// \n
    Lf,
}

/// 表格文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularFormat {
    /// 字段分隔符
    pub delimiter: char,
    /// 引号字符
    pub quote: char,
    /// 记录分隔符
    pub line_ending: LineEnding,
}

impl TabularFormat {
    /// 创建并校验表格格式
    pub fn new(delimiter: char, quote: char, line_ending: LineEnding) -> MetacardResult<Self> {
        let format = Self {
            delimiter,
            quote,
            line_ending,
        };
        format.validate()?;
        Ok(format)
    }

    /// RFC4180：逗号分隔、双引号、CRLF
    pub fn rfc4180() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            line_ending: LineEnding::Crlf,
        }
    }

    /// 分隔符和引号必须是不同的单字节ASCII字符，且不能是换行符
    pub fn validate(&self) -> MetacardResult<()> {
        for (label, ch) in [("分隔符", self.delimiter), ("引号", self.quote)] {
            if !ch.is_ascii() || ch == '\r' || ch == '\n' {
                return Err(crate::metacard_error!(
                    config,
                    format!("表格{}必须是ASCII字符且不能是换行符: {:?}", label, ch)
                ));
            }
        }
        if self.delimiter == self.quote {
            return Err(crate::metacard_error!(config, "表格分隔符与引号不能相同"));
        }
        Ok(())
    }
}

impl Default for TabularFormat {
    fn default() -> Self {
        Self::rfc4180()
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
    /// 是否输出到控制台
    pub console: bool,
}

impl LoggingConfig {
    /// 创建日志配置构建器
    pub fn builder() -> super::builders::LoggingConfigBuilder {
        super::builders::LoggingConfigBuilder::new()
    }

    /// 转换为 rat_logger 的级别过滤器，供调用方初始化 LoggerBuilder
    pub fn level_filter(&self) -> LevelFilter {
        match self.level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// 按配置初始化终端日志；`console` 为 false 时不做任何事
    ///
    /// 本库不会自动初始化日志，由调用方决定是否调用
    pub fn init_logger(&self) -> MetacardResult<()> {
        if !self.console {
            return Ok(());
        }
        LoggerBuilder::new()
            .with_level(self.level_filter())
            .add_terminal_with_config(TermConfig::default())
            .init()
            .map_err(|e| crate::metacard_error!(config, format!("日志初始化失败: {}", e)))
    }
}

/// 日志级别
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 错误级别
    Error,
    /// 警告级别
    Warn,
    /// 信息级别
    Info,
    /// 调试级别
    Debug,
    /// 跟踪级别
    Trace,
}

/// 导出配置：投影、表格格式和日志
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 投影配置
    pub projection: ProjectionConfig,
    /// 表格格式
    pub tabular: TabularFormat,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl ExportConfig {
    /// 创建导出配置构建器
    pub fn builder() -> super::builders::ExportConfigBuilder {
        super::builders::ExportConfigBuilder::new()
    }

    /// 从配置文件加载配置
    ///
    /// # 参数
    ///
    /// * `config_path` - 配置文件路径，扩展名为 toml 时按TOML解析，否则按JSON解析
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> MetacardResult<Self> {
        let content = std::fs::read_to_string(config_path.as_ref())?;

        let config: ExportConfig = if is_toml(config_path.as_ref()) {
            toml::from_str(&content).map_err(|e| {
                crate::metacard_error!(config, tf("error.config_file", &[("message", &e.to_string())]))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                crate::metacard_error!(config, tf("error.config_file", &[("message", &e.to_string())]))
            })?
        };
        config.tabular.validate()?;

        info!("从文件加载导出配置: {:?}", config_path.as_ref());
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, config_path: P) -> MetacardResult<()> {
        let content = if is_toml(config_path.as_ref()) {
            toml::to_string_pretty(self).map_err(|e| {
                crate::metacard_error!(serialization, format!("序列化TOML配置失败: {}", e))
            })?
        } else {
            serde_json::to_string_pretty(self)?
        };

        std::fs::write(config_path.as_ref(), content)?;

        info!("保存导出配置到文件: {:?}", config_path.as_ref());
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}
