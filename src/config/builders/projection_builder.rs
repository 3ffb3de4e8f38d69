//! # 投影配置构建器模块
//!
//! 按顺序追加列、设置别名和排除项，`build` 时一次性校验

use crate::config::core::{AttributeConfigItem, ProjectionConfig};
use crate::error::MetacardResult;
use crate::i18n::tf;
use rat_logger::info;
use std::collections::BTreeSet;

/// 投影配置构建器
#[derive(Debug)]
pub struct ProjectionConfigBuilder {
    attributes: Vec<AttributeConfigItem>,
    excluded: BTreeSet<String>,
}
impl ProjectionConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// 追加一列，列名即属性名
    ///
    /// # 参数
    ///
    /// * `name` - 属性名称
    pub fn attribute<S: Into<String>>(mut self, name: S) -> Self {
        self.attributes.push(AttributeConfigItem {
            name: name.into(),
            alias: None,
        });
        self
    }

    /// 追加一列并设置别名
    ///
    /// # 参数
    ///
    /// * `name` - 属性名称
    /// * `alias` - 列别名
    pub fn aliased_attribute<S: Into<String>, A: Into<String>>(mut self, name: S, alias: A) -> Self {
        self.attributes.push(AttributeConfigItem {
            name: name.into(),
            alias: Some(alias.into()),
        });
        self
    }

    /// 排除属性，优先级高于追加
    ///
    /// # 参数
    ///
    /// * `name` - 属性名称
    pub fn exclude<S: Into<String>>(mut self, name: S) -> Self {
        self.excluded.insert(name.into());
        self
    }

    /// 构建投影配置
    ///
    /// # 错误
    ///
    /// 任一列的属性名为空时返回错误
    pub fn build(self) -> MetacardResult<ProjectionConfig> {
        if let Some(index) = self
            .attributes
            .iter()
            .position(|item| item.name.trim().is_empty())
        {
            return Err(crate::metacard_error!(
                config,
                tf("error.config_attribute_name", &[("index", &index.to_string())])
            ));
        }

        info!(
            "创建投影配置: 列数={}, 排除数={}",
            self.attributes.len(),
            self.excluded.len()
        );

        Ok(ProjectionConfig::from_parts(self.attributes, self.excluded))
    }
}
impl Default for ProjectionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
