//! # 导出配置构建器模块
//!
//! 所有配置项必须显式设置

use crate::config::core::{ExportConfig, LoggingConfig, ProjectionConfig, TabularFormat};
use crate::error::MetacardResult;
use rat_logger::info;

/// 导出配置构建器
#[derive(Debug)]
pub struct ExportConfigBuilder {
    projection: Option<ProjectionConfig>,
    tabular: Option<TabularFormat>,
    logging: Option<LoggingConfig>,
}
impl ExportConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            projection: None,
            tabular: None,
            logging: None,
        }
    }

    /// 设置投影配置
    pub fn projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = Some(projection);
        self
    }

    /// 设置表格格式
    pub fn tabular(mut self, tabular: TabularFormat) -> Self {
        self.tabular = Some(tabular);
        self
    }

    /// 设置日志配置
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// 构建导出配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置，或表格格式无效，将返回错误
    pub fn build(self) -> MetacardResult<ExportConfig> {
        let projection = self
            .projection
            .ok_or_else(|| crate::metacard_error!(config, "投影配置必须设置"))?;

        let tabular = self
            .tabular
            .ok_or_else(|| crate::metacard_error!(config, "表格格式必须设置"))?;
        tabular.validate()?;

        let logging = self
            .logging
            .ok_or_else(|| crate::metacard_error!(config, "日志配置必须设置"))?;

        info!(
            "创建导出配置: 显式列数={}, 分隔符={:?}",
            projection.attributes().len(),
            tabular.delimiter
        );

        Ok(ExportConfig {
            projection,
            tabular,
            logging,
        })
    }
}
impl Default for ExportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
