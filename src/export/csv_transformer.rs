//! CSV 元数据卡片导出器
//!
//! 投影配置以不可变值持有，替换时先整体校验再原子切换，
//! 正在进行的导出始终看到一份完整的配置

use arc_swap::ArcSwap;
use rat_logger::{error, info};
use std::sync::Arc;

use super::projection::project;
use super::tabular::serialize_with_format;
use crate::config::{ExportConfig, ProjectionConfig, TabularFormat};
use crate::error::MetacardResult;
use crate::types::Metacard;

/// 导出器标识
pub const CSV_TRANSFORMER_ID: &str = "csv-metacard-transformer";

/// CSV 的 MIME 类型
pub const CSV_MIME_TYPE: &str = "text/csv";

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContent {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportContent {
    /// 以文本形式查看导出内容
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// CSV 导出器
#[derive(Debug)]
pub struct CsvExportTransformer {
    config: ArcSwap<ProjectionConfig>,
    format: TabularFormat,
}

impl CsvExportTransformer {
    /// 使用发现模式的空配置和 RFC4180 格式创建导出器
    pub fn new() -> Self {
        Self {
            config: ArcSwap::from_pointee(ProjectionConfig::default()),
            format: TabularFormat::rfc4180(),
        }
    }

    /// 从导出配置创建导出器
    pub fn from_config(config: &ExportConfig) -> MetacardResult<Self> {
        config.tabular.validate()?;
        Ok(Self {
            config: ArcSwap::from_pointee(config.projection.clone()),
            format: config.tabular,
        })
    }

    pub fn id(&self) -> &'static str {
        CSV_TRANSFORMER_ID
    }

    pub fn mime_type(&self) -> &'static str {
        CSV_MIME_TYPE
    }

    /// 当前生效的投影配置
    pub fn attribute_config(&self) -> Arc<ProjectionConfig> {
        self.config.load_full()
    }

    /// 从JSON替换投影配置
    ///
    /// 校验失败时保留原配置并返回错误
    pub fn set_attribute_config(&self, json: &str) -> MetacardResult<()> {
        match ProjectionConfig::from_json(json) {
            Ok(config) => {
                self.set_projection(config);
                Ok(())
            }
            Err(e) => {
                error!("投影配置无效，继续使用原配置: {}", e);
                Err(e)
            }
        }
    }

    /// 替换为已构造好的投影配置
    pub fn set_projection(&self, config: ProjectionConfig) {
        info!(
            "切换投影配置: 显式属性={}, 排除属性={}",
            config.attributes().len(),
            config.excluded().len()
        );
        self.config.store(Arc::new(config));
    }

    /// 导出一批元数据卡片
    pub fn transform(&self, batch: &[Metacard]) -> MetacardResult<ExportContent> {
        let config = self.config.load_full();
        let columns = project(batch, &config);
        let text = serialize_with_format(batch, &columns, &self.format)?;

        info!("CSV导出完成: 卡片数={}, 列数={}", batch.len(), columns.len());
        Ok(ExportContent {
            mime_type: CSV_MIME_TYPE,
            bytes: text.into_bytes(),
        })
    }
}

impl Default for CsvExportTransformer {
    fn default() -> Self {
        Self::new()
    }
}
