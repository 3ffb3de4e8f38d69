//! # 配置管理模块
//!
//! 提供统一的配置管理系统，支持构建器模式和链式配置
//! 构建器中的配置项必须显式设置，不提供隐式默认值

pub mod builders;
pub mod core;

pub use builders::{ExportConfigBuilder, LoggingConfigBuilder, ProjectionConfigBuilder};
pub use self::core::{
    AttributeConfigItem, ExportConfig, LineEnding, LogLevel, LoggingConfig, ProjectionConfig,
    TabularFormat,
};
