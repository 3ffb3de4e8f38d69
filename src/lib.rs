//! rat_metacard - 元数据卡片导入导出核心
//!
//! 提供目录元数据卡片的几个纯转换组件：
//! WKT几何到KML标记的转换、带列投影的CSV导出、以及属性JSON导入时的类型转换

// 导出所有公共模块
pub mod error;
pub mod types;
pub mod conversion;
pub mod geometry;
pub mod export;
pub mod config;
pub mod i18n;

// 重新导出常用类型和函数
pub use error::{MetacardError, MetacardResult};
pub use types::*;
pub use conversion::{coerce, coerce_scalar, parse_date, PropertyJsonReader};
pub use geometry::{
    kml_from_wkt, placemark_for_metacard, read_wkt, to_kml, Coordinate, Geometry, KmlGeometry,
    Placemark,
};
pub use export::{
    project, serialize, serialize_with_format, CsvExportTransformer, ExportColumn, ExportContent,
};
pub use config::{
    AttributeConfigItem, ExportConfig, ExportConfigBuilder, LineEnding, LogLevel, LoggingConfig,
    LoggingConfigBuilder, ProjectionConfig, ProjectionConfigBuilder, TabularFormat,
};

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化rat_metacard库
///
/// 注册多语言错误消息并按 RAT_LANG / LANG 选择语言。
/// 日志系统由调用者自行初始化，见 [`LoggingConfig::init_logger`]
pub fn init() {
    i18n::ErrorMessageI18n::init();
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
