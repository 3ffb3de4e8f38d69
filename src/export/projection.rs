//! 表格导出的属性投影
//!
//! 根据投影配置从整批元数据卡片中选出、排序并命名导出列

use rat_logger::warn;
use std::collections::HashMap;

use crate::config::ProjectionConfig;
use crate::debug_log;
use crate::types::{AttributeDescriptor, Metacard};

/// 导出列：属性描述符加可选的别名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportColumn {
    pub descriptor: AttributeDescriptor,
    pub alias: Option<String>,
}

impl ExportColumn {
    /// 表头文本：有别名用别名，否则用属性名
    pub fn header(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.descriptor.name)
    }
}

/// 收集批次中所有可导出、未被排除的属性描述符
///
/// 同名描述符以第一次出现的为准（批次顺序，其次类型内声明顺序），
/// 后出现的格式不一致时只记录警告
fn exportable_descriptors<'a>(
    batch: &'a [Metacard],
    config: &ProjectionConfig,
) -> (Vec<&'a AttributeDescriptor>, HashMap<&'a str, usize>) {
    let mut descriptors: Vec<&AttributeDescriptor> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for metacard in batch {
        for descriptor in metacard.metacard_type().descriptors() {
            if !descriptor.format.is_tabular() || config.is_excluded(&descriptor.name) {
                continue;
            }
            match by_name.get(descriptor.name.as_str()) {
                Some(&index) => {
                    let first = descriptors[index];
                    if first.format != descriptor.format {
                        warn!(
                            "属性 '{}' 在不同卡片类型中格式不一致: 保留 {}，忽略类型 '{}' 中的 {}",
                            descriptor.name,
                            first.format,
                            metacard.metacard_type().name(),
                            descriptor.format
                        );
                    }
                }
                None => {
                    by_name.insert(descriptor.name.as_str(), descriptors.len());
                    descriptors.push(descriptor);
                }
            }
        }
    }

    (descriptors, by_name)
}

/// 计算导出列
///
/// - 显式模式（配置了 attributes）：按配置顺序输出，批次中找不到的属性直接丢弃
/// - 发现模式：批次中全部可导出属性，按表头文本升序排列
///
/// 两种模式下排除项都优先，BINARY/OBJECT 格式都不会成为导出列
pub fn project(batch: &[Metacard], config: &ProjectionConfig) -> Vec<ExportColumn> {
    let (descriptors, by_name) = exportable_descriptors(batch, config);
    let aliases = config.alias_map();

    let column = |descriptor: &AttributeDescriptor| ExportColumn {
        descriptor: descriptor.clone(),
        alias: aliases.get(descriptor.name.as_str()).map(|a| a.to_string()),
    };

    if config.is_explicit() {
        let mut emitted = std::collections::HashSet::new();
        config
            .attributes()
            .iter()
            .filter(|item| emitted.insert(item.name.as_str()))
            .filter_map(|item| match by_name.get(item.name.as_str()) {
                Some(&index) => Some(column(descriptors[index])),
                None => {
                    debug_log!("配置的属性 '{}' 不在批次中或不可导出，已忽略", item.name);
                    None
                }
            })
            .collect()
    } else {
        let mut columns: Vec<ExportColumn> = descriptors.into_iter().map(column).collect();
        columns.sort_by(|a, b| a.header().cmp(b.header()));
        columns
    }
}
