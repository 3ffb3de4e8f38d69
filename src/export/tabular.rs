//! 表格文本序列化
//!
//! 表头和数据行都交给 csv crate 写出，引号只在必要时添加（RFC4180）。
//! 单条卡片渲染失败只跳过该行，整批导出继续

use rat_logger::{debug, error};

use super::projection::ExportColumn;
use crate::config::{LineEnding, TabularFormat};
use crate::debug_log;
use crate::error::MetacardResult;
use crate::types::Metacard;

fn writer_for(format: &TabularFormat) -> csv::Writer<Vec<u8>> {
    let terminator = match format.line_ending {
        LineEnding::Crlf => csv::Terminator::CRLF,
        LineEnding::Lf => csv::Terminator::Any(b'\n'),
    };

    csv::WriterBuilder::new()
        .delimiter(format.delimiter as u8)
        .quote(format.quote as u8)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(terminator)
        .from_writer(Vec::new())
}

/// 渲染一条卡片的全部单元格，缺失值为空字符串
fn render_row(metacard: &Metacard, columns: &[ExportColumn]) -> MetacardResult<Vec<String>> {
    columns
        .iter()
        .map(|column| {
            metacard
                .cell_text(&column.descriptor)
                .map(Option::unwrap_or_default)
        })
        .collect()
}

/// 按 RFC4180 格式序列化
pub fn serialize(batch: &[Metacard], columns: &[ExportColumn]) -> MetacardResult<String> {
    serialize_with_format(batch, columns, &TabularFormat::rfc4180())
}

/// 按指定表格格式序列化
///
/// 第一行是表头，其后每条卡片一行，顺序与批次一致；没有任何列时输出为空。
/// 格式本身无效或写出失败时返回错误
pub fn serialize_with_format(
    batch: &[Metacard],
    columns: &[ExportColumn],
    format: &TabularFormat,
) -> MetacardResult<String> {
    format.validate()?;

    if columns.is_empty() {
        debug_log!("没有可导出的列，输出为空");
        return Ok(String::new());
    }

    let mut writer = writer_for(format);
    writer.write_record(columns.iter().map(ExportColumn::header))?;

    let mut skipped = 0usize;
    for (index, metacard) in batch.iter().enumerate() {
        match render_row(metacard, columns) {
            Ok(cells) => writer.write_record(&cells)?,
            Err(e) => {
                skipped += 1;
                error!(
                    "导出第{}条元数据卡片 '{}' 失败，已跳过该行: {}",
                    index,
                    metacard.id(),
                    e
                );
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::metacard_error!(serialization, format!("表格写出失败: {}", e.error())))?;

    debug!(
        "表格序列化完成: 列数={}, 行数={}, 跳过={}",
        columns.len(),
        batch.len() - skipped,
        skipped
    );

    String::from_utf8(bytes)
        .map_err(|e| crate::metacard_error!(serialization, format!("表格文本不是有效的UTF-8: {}", e)))
}
