//! # JSON Reporting Module / JSON 报告模块
//!
//! Serializes a [`Tm4jReport`] as indented JSON. `serde_json` renders numbers
//! independently of the system locale, so the flat envelope's version is
//! always written as `1.0`.
//!
//! 将 [`Tm4jReport`] 序列化为缩进的 JSON。`serde_json` 渲染数字时与系统区域设置无关，
//! 因此扁平信封的版本始终写为 `1.0`。

use crate::core::error::ConvertError;
use crate::core::models::Tm4jReport;

/// Renders `report` as pretty-printed JSON.
pub fn render_report(report: &Tm4jReport) -> Result<String, ConvertError> {
    Ok(serde_json::to_string_pretty(report)?)
}
