//! # Reporting Module / 报告模块
//!
//! This module renders the TM4J JSON document and prints a colorful,
//! localized conversion summary to the console.
//!
//! 此模块渲染 TM4J JSON 文档，并在控制台打印彩色的、本地化的转换摘要。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_skipped_details, print_summary};
pub use json::render_report;
