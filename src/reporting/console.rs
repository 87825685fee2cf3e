//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the conversion summary to the console. It writes to
//! stderr, because stdout may carry the TM4J document itself.
//!
//! 此模块在控制台打印转换摘要。它写入 stderr，因为 stdout 可能承载 TM4J 文档本身。

use colored::*;

use crate::core::engine::Conversion;
use crate::core::models::SkippedCase;
use crate::infra::t;

/// Prints a formatted summary of a conversion.
///
/// 打印转换的格式化摘要。
///
/// # Arguments / 参数
/// * `conversion` - The finished conversion / 完成的转换
/// * `locale` - The language locale to use for messages / 用于消息的语言区域设置
///
/// # Output Format / 输出格式
/// ```text
/// --- TM4J Conversion Summary ---
///   - Test cases scanned   :   12
///   - Cases accepted       :    9
///   - Records written      :    7  (test-cycle (aggregated))
///   - Cases skipped        :    3
/// ```
pub fn print_summary(conversion: &Conversion, locale: &str) {
    eprintln!("\n{}", t!("summary.banner", locale = locale).bold());

    let rows = [
        (t!("summary.scanned", locale = locale), conversion.scanned.to_string().normal(), String::new()),
        (t!("summary.accepted", locale = locale), conversion.accepted.to_string().green(), String::new()),
        (
            t!("summary.records", locale = locale),
            conversion.report.record_count().to_string().green(),
            format!(" ({})", conversion.report.schema_name()),
        ),
        (
            t!("summary.skipped", locale = locale),
            if conversion.skipped.is_empty() {
                "0".dimmed()
            } else {
                conversion.skipped.len().to_string().yellow()
            },
            String::new(),
        ),
    ];

    for (label, value, note) in rows {
        eprintln!("  - {:<22} : {:>4}{}", label, value, note.dimmed());
    }
}

/// Prints one line per skipped test case with the reason it was left out.
/// Returns early if nothing was skipped.
///
/// 为每个被跳过的测试用例打印一行及其被排除的原因。如果没有跳过任何内容则提前返回。
pub fn print_skipped_details(skipped: &[SkippedCase], locale: &str) {
    if skipped.is_empty() {
        return;
    }

    eprintln!("\n{}", t!("summary.skipped_banner", locale = locale).yellow().bold());
    for (i, case) in skipped.iter().enumerate() {
        let reason = t!(case.reason.message_key(), locale = locale);
        let key = case
            .key
            .as_deref()
            .map(|key| format!(" [{}]", key))
            .unwrap_or_default();
        eprintln!(
            "[{}/{}] {}{} - {}",
            i + 1,
            skipped.len(),
            case.name.cyan(),
            key.yellow(),
            reason.dimmed()
        );
    }
}
