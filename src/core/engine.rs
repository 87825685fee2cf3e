//! # Conversion Engine Module / 转换引擎模块
//!
//! The single-pass pipeline: scan the report for test nodes, extract each
//! case, parse and validate its TM4J key, then hand the accepted cases to the
//! result builder.
//!
//! 单遍处理管道：扫描报告中的测试节点，提取每个用例，解析并验证其 TM4J 键，
//! 然后将已接受的用例交给结果构建器。

use crate::core::builder::{build_report, AcceptedCase};
use crate::core::config::{OutputFormat, RunContext};
use crate::core::error::ConvertError;
use crate::core::extract::{extract, parse_annotation};
use crate::core::markup::MarkupNode;
use crate::core::models::{SkipReason, SkippedCase, Status, Tm4jReport};
use crate::core::scanner::scan;
use crate::core::substitution::{Environment, ProcessEnvironment};

/// The outcome of one conversion.
/// 一次转换的结果。
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The TM4J document / TM4J 文档
    pub report: Tm4jReport,
    /// Number of test nodes found by the scanner / 扫描器找到的测试节点数量
    pub scanned: usize,
    /// Number of cases that passed key validation / 通过键验证的用例数量
    pub accepted: usize,
    /// Test nodes left out of the document / 被排除在文档之外的测试节点
    pub skipped: Vec<SkippedCase>,
}

/// Parses `xml` and converts it against the process environment.
pub fn convert_document(
    xml: &str,
    ctx: &RunContext,
    format: OutputFormat,
) -> Result<Conversion, ConvertError> {
    let root = MarkupNode::from_xml(xml)?;
    convert(&root, ctx, format)
}

/// Converts a report tree against the process environment.
/// 根据进程环境转换报告树。
pub fn convert(root: &MarkupNode, ctx: &RunContext, format: OutputFormat) -> Result<Conversion, ConvertError> {
    convert_with_env(root, ctx, format, &ProcessEnvironment)
}

/// Converts a report tree, resolving `env:` references against `env`.
///
/// # Errors / 错误
/// Fails with a malformed-input error if the root is not the dialect's
/// top-level element or a test node has an empty name or result. Nothing is
/// produced in that case.
///
/// 如果根元素不是方言的顶级元素，或测试节点的名称或结果为空，则以格式错误的输入错误失败。
/// 这种情况下不会产生任何输出。
pub fn convert_with_env<E: Environment + ?Sized>(
    root: &MarkupNode,
    ctx: &RunContext,
    format: OutputFormat,
    env: &E,
) -> Result<Conversion, ConvertError> {
    let (accepted, skipped, scanned) = collect_cases(root, ctx)?;

    let report = build_report(&accepted, ctx, format, env);
    tracing::info!(
        scanned,
        accepted = accepted.len(),
        skipped = skipped.len(),
        records = report.record_count(),
        format = %format,
        "converted test run"
    );

    Ok(Conversion {
        report,
        scanned,
        accepted: accepted.len(),
        skipped,
    })
}

/// Scans, extracts and validates every test node of `root`.
///
/// Returns the accepted cases in document order, the skipped ones, and the
/// number of scanned test nodes.
pub fn collect_cases(
    root: &MarkupNode,
    ctx: &RunContext,
) -> Result<(Vec<AcceptedCase>, Vec<SkippedCase>, usize), ConvertError> {
    let dialect = ctx.dialect;
    if root.name != dialect.root_tag() {
        return Err(ConvertError::UnexpectedRoot {
            expected: dialect.root_tag().to_string(),
            found: root.name.clone(),
        });
    }

    let required = [dialect.name_attribute(), dialect.result_attribute()];
    let test_nodes = scan(root, dialect.test_tag(), &required);

    let mut accepted = Vec::new();
    let mut skipped = Vec::new();

    for (index, node) in test_nodes.iter().enumerate() {
        let case = extract(node, dialect, index)?;

        let identity = match parse_annotation(&case.annotation) {
            Ok(identity) => identity,
            Err(reason) => {
                tracing::debug!(test = %case.name, ?reason, "skipping test case");
                skipped.push(SkippedCase {
                    name: case.name,
                    key: None,
                    reason,
                });
                continue;
            }
        };

        if !ctx.key_pattern.is_valid(&identity.key) {
            tracing::debug!(
                test = %case.name,
                key = %identity.key,
                pattern = ctx.key_pattern.as_str(),
                "skipping test case with a key outside the pattern"
            );
            skipped.push(SkippedCase {
                name: case.name,
                key: Some(identity.key),
                reason: SkipReason::KeyMismatch,
            });
            continue;
        }

        let status = Status::from_result(&case.result_raw, dialect.success_value());
        accepted.push(AcceptedCase {
            case,
            identity,
            status,
        });
    }

    Ok((accepted, skipped, test_nodes.len()))
}
