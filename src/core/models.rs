//! # Data Models Module / 数据模型模块
//!
//! This module defines the TM4J document shapes the converter emits, the
//! binary pass/fail status, and the bookkeeping for skipped test cases.
//!
//! 此模块定义了转换器输出的 TM4J 文档结构、二元的通过/失败状态，以及被跳过测试用例的记录。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The outcome of a test case as TM4J understands it. There is no partial
/// or inconclusive state.
/// TM4J 所理解的测试用例结果。没有部分通过或不确定的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    /// Maps a raw report result: the dialect's success marker is a pass,
    /// everything else is a fail.
    pub fn from_result(result_raw: &str, success_value: &str) -> Self {
        if result_raw == success_value {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    /// The wording used by the flat execution schema.
    pub fn execution_result(self) -> &'static str {
        match self {
            Status::Pass => "Passed",
            Status::Fail => "Failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "Pass"),
            Status::Fail => write!(f, "Fail"),
        }
    }
}

/// One execution within a grouped test case.
/// 分组测试用例中的一次执行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Zero-based position within the group / 组内从零开始的位置
    pub index: usize,
    pub status: Status,
    /// e.g. `"Suite.Should_Add failed."`
    pub comment: String,
}

/// A test cycle result for one TM4J test case.
/// 一个 TM4J 测试用例的测试周期结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub status: Status,
    pub test_case_key: String,
    pub environment: String,
    pub version: String,
    pub actual_start_date: String,
    pub actual_end_date: String,
    pub custom_fields: BTreeMap<String, String>,
    /// Execution history; empty unless the result is aggregated.
    /// 执行历史；除非结果被聚合，否则为空。
    pub script_results: Vec<ExecutionRecord>,
}

/// The reduced per-case shape used when the custom-fields template is unusable.
/// 当自定义字段模板不可用时使用的精简结构。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducedCaseResult {
    pub status: Status,
    pub test_case_key: String,
    pub environment: String,
    pub version: String,
    pub actual_start_date: String,
    pub actual_end_date: String,
}

/// The test case reference inside a flat execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRef {
    pub key: String,
}

/// One flat automated execution.
/// 一次扁平的自动化执行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// The unit test's full name / 单元测试的完整名称
    pub source: String,
    /// `"Passed"` or `"Failed"`
    pub result: String,
    #[serde(rename = "testCase")]
    pub test_case: CaseRef,
}

/// The envelope of the flat execution schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionsEnvelope {
    pub version: f64,
    pub executions: Vec<Execution>,
}

/// The version tag of the flat execution envelope.
pub const EXECUTIONS_SCHEMA_VERSION: f64 = 1.0;

/// A complete TM4J document, one variant per output schema.
/// 一个完整的 TM4J 文档，每种输出模式对应一个变体。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Tm4jReport {
    /// Flat mode / 扁平模式
    Executions(ExecutionsEnvelope),
    /// Per-case mode / 逐用例模式
    CaseResults(Vec<CaseResult>),
    /// Per-case mode with an unusable custom-fields template.
    /// 自定义字段模板不可用时的逐用例模式。
    ReducedCaseResults(Vec<ReducedCaseResult>),
    /// Aggregated mode / 聚合模式
    Grouped(Vec<CaseResult>),
}

impl Tm4jReport {
    /// The number of top-level records in the document.
    pub fn record_count(&self) -> usize {
        match self {
            Tm4jReport::Executions(envelope) => envelope.executions.len(),
            Tm4jReport::CaseResults(results) | Tm4jReport::Grouped(results) => results.len(),
            Tm4jReport::ReducedCaseResults(results) => results.len(),
        }
    }

    /// A short name of the emitted schema, for console output.
    pub fn schema_name(&self) -> &'static str {
        match self {
            Tm4jReport::Executions(_) => "executions",
            Tm4jReport::CaseResults(_) => "test-cycle",
            Tm4jReport::ReducedCaseResults(_) => "test-cycle (reduced)",
            Tm4jReport::Grouped(_) => "test-cycle (aggregated)",
        }
    }
}

/// Why a test case was left out of the document. None of these is an error.
/// 测试用例被排除在文档之外的原因。这些都不是错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// No `Description` property, or it is blank.
    MissingAnnotation,
    /// The annotation starts with `{` but is not a valid JSON object.
    MalformedAnnotation,
    /// The JSON annotation has no, or an empty, `TestCaseKey`.
    EmptyKey,
    /// The key does not match the configured pattern.
    KeyMismatch,
}

impl SkipReason {
    /// The translation key describing this reason.
    pub fn message_key(self) -> &'static str {
        match self {
            SkipReason::MissingAnnotation => "skip_reason.missing_annotation",
            SkipReason::MalformedAnnotation => "skip_reason.malformed_annotation",
            SkipReason::EmptyKey => "skip_reason.empty_key",
            SkipReason::KeyMismatch => "skip_reason.key_mismatch",
        }
    }
}

/// A test node that produced no record.
/// 未产生记录的测试节点。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCase {
    /// The unit test's full name / 单元测试的完整名称
    pub name: String,
    /// The key, when one was parsed but rejected / 已解析但被拒绝的键
    pub key: Option<String>,
    pub reason: SkipReason,
}
