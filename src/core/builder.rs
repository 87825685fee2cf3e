//! # Result Builder Module / 结果构建模块
//!
//! Turns accepted test cases into one of the TM4J document shapes: flat
//! executions, one test cycle result per case, or one aggregated result per
//! TM4J key carrying the ordered execution history.
//!
//! 将已接受的测试用例转换为 TM4J 文档结构之一：扁平执行列表、每个用例一个测试周期结果，
//! 或每个 TM4J 键一个带有有序执行历史的聚合结果。

use std::collections::{BTreeMap, HashMap};

use crate::core::config::{OutputFormat, RunContext};
use crate::core::extract::{CaseIdentity, TestCase};
use crate::core::models::{
    CaseRef, CaseResult, Execution, ExecutionRecord, ExecutionsEnvelope, ReducedCaseResult,
    Status, Tm4jReport, EXECUTIONS_SCHEMA_VERSION,
};
use crate::core::substitution::{resolve_fields, resolve_with, Environment};

/// A test case that passed extraction and key validation.
/// 通过提取和键验证的测试用例。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedCase {
    pub case: TestCase,
    pub identity: CaseIdentity,
    pub status: Status,
}

/// Dispatches to the builder for `format`, honoring the aggregation toggle of
/// the test cycle schema.
///
/// 根据 `format` 分派到相应的构建器，并遵循测试周期模式的聚合开关。
pub fn build_report<E: Environment + ?Sized>(
    cases: &[AcceptedCase],
    ctx: &RunContext,
    format: OutputFormat,
    env: &E,
) -> Tm4jReport {
    match format {
        OutputFormat::Executions => Tm4jReport::Executions(build_executions(cases)),
        OutputFormat::TestCycle if ctx.aggregate => Tm4jReport::Grouped(group_results(cases, ctx, env)),
        OutputFormat::TestCycle => build_case_results(cases, ctx, env),
    }
}

/// Flat mode: one execution per accepted case.
pub fn build_executions(cases: &[AcceptedCase]) -> ExecutionsEnvelope {
    let executions = cases
        .iter()
        .map(|accepted| Execution {
            source: accepted.case.name.clone(),
            result: accepted.status.execution_result().to_string(),
            test_case: CaseRef {
                key: accepted.identity.key.clone(),
            },
        })
        .collect();

    ExecutionsEnvelope {
        version: EXECUTIONS_SCHEMA_VERSION,
        executions,
    }
}

/// Per-case mode: one result per accepted case. Without a usable custom-fields
/// template the reduced schema is emitted instead.
///
/// 逐用例模式：每个已接受的用例一个结果。如果没有可用的自定义字段模板，则输出精简模式。
pub fn build_case_results<E: Environment + ?Sized>(
    cases: &[AcceptedCase],
    ctx: &RunContext,
    env: &E,
) -> Tm4jReport {
    match &ctx.custom_fields_template {
        Some(template) => Tm4jReport::CaseResults(
            cases
                .iter()
                .map(|accepted| build_case_result(accepted, ctx, env, resolve_fields(template, env)))
                .collect(),
        ),
        None => Tm4jReport::ReducedCaseResults(
            cases
                .iter()
                .map(|accepted| ReducedCaseResult {
                    status: accepted.status,
                    test_case_key: accepted.identity.key.clone(),
                    environment: resolve_with(&ctx.environment_name, env),
                    version: case_version(accepted, ctx, env),
                    actual_start_date: ctx.timestamp.clone(),
                    actual_end_date: ctx.timestamp.clone(),
                })
                .collect(),
        ),
    }
}

/// Builds the full per-case record for one accepted case.
pub fn build_case_result<E: Environment + ?Sized>(
    accepted: &AcceptedCase,
    ctx: &RunContext,
    env: &E,
    custom_fields: BTreeMap<String, String>,
) -> CaseResult {
    CaseResult {
        status: accepted.status,
        test_case_key: accepted.identity.key.clone(),
        environment: resolve_with(&ctx.environment_name, env),
        version: case_version(accepted, ctx, env),
        actual_start_date: ctx.timestamp.clone(),
        actual_end_date: ctx.timestamp.clone(),
        custom_fields,
        script_results: Vec::new(),
    }
}

/// Aggregated mode: groups cases by TM4J key in first-seen order and folds
/// each group into one result with an execution history.
///
/// Each group gets its own freshly resolved custom fields; an unusable
/// template yields an empty mapping. A group's version is its first member's
/// version; the tested versions of later members are ignored.
///
/// 聚合模式：按首次出现的顺序根据 TM4J 键对用例分组，并将每个组折叠为一个带有执行历史的结果。
/// 每个组都会获得自己重新解析的自定义字段；不可用的模板产生空映射。
pub fn group_results<E: Environment + ?Sized>(
    cases: &[AcceptedCase],
    ctx: &RunContext,
    env: &E,
) -> Vec<CaseResult> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&AcceptedCase>)> = Vec::new();

    for accepted in cases {
        let key = accepted.identity.key.as_str();
        match positions.get(key) {
            Some(&position) => groups[position].1.push(accepted),
            None => {
                positions.insert(key, groups.len());
                groups.push((key, vec![accepted]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let history: Vec<ExecutionRecord> = members
                .iter()
                .enumerate()
                .map(|(index, member)| ExecutionRecord {
                    index,
                    status: member.status,
                    comment: execution_comment(&member.case, ctx),
                })
                .collect();

            let custom_fields = ctx
                .custom_fields_template
                .as_ref()
                .map(|template| resolve_fields(template, env))
                .unwrap_or_default();

            let version = members
                .first()
                .map(|first| case_version(first, ctx, env))
                .unwrap_or_else(|| resolve_with(&ctx.reported_version, env));

            CaseResult {
                status: group_status(members.iter().map(|member| member.status)),
                test_case_key: key.to_string(),
                environment: resolve_with(&ctx.environment_name, env),
                version,
                actual_start_date: ctx.timestamp.clone(),
                actual_end_date: ctx.timestamp.clone(),
                custom_fields,
                script_results: history,
            }
        })
        .collect()
}

/// Folds member statuses: any fail fails the group, otherwise any pass passes
/// it. An empty group fails, as TM4J has no undefined status.
///
/// 折叠成员状态：任何失败都会使组失败，否则任何通过都会使组通过。空组失败，因为 TM4J 没有未定义状态。
pub fn group_status(statuses: impl IntoIterator<Item = Status>) -> Status {
    let mut group = None;
    for status in statuses {
        match status {
            Status::Fail => return Status::Fail,
            Status::Pass => group = Some(Status::Pass),
        }
    }
    group.unwrap_or(Status::Fail)
}

/// The history comment for one execution, worded from the raw result:
/// `"<name> passed."`, `"<name> failed."` or `"<name> has unknown result '<raw>'."`.
pub fn execution_comment(case: &TestCase, ctx: &RunContext) -> String {
    let verb = if case.result_raw == ctx.dialect.success_value() {
        "passed".to_string()
    } else if case.result_raw == ctx.dialect.failure_value() {
        "failed".to_string()
    } else {
        format!("has unknown result '{}'", case.result_raw)
    };
    format!("{} {}.", case.name, verb)
}

/// The identity's tested version, falling back to the run-wide version.
fn case_version<E: Environment + ?Sized>(accepted: &AcceptedCase, ctx: &RunContext, env: &E) -> String {
    match &accepted.identity.tested_version {
        Some(version) => version.clone(),
        None => resolve_with(&ctx.reported_version, env),
    }
}
