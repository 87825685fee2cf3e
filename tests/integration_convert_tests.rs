//! # Conversion Integration Tests / 转换集成测试
//!
//! End-to-end conversions of the NUnit fixtures under `tests/fixtures`,
//! checking the emitted JSON documents.
//!
//! 对 `tests/fixtures` 下 NUnit 样例的端到端转换，检查输出的 JSON 文档。

mod common;

use std::collections::HashMap;
use std::fs;

use serde_json::Value;
use tm4j_converter::cli::commands::convert::convert_file;
use tm4j_converter::core::config::{load_settings, Dialect, OutputFormat, Settings};
use tm4j_converter::core::engine::{convert_with_env, Conversion};
use tm4j_converter::core::error::ConvertError;
use tm4j_converter::core::markup::MarkupNode;
use tm4j_converter::core::models::{SkipReason, Status, Tm4jReport};
use tm4j_converter::reporting::render_report;

use common::{context, env_of, fixture, jira_settings, test_case_node, test_run};

fn fixture_env() -> HashMap<String, String> {
    env_of(&[
        ("TM4J_FIXTURE_VERSION", "5.0"),
        ("TM4J_FIXTURE_ENVIRONMENT", "QA"),
        ("TM4J_FIXTURE_OWNER", "carol"),
    ])
}

fn fixture_settings() -> Settings {
    load_settings(&fixture("Tm4j.toml")).unwrap()
}

fn convert_fixture(name: &str, settings: &Settings) -> Result<Conversion, ConvertError> {
    let xml = fs::read_to_string(fixture(name)).unwrap();
    let root = MarkupNode::from_xml(&xml)?;
    convert_with_env(&root, &context(settings), settings.format, &fixture_env())
}

fn to_json(conversion: &Conversion) -> Value {
    serde_json::from_str(&render_report(&conversion.report).unwrap()).unwrap()
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_single_annotated_case_per_case_mode() {
        let root = test_run(vec![test_case_node("Suite.Should_Add", "Passed", Some("JIRA-12"))]);
        let settings = Settings {
            environment: "env:ENV_NAME".to_string(),
            reported_version: "3.2".to_string(),
            ..jira_settings()
        };

        let conversion = convert_with_env(
            &root,
            &context(&settings),
            OutputFormat::TestCycle,
            &env_of(&[("ENV_NAME", "QA")]),
        )
        .unwrap();

        let json = to_json(&conversion);
        assert_eq!(
            json,
            serde_json::json!([{
                "status": "Pass",
                "testCaseKey": "JIRA-12",
                "environment": "QA",
                "version": "3.2",
                "actualStartDate": common::TIMESTAMP,
                "actualEndDate": common::TIMESTAMP,
                "customFields": {},
                "scriptResults": []
            }])
        );
    }

    #[test]
    fn test_repeated_key_aggregates_into_one_result() {
        let root = test_run(vec![
            test_case_node("Suite.Should_Add(1)", "Passed", Some("JIRA-3")),
            test_case_node("Suite.Should_Add(2)", "Failed", Some("JIRA-3")),
        ]);
        let settings = Settings {
            aggregate: true,
            ..jira_settings()
        };

        let conversion =
            convert_with_env(&root, &context(&settings), OutputFormat::TestCycle, &env_of(&[])).unwrap();

        let json = to_json(&conversion);
        let results = json.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["testCaseKey"], "JIRA-3");
        assert_eq!(results[0]["status"], "Fail");
        assert_eq!(
            results[0]["scriptResults"],
            serde_json::json!([
                { "index": 0, "status": "Pass", "comment": "Suite.Should_Add(1) passed." },
                { "index": 1, "status": "Fail", "comment": "Suite.Should_Add(2) failed." }
            ])
        );
    }

    #[test]
    fn test_unannotated_case_is_skipped() {
        let root = test_run(vec![
            test_case_node("Suite.Untracked", "Passed", None),
            test_case_node("Suite.Tracked", "Passed", Some("JIRA-1")),
        ]);

        let conversion = convert_with_env(
            &root,
            &context(&jira_settings()),
            OutputFormat::TestCycle,
            &env_of(&[]),
        )
        .unwrap();

        assert_eq!(conversion.scanned, 2);
        assert_eq!(conversion.accepted, 1);
        assert_eq!(conversion.skipped.len(), 1);
        assert_eq!(conversion.skipped[0].name, "Suite.Untracked");
        assert_eq!(conversion.skipped[0].reason, SkipReason::MissingAnnotation);
    }

    #[test]
    fn test_key_outside_the_pattern_is_skipped() {
        let root = test_run(vec![test_case_node("Suite.Should_Add", "Passed", Some("ABC-1"))]);

        let conversion = convert_with_env(
            &root,
            &context(&jira_settings()),
            OutputFormat::TestCycle,
            &env_of(&[]),
        )
        .unwrap();

        assert_eq!(conversion.report.record_count(), 0);
        assert_eq!(conversion.skipped[0].key.as_deref(), Some("ABC-1"));
        assert_eq!(conversion.skipped[0].reason, SkipReason::KeyMismatch);
        assert_eq!(render_report(&conversion.report).unwrap(), "[]");
    }

    #[test]
    fn test_structured_annotation_version_wins() {
        let root = test_run(vec![test_case_node(
            "Suite.Should_Add",
            "Passed",
            Some(r#"{"TestCaseKey":"JIRA-4","TestedAppVersion":"2.1"}"#),
        )]);
        let settings = Settings {
            reported_version: "9.9".to_string(),
            ..jira_settings()
        };

        let conversion =
            convert_with_env(&root, &context(&settings), OutputFormat::TestCycle, &env_of(&[])).unwrap();

        let json = to_json(&conversion);
        assert_eq!(json[0]["testCaseKey"], "JIRA-4");
        assert_eq!(json[0]["version"], "2.1");
    }

    #[test]
    fn test_skips_do_not_stop_later_cases() {
        let root = test_run(vec![
            test_case_node("Suite.A", "Passed", Some("JIRA-1")),
            test_case_node("Suite.B", "Passed", Some(r#"{"TestCaseKey":"JIRA-2""#)),
            test_case_node("Suite.C", "Passed", Some(r#"{"TestedAppVersion":"1"}"#)),
            test_case_node("Suite.D", "Failed", Some("JIRA-4")),
        ]);

        let conversion = convert_with_env(
            &root,
            &context(&jira_settings()),
            OutputFormat::Executions,
            &env_of(&[]),
        )
        .unwrap();

        let reasons: Vec<_> = conversion.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(reasons, vec![SkipReason::MalformedAnnotation, SkipReason::EmptyKey]);
        let json = to_json(&conversion);
        let sources: Vec<_> = json["executions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["source"].as_str().unwrap())
            .collect();
        assert_eq!(sources, vec!["Suite.A", "Suite.D"]);
    }

    #[test]
    fn test_empty_run_produces_empty_documents() {
        let root = MarkupNode::new("test-run");
        let ctx = context(&jira_settings());

        let cycle = convert_with_env(&root, &ctx, OutputFormat::TestCycle, &env_of(&[])).unwrap();
        let flat = convert_with_env(&root, &ctx, OutputFormat::Executions, &env_of(&[])).unwrap();

        assert_eq!(cycle.scanned, 0);
        assert_eq!(to_json(&cycle), serde_json::json!([]));
        assert_eq!(to_json(&flat), serde_json::json!({ "version": 1.0, "executions": [] }));
    }
}

#[cfg(test)]
mod fixture_tests {
    use super::*;

    #[test]
    fn test_nunit3_fixture_aggregated() {
        let conversion = convert_fixture("nunit3_mixed.xml", &fixture_settings()).unwrap();

        assert_eq!(conversion.scanned, 7);
        assert_eq!(conversion.accepted, 5);
        assert_eq!(conversion.skipped.len(), 2);
        assert_eq!(conversion.skipped[0].reason, SkipReason::MissingAnnotation);
        assert_eq!(conversion.skipped[1].reason, SkipReason::KeyMismatch);
        assert_eq!(conversion.skipped[1].key.as_deref(), Some("not-a-key"));

        let Tm4jReport::Grouped(results) = &conversion.report else {
            panic!("Expected an aggregated report");
        };
        let keys: Vec<_> = results.iter().map(|r| r.test_case_key.as_str()).collect();
        assert_eq!(keys, vec!["CALC-T1", "CALC-T2", "CALC-T3"]);

        let first = &results[0];
        assert_eq!(first.status, Status::Fail);
        assert_eq!(first.environment, "QA");
        assert_eq!(first.version, "5.0");
        assert_eq!(first.custom_fields["Owner"], "carol");
        assert_eq!(first.custom_fields["Team"], "Core");
        let comments: Vec<_> = first.script_results.iter().map(|r| r.comment.as_str()).collect();
        assert_eq!(
            comments,
            vec![
                "Calc.Tests.CalculatorTests.Should_Add passed.",
                "Calc.Tests.CalculatorTests.Should_Add_Many(1,2) passed.",
                "Calc.Tests.CalculatorTests.Should_Add_Many(-1,-2) failed.",
            ]
        );

        assert_eq!(results[1].status, Status::Fail);
        assert_eq!(results[1].version, "2.1.0");

        assert_eq!(results[2].status, Status::Fail);
        assert_eq!(
            results[2].script_results[0].comment,
            "Calc.Tests.CalculatorTests.Not_Ready has unknown result 'Skipped'."
        );

        let history: usize = results.iter().map(|r| r.script_results.len()).sum();
        assert_eq!(history, conversion.accepted);
    }

    #[test]
    fn test_nunit3_fixture_flat() {
        let settings = Settings {
            format: OutputFormat::Executions,
            ..fixture_settings()
        };

        let conversion = convert_fixture("nunit3_mixed.xml", &settings).unwrap();

        let json = to_json(&conversion);
        assert_eq!(json["version"], 1.0);
        let executions = json["executions"].as_array().unwrap();
        assert_eq!(executions.len(), 5);
        assert_eq!(
            executions[1],
            serde_json::json!({
                "source": "Calc.Tests.CalculatorTests.Should_Subtract",
                "result": "Failed",
                "testCase": { "key": "CALC-T2" }
            })
        );
    }

    #[test]
    fn test_nunit2_fixture_per_case() {
        let settings = Settings {
            dialect: Dialect::Nunit2,
            aggregate: false,
            ..fixture_settings()
        };

        let conversion = convert_fixture("nunit2_results.xml", &settings).unwrap();

        assert_eq!(conversion.scanned, 3);
        assert_eq!(conversion.accepted, 2);
        let json = to_json(&conversion);
        assert_eq!(json[0]["testCaseKey"], "CALC-T1");
        assert_eq!(json[0]["status"], "Pass");
        assert_eq!(json[1]["testCaseKey"], "CALC-T4");
        assert_eq!(json[1]["status"], "Fail");
        assert_eq!(json[1]["scriptResults"], serde_json::json!([]));
    }

    #[test]
    fn test_malformed_template_emits_reduced_schema() {
        let settings = Settings {
            custom_fields: "{broken".to_string(),
            aggregate: false,
            ..fixture_settings()
        };

        let conversion = convert_fixture("nunit3_mixed.xml", &settings).unwrap();

        assert!(matches!(conversion.report, Tm4jReport::ReducedCaseResults(_)));
        let json = to_json(&conversion);
        let record = json[0].as_object().unwrap();
        assert_eq!(record.len(), 6);
        assert!(!record.contains_key("customFields"));
        assert!(!record.contains_key("scriptResults"));
    }

    #[test]
    fn test_field_order_in_rendered_document() {
        let conversion = convert_fixture("nunit3_mixed.xml", &fixture_settings()).unwrap();
        let rendered = render_report(&conversion.report).unwrap();

        let order = [
            "\"status\"",
            "\"testCaseKey\"",
            "\"environment\"",
            "\"version\"",
            "\"actualStartDate\"",
            "\"actualEndDate\"",
            "\"customFields\"",
            "\"scriptResults\"",
        ];
        let positions: Vec<_> = order.iter().map(|field| rendered.find(field).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_conversion_is_repeatable() {
        let settings = fixture_settings();

        let first = convert_fixture("nunit3_mixed.xml", &settings).unwrap();
        let second = convert_fixture("nunit3_mixed.xml", &settings).unwrap();

        assert_eq!(
            render_report(&first.report).unwrap(),
            render_report(&second.report).unwrap()
        );
    }

    #[test]
    fn test_convert_file_reads_from_disk() {
        let conversion = convert_file(&fixture("nunit3_mixed.xml"), &fixture_settings()).unwrap();

        assert_eq!(conversion.scanned, 7);
        assert_eq!(conversion.report.record_count(), 3);
    }
}
