// Shared test helpers for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use tm4j_converter::core::config::{RunContext, Settings};
use tm4j_converter::core::markup::MarkupNode;

/// The timestamp every test context is frozen at.
pub const TIMESTAMP: &str = "2024-03-01T14:05:09+0100";

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Settings with a `JIRA-<n>` key pattern and everything else defaulted.
pub fn jira_settings() -> Settings {
    Settings {
        key_pattern: r"^JIRA-\d+$".to_string(),
        ..Settings::default()
    }
}

pub fn context(settings: &Settings) -> RunContext {
    RunContext::new(settings, TIMESTAMP).expect("test settings must be valid")
}

/// A NUnit 3 `test-case` node, with a `Description` property when
/// `description` is given.
pub fn test_case_node(name: &str, result: &str, description: Option<&str>) -> MarkupNode {
    let node = MarkupNode::new("test-case")
        .with_attr("fullname", name)
        .with_attr("result", result);
    match description {
        Some(value) => node.with_child(
            MarkupNode::new("properties").with_child(
                MarkupNode::new("property")
                    .with_attr("name", "Description")
                    .with_attr("value", value),
            ),
        ),
        None => node,
    }
}

/// A `test-run` root holding `cases` inside one fixture suite.
pub fn test_run(cases: Vec<MarkupNode>) -> MarkupNode {
    let suite = cases
        .into_iter()
        .fold(MarkupNode::new("test-suite").with_attr("type", "TestFixture"), |suite, case| {
            suite.with_child(case)
        });
    MarkupNode::new("test-run").with_child(suite)
}

/// An environment built from string pairs.
pub fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
