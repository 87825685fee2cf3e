//! # TM4J Converter Library / TM4J 转换器库
//!
//! This library converts NUnit test-run reports into the JSON documents TM4J
//! ingests: flat automated executions, per-case test cycle results, or test
//! cycle results aggregated per TM4J test case.
//!
//! 此库将 NUnit 测试运行报告转换为 TM4J 可导入的 JSON 文档：
//! 扁平的自动化执行列表、逐用例的测试周期结果，或按 TM4J 测试用例聚合的测试周期结果。
//!
//! ## Modules / 模块
//!
//! - `core` - Report tree model and the conversion engine
//! - `infra` - Infrastructure services like file system access and logging
//! - `reporting` - JSON rendering and the console summary
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 报告树模型和转换引擎
//! - `infra` - 基础设施服务，如文件系统访问和日志
//! - `reporting` - JSON 渲染和控制台摘要
//! - `cli` - 命令行接口和命令
//!
//! ## Example / 示例
//!
//! ```
//! use tm4j_converter::core::config::{OutputFormat, RunContext, Settings};
//! use tm4j_converter::core::convert_document;
//!
//! let xml = r#"<test-run>
//!   <test-case fullname="Suite.Should_Add" result="Passed">
//!     <properties><property name="Description" value="JIRA-12" /></properties>
//!   </test-case>
//! </test-run>"#;
//!
//! let settings = Settings { key_pattern: r"^JIRA-\d+$".to_string(), ..Settings::default() };
//! let ctx = RunContext::new(&settings, "2024-03-01T14:05:09+0100").unwrap();
//! let conversion = convert_document(xml, &ctx, OutputFormat::TestCycle).unwrap();
//! assert_eq!(conversion.report.record_count(), 1);
//! ```

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use self::core::config;
pub use self::core::engine;
pub use self::core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
