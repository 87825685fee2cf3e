//! # Configuration Module / 配置模块
//!
//! The `Tm4j.toml` settings file and the immutable [`RunContext`] snapshot the
//! engine is driven by. Settings are read once at the edge of the program;
//! the engine never sees anything but a `RunContext`.
//!
//! `Tm4j.toml` 设置文件以及驱动引擎的不可变 [`RunContext`] 快照。
//! 设置在程序边缘只读取一次；引擎只看到 `RunContext`。

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::ConvertError;
use crate::core::extract::scalar_text;
use crate::core::validate::KeyPattern;

/// The default file name of the settings file.
pub const DEFAULT_CONFIG_FILE: &str = "Tm4j.toml";

/// The default TM4J test case key pattern, e.g. `PROJ-T123`.
pub const DEFAULT_KEY_PATTERN: &str = r"^[A-Z][A-Z0-9_]*-T\d+$";

/// The NUnit report vocabulary to read.
/// 要读取的 NUnit 报告词汇。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// NUnit 3 (`test-run` root, `fullname` attribute, `Passed` marker).
    #[default]
    Nunit3,
    /// NUnit 2 (`test-results` root, `name` attribute, `Success` marker).
    Nunit2,
}

impl Dialect {
    pub fn root_tag(self) -> &'static str {
        match self {
            Dialect::Nunit3 => "test-run",
            Dialect::Nunit2 => "test-results",
        }
    }

    pub fn test_tag(self) -> &'static str {
        "test-case"
    }

    pub fn name_attribute(self) -> &'static str {
        match self {
            Dialect::Nunit3 => "fullname",
            Dialect::Nunit2 => "name",
        }
    }

    pub fn result_attribute(self) -> &'static str {
        "result"
    }

    /// The result attribute value that counts as a pass.
    pub fn success_value(self) -> &'static str {
        match self {
            Dialect::Nunit3 => "Passed",
            Dialect::Nunit2 => "Success",
        }
    }

    /// The result attribute value of a plain test failure.
    pub fn failure_value(self) -> &'static str {
        match self {
            Dialect::Nunit3 => "Failed",
            Dialect::Nunit2 => "Failure",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Nunit3 => write!(f, "nunit3"),
            Dialect::Nunit2 => write!(f, "nunit2"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nunit3" => Ok(Dialect::Nunit3),
            "nunit2" => Ok(Dialect::Nunit2),
            other => Err(format!("unknown report dialect '{other}' (expected nunit3 or nunit2)")),
        }
    }
}

/// The output document schema, chosen once per conversion.
/// 输出文档模式，每次转换选择一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Flat list of automated executions (`tm4j`).
    #[serde(rename = "tm4j")]
    Executions,
    /// Test cycle results, per case or aggregated (`tm4jtestcycle`).
    #[default]
    #[serde(rename = "tm4jtestcycle")]
    TestCycle,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Executions => write!(f, "tm4j"),
            OutputFormat::TestCycle => write!(f, "tm4jtestcycle"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tm4j" => Ok(OutputFormat::Executions),
            "tm4jtestcycle" => Ok(OutputFormat::TestCycle),
            other => Err(format!("unknown output format '{other}' (expected tm4j or tm4jtestcycle)")),
        }
    }
}

/// The settings file, loaded from TOML. Every key is optional.
/// 从 TOML 加载的设置文件。每个键都是可选的。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// The language for console messages (e.g., "en", "zh-CN").
    /// 控制台消息的语言（例如 "en", "zh-CN"）。
    pub language: String,
    /// Which document schema to emit / 要输出的文档模式
    pub format: OutputFormat,
    /// Which NUnit report vocabulary to read / 要读取的 NUnit 报告词汇
    pub dialect: Dialect,
    /// The tested software version; may be an `env:NAME` reference.
    /// 被测软件版本；可以是 `env:NAME` 引用。
    pub reported_version: String,
    /// The TM4J environment name; may be an `env:NAME` reference.
    /// TM4J 环境名称；可以是 `env:NAME` 引用。
    pub environment: String,
    /// The custom-fields template as a JSON object string. Values may be
    /// `env:NAME` references.
    /// 以 JSON 对象字符串表示的自定义字段模板。值可以是 `env:NAME` 引用。
    pub custom_fields: String,
    /// The regular expression every TM4J key must fully match.
    /// 每个 TM4J 键必须完全匹配的正则表达式。
    pub key_pattern: String,
    /// Group executions sharing a key into one result.
    /// 将共享同一键的执行分组为一个结果。
    pub aggregate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            format: OutputFormat::default(),
            dialect: Dialect::default(),
            reported_version: String::new(),
            environment: String::new(),
            custom_fields: "{}".to_string(),
            key_pattern: DEFAULT_KEY_PATTERN.to_string(),
            aggregate: false,
        }
    }
}

/// Loads settings from a TOML file.
/// 从 TOML 文件加载设置。
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
    Ok(settings)
}

/// Immutable configuration snapshot for one conversion.
/// 一次转换的不可变配置快照。
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Environment name, unresolved / 环境名称，未解析
    pub environment_name: String,
    /// Run-wide tested version, unresolved / 运行范围内的被测版本，未解析
    pub reported_version: String,
    /// The custom-fields template, or `None` if it could not be parsed.
    /// 自定义字段模板；如果无法解析则为 `None`。
    pub custom_fields_template: Option<BTreeMap<String, String>>,
    pub key_pattern: KeyPattern,
    pub aggregate: bool,
    /// The single start/end timestamp shared by every record.
    /// 所有记录共享的单一开始/结束时间戳。
    pub timestamp: String,
    pub dialect: Dialect,
}

impl RunContext {
    /// Builds a context from settings with a fixed timestamp.
    ///
    /// # Errors
    /// Fails only if the key pattern is not a valid regular expression. A
    /// malformed custom-fields template is recorded as `None`.
    pub fn new(settings: &Settings, timestamp: impl Into<String>) -> Result<Self, ConvertError> {
        let custom_fields_template = parse_custom_fields(&settings.custom_fields);
        if custom_fields_template.is_none() {
            tracing::warn!(
                template = %settings.custom_fields,
                "custom fields template is not a flat JSON object, ignoring it"
            );
        }

        Ok(Self {
            environment_name: settings.environment.clone(),
            reported_version: settings.reported_version.clone(),
            custom_fields_template,
            key_pattern: KeyPattern::new(&settings.key_pattern)?,
            aggregate: settings.aggregate,
            timestamp: timestamp.into(),
            dialect: settings.dialect,
        })
    }

    /// Builds a context stamped with the current local time.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConvertError> {
        Self::new(settings, current_timestamp())
    }
}

/// Parses a stored custom-fields template. A blank template is an empty
/// mapping. Scalar values are read as text, so `{"Build": 71}` maps `Build`
/// to `"71"`. Invalid JSON, a non-object, or a nested array or object value
/// yields `None`.
///
/// 解析存储的自定义字段模板。空白模板是空映射。标量值按文本读取，因此 `{"Build": 71}`
/// 将 `Build` 映射为 `"71"`。无效的 JSON、非对象或嵌套的数组/对象值返回 `None`。
pub fn parse_custom_fields(template: &str) -> Option<BTreeMap<String, String>> {
    if template.trim().is_empty() {
        return Some(BTreeMap::new());
    }
    let object: Map<String, Value> = serde_json::from_str(template).ok()?;
    object
        .iter()
        .map(|(name, value)| scalar_text(value).map(|text| (name.clone(), text.into_owned())))
        .collect()
}

/// Formats `time` as `yyyy-MM-ddTHH:mm:sszz00`: local date and time, the
/// signed two-digit hour offset and a literal `00`.
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    let offset_hours = time.offset().local_minus_utc() / 3600;
    format!("{}{:+03}00", time.format("%Y-%m-%dT%H:%M:%S"), offset_hours)
}

/// The current local time in the report timestamp format.
pub fn current_timestamp() -> String {
    format_timestamp(&Local::now().fixed_offset())
}
