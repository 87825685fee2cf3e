//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command of the TM4J converter CLI,
//! which creates a `Tm4j.toml` settings file, either from defaults or
//! through an interactive wizard.
//!
//! 此模块实现了 TM4J 转换器 CLI 的 `init` 命令，
//! 通过默认值或交互式向导创建 `Tm4j.toml` 设置文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::{fs, path::Path};

use crate::core::config::{OutputFormat, Settings, DEFAULT_KEY_PATTERN};
use crate::core::validate::KeyPattern;
use crate::infra::t;

/// The settings file written by `init --non-interactive`. It parses to
/// [`Settings::default`].
pub const DEFAULT_CONFIG: &str = r#"# TM4J Converter Configuration / TM4J 转换器配置
#
# Values of `environment`, `reported_version` and of every custom field may
# reference an environment variable as "env:NAME"; an unset variable resolves
# to an empty string.
# `environment`、`reported_version` 以及每个自定义字段的值都可以用 "env:NAME"
# 引用环境变量；未设置的变量解析为空字符串。

# Language for console messages / 控制台消息的语言
language = "en"

# Output schema: "tm4j" (flat executions) or "tm4jtestcycle" (test cycle results)
# 输出模式："tm4j"（扁平执行列表）或 "tm4jtestcycle"（测试周期结果）
format = "tm4jtestcycle"

# Report vocabulary: "nunit3" or "nunit2" / 报告词汇："nunit3" 或 "nunit2"
dialect = "nunit3"

# Tested software version, e.g. "env:BUILD_VERSION" / 被测软件版本
reported_version = ""

# TM4J environment name, e.g. "env:TEST_ENVIRONMENT" / TM4J 环境名称
environment = ""

# Custom fields as a JSON object, e.g. '{"Build":"env:BUILD_NUMBER"}'
# 以 JSON 对象表示的自定义字段
custom_fields = '{}'

# Every TM4J test case key must fully match this pattern
# 每个 TM4J 测试用例键必须完全匹配此模式
key_pattern = '^[A-Z][A-Z0-9_]*-T\d+$'

# Group repeated executions of one test case into a single result
# 将同一测试用例的多次执行分组为单个结果
aggregate = false
"#;

/// Creates the settings file at `path`.
///
/// In non-interactive mode the commented default file is written, and an
/// existing file is only replaced with `force`. Otherwise a wizard asks for
/// each setting and confirms before overwriting.
///
/// 在 `path` 处创建设置文件。
/// 在非交互模式下写入带注释的默认文件，只有在使用 `force` 时才会替换现有文件。
/// 否则，向导会询问每个设置，并在覆盖之前进行确认。
pub fn run_init_wizard(path: &Path, language: &str, non_interactive: bool, force: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    if non_interactive {
        if path.exists() && !force {
            eprintln!(
                "{}",
                t!("init_file_exists", locale = language, path = path.display()).red()
            );
            eprintln!("{}", t!("init_use_force", locale = language).yellow());
            return Ok(());
        }
        return write_config(path, DEFAULT_CONFIG, language);
    }

    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if path.exists() && !force {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = path.display()))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let settings = prompt_for_settings(&theme, language)?;
    let toml_string = render_settings(&settings)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    write_config(path, &toml_string, language)
}

/// Asks for each setting in turn, offering the defaults.
fn prompt_for_settings(theme: &ColorfulTheme, language: &str) -> Result<Settings> {
    let formats = [
        t!("init_format_test_cycle", locale = language).to_string(),
        t!("init_format_executions", locale = language).to_string(),
    ];
    let format = match Select::with_theme(theme)
        .with_prompt(t!("init_format_prompt", locale = language))
        .items(&formats)
        .default(0)
        .interact()?
    {
        0 => OutputFormat::TestCycle,
        _ => OutputFormat::Executions,
    };

    let environment: String = Input::with_theme(theme)
        .with_prompt(t!("init_environment_prompt", locale = language))
        .default("env:TEST_ENVIRONMENT".into())
        .interact_text()?;

    let reported_version: String = Input::with_theme(theme)
        .with_prompt(t!("init_version_prompt", locale = language))
        .default("env:BUILD_VERSION".into())
        .interact_text()?;

    let key_pattern: String = Input::with_theme(theme)
        .with_prompt(t!("init_key_pattern_prompt", locale = language))
        .default(DEFAULT_KEY_PATTERN.into())
        .validate_with(|input: &String| -> Result<(), String> {
            KeyPattern::new(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let aggregate = format == OutputFormat::TestCycle
        && Confirm::with_theme(theme)
            .with_prompt(t!("init_aggregate_prompt", locale = language))
            .default(false)
            .interact()?;

    Ok(Settings {
        language: language.to_string(),
        format,
        environment,
        reported_version,
        key_pattern,
        aggregate,
        ..Settings::default()
    })
}

/// Serializes settings to TOML with a short header.
pub fn render_settings(settings: &Settings) -> Result<String> {
    let body = toml::to_string_pretty(settings)?;
    Ok(format!("# TM4J Converter Configuration / TM4J 转换器配置\n\n{body}"))
}

fn write_config(path: &Path, content: &str, language: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init_create_parent_dir_failed", locale = language, path = parent.display()).to_string()
            })?;
        }
    }

    fs::write(path, content)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;

    eprintln!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    eprintln!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
