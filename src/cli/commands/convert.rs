//! # Convert Command Module / 转换命令模块
//!
//! This module implements the `convert` command of the TM4J converter CLI,
//! which reads an NUnit report and writes the TM4J document.
//!
//! 此模块实现了 TM4J 转换器 CLI 的 `convert` 命令，
//! 读取 NUnit 报告并写入 TM4J 文档。

use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::{
    core::{
        config::{self, Dialect, OutputFormat, RunContext, Settings},
        engine::{convert, Conversion},
        markup::MarkupNode,
    },
    infra::{fs, t},
    reporting::{print_skipped_details, print_summary, render_report},
};

/// Values given on the command line that take precedence over the settings file.
/// 命令行中给出的、优先于设置文件的值。
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub format: Option<String>,
    pub dialect: Option<String>,
    pub environment: Option<String>,
    pub reported_version: Option<String>,
    pub key_pattern: Option<String>,
    pub custom_fields: Option<String>,
    pub aggregate: Option<bool>,
}

impl SettingsOverrides {
    /// Applies every given override to `settings`.
    ///
    /// # Errors
    /// Fails if the format or dialect is not a known name.
    pub fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(format) = &self.format {
            settings.format = format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?;
        }
        if let Some(dialect) = &self.dialect {
            settings.dialect = dialect.parse::<Dialect>().map_err(anyhow::Error::msg)?;
        }
        if let Some(environment) = &self.environment {
            settings.environment = environment.clone();
        }
        if let Some(version) = &self.reported_version {
            settings.reported_version = version.clone();
        }
        if let Some(pattern) = &self.key_pattern {
            settings.key_pattern = pattern.clone();
        }
        if let Some(custom_fields) = &self.custom_fields {
            settings.custom_fields = custom_fields.clone();
        }
        if let Some(aggregate) = self.aggregate {
            settings.aggregate = aggregate;
        }
        Ok(())
    }
}

/// Everything the `convert` command needs.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// The NUnit report to read / 要读取的 NUnit 报告
    pub input: PathBuf,
    /// Destination file; stdout when `None` / 目标文件；为 `None` 时输出到 stdout
    pub output: Option<PathBuf>,
    /// Settings file / 设置文件
    pub config: PathBuf,
    /// `true` if the settings file was named on the command line.
    /// 如果设置文件是在命令行中指定的，则为 `true`。
    pub config_explicit: bool,
    /// Language given with `--lang`, overriding the settings file.
    pub language: Option<String>,
    /// Suppress the console summary / 不打印控制台摘要
    pub quiet: bool,
    pub overrides: SettingsOverrides,
}

/// Executes the convert command with the provided options.
///
/// # Arguments
/// * `options` - The parsed command-line options
///
/// # Returns
/// A Result indicating success or failure of the command execution. Malformed
/// reports fail the command without writing any output.
pub fn execute(options: ConvertOptions) -> Result<()> {
    let mut settings = load_or_default_settings(&options.config, options.config_explicit)?;
    options.overrides.apply(&mut settings)?;

    let locale = options
        .language
        .clone()
        .unwrap_or_else(|| settings.language.clone());
    rust_i18n::set_locale(&locale);

    let conversion = convert_file(&options.input, &settings)?;
    let json = render_report(&conversion.report).context(t!("render_failed", locale = &locale).to_string())?;

    fs::write_output(options.output.as_deref(), &json)?;

    if !options.quiet {
        print_summary(&conversion, &locale);
        print_skipped_details(&conversion.skipped, &locale);
        match &options.output {
            Some(path) => eprintln!(
                "\n{}",
                t!("report_written", locale = &locale, path = path.display()).green().bold()
            ),
            None => eprintln!("\n{}", t!("report_written_stdout", locale = &locale).green().bold()),
        }
    }

    Ok(())
}

/// Reads and converts one report file with the given settings.
pub fn convert_file(input: &Path, settings: &Settings) -> Result<Conversion> {
    let input_path = fs::absolute_path(input)?;
    tracing::debug!(input = %input_path.display(), format = %settings.format, "reading test report");

    let content = fs::read_report(&input_path)?;
    let ctx = RunContext::from_settings(settings)
        .with_context(|| t!("invalid_settings", pattern = &settings.key_pattern).to_string())?;

    let root = MarkupNode::from_xml(&content)
        .with_context(|| t!("malformed_report", path = input_path.display()).to_string())?;
    let conversion = convert(&root, &ctx, settings.format)
        .with_context(|| t!("malformed_report", path = input_path.display()).to_string())?;

    Ok(conversion)
}

/// Loads the settings file. A missing file at the default location means
/// defaults; a missing file that was asked for explicitly is an error.
fn load_or_default_settings(path: &Path, explicit: bool) -> Result<Settings> {
    if !explicit && !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    config::load_settings(path)
}
