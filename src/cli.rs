//! # CLI Module / 命令行模块
//!
//! Builds the command-line interface with localized help texts and dispatches
//! to the `convert` and `init` commands.
//!
//! 使用本地化的帮助文本构建命令行接口，并分派到 `convert` 和 `init` 命令。

pub mod commands;

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::DEFAULT_CONFIG_FILE;
use crate::infra::{logging, t};
use commands::convert::{ConvertOptions, SettingsOverrides};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn system_language() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("tm4j-converter")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli_verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("convert")
                .about(t!("cmd_convert_about", locale = locale).to_string())
                .arg(
                    Arg::new("input")
                        .help(t!("arg_input", locale = locale).to_string())
                        .value_name("REPORT")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help(t!("arg_format", locale = locale).to_string())
                        .value_name("FORMAT")
                        .value_parser(["tm4j", "tm4jtestcycle"])
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("dialect")
                        .long("dialect")
                        .help(t!("arg_dialect", locale = locale).to_string())
                        .value_name("DIALECT")
                        .value_parser(["nunit3", "nunit2"])
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("environment")
                        .short('e')
                        .long("environment")
                        .help(t!("arg_environment", locale = locale).to_string())
                        .value_name("ENVIRONMENT")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("reported-version")
                        .long("reported-version")
                        .help(t!("arg_reported_version", locale = locale).to_string())
                        .value_name("VERSION")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("key-pattern")
                        .short('k')
                        .long("key-pattern")
                        .help(t!("arg_key_pattern", locale = locale).to_string())
                        .value_name("REGEX")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("custom-fields")
                        .long("custom-fields")
                        .help(t!("arg_custom_fields", locale = locale).to_string())
                        .value_name("JSON")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("aggregate")
                        .long("aggregate")
                        .help(t!("arg_aggregate", locale = locale).to_string())
                        .action(ArgAction::SetTrue)
                        .conflicts_with("no-aggregate"),
                )
                .arg(
                    Arg::new("no-aggregate")
                        .long("no-aggregate")
                        .help(t!("arg_no_aggregate", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help(t!("arg_quiet", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help(t!("arg_init_path", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let language = explicit_language.clone().unwrap_or_else(system_language);
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();
    logging::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let options = convert_options(convert_matches, explicit_language);
            commands::convert::execute(options)?;
        }
        Some(("init", init_matches)) => {
            let path = init_matches
                .get_one::<PathBuf>("path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            let non_interactive = init_matches.get_flag("non-interactive");
            let force = init_matches.get_flag("force");

            // Show language detection message if it was auto-detected
            if explicit_language.is_none() && !non_interactive {
                eprintln!(
                    "{}",
                    t!("system_language_detected", locale = &language, lang = &language)
                );
            }
            commands::init::run_init_wizard(&path, &language, non_interactive, force)?;
        }
        _ => {
            // `subcommand_required` makes clap print help before we get here.
        }
    }
    Ok(())
}

fn convert_options(matches: &ArgMatches, language: Option<String>) -> ConvertOptions {
    let aggregate = if matches.get_flag("aggregate") {
        Some(true)
    } else if matches.get_flag("no-aggregate") {
        Some(false)
    } else {
        None
    };

    ConvertOptions {
        input: matches
            .get_one::<PathBuf>("input")
            .cloned()
            .unwrap_or_default(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        config: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        config_explicit: matches.value_source("config") == Some(ValueSource::CommandLine),
        language,
        quiet: matches.get_flag("quiet"),
        overrides: SettingsOverrides {
            format: matches.get_one::<String>("format").cloned(),
            dialect: matches.get_one::<String>("dialect").cloned(),
            environment: matches.get_one::<String>("environment").cloned(),
            reported_version: matches.get_one::<String>("reported-version").cloned(),
            key_pattern: matches.get_one::<String>("key-pattern").cloned(),
            custom_fields: matches.get_one::<String>("custom-fields").cloned(),
            aggregate,
        },
    }
}
