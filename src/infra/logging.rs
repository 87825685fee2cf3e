//! # Logging Module / 日志模块
//!
//! Installs the `tracing` subscriber used for diagnostics. Diagnostics go to
//! stderr so that stdout can carry the JSON document.
//!
//! 安装用于诊断的 `tracing` 订阅器。诊断信息输出到 stderr，以便 stdout 可以承载 JSON 文档。

use tracing_subscriber::EnvFilter;

/// Initializes logging. `RUST_LOG` wins when set; otherwise only warnings are
/// shown, or everything down to `debug` when `verbose` is set.
///
/// Calling this more than once is harmless.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
