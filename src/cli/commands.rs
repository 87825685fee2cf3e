//! # Commands Module / 命令模块
//!
//! One submodule per subcommand of the CLI.
//!
//! CLI 的每个子命令对应一个子模块。

pub mod convert;
pub mod init;
