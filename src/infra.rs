//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the TM4J converter,
//! including file system operations, logging setup, and i18n support.
//!
//! 此模块为 TM4J 转换器提供基础设施服务，
//! 包括文件系统操作、日志设置和国际化支持。

pub mod fs;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
