//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as reading test-run reports and writing TM4J documents.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如读取测试运行报告和写入 TM4J 文档。

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Reads a test-run report as UTF-8 text.
///
/// # Arguments
/// * `path` - Path to the report file
///
/// # Returns
/// The file content, or an error naming the path
pub fn read_report(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read test report: {}", path.display()))
}

/// Writes `content` to `path`, or to stdout when no path is given.
/// Missing parent directories are created.
///
/// # Arguments
/// * `path` - Optional destination file
/// * `content` - The document to write
///
/// # Returns
/// A `Result` indicating success or failure
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !is_directory(parent) {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write TM4J report: {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .and_then(|_| stdout.flush())
                .context("Failed to write TM4J report to stdout")
        }
    }
}

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
