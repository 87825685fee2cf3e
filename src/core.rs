//! # Core Module / 核心模块
//!
//! This module contains the conversion engine of the TM4J converter,
//! including the report tree model, case extraction, key validation,
//! environment substitution and the result builders.
//!
//! 此模块包含 TM4J 转换器的转换引擎，
//! 包括报告树模型、用例提取、键验证、环境变量替换和结果构建器。

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod markup;
pub mod models;
pub mod scanner;
pub mod substitution;
pub mod validate;

// Re-exports
pub use config::{RunContext, Settings};
pub use engine::{convert, convert_document, Conversion};
pub use error::ConvertError;
pub use markup::MarkupNode;
pub use models::Tm4jReport;
