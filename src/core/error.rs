//! # Error Module / 错误模块
//!
//! Defines the error taxonomy of the conversion engine. Only malformed input
//! and invalid configuration abort a conversion; test cases without a usable
//! TM4J key are skipped and never surface here.
//!
//! 定义转换引擎的错误分类。只有格式错误的输入和无效的配置会中止转换；
//! 没有可用 TM4J 键的测试用例会被跳过，不会出现在这里。

use thiserror::Error;

/// Errors that abort a whole conversion. No partial document is produced.
/// 中止整个转换的错误。不会生成部分文档。
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The report's root element is not the dialect's top-level marker.
    /// 报告的根元素不是方言的顶级标记。
    #[error("invalid XML: expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    /// A matched test node carries an empty name or result attribute.
    /// 匹配的测试节点带有空的名称或结果属性。
    #[error("invalid XML: test case #{index} has an empty '{attribute}' attribute")]
    EmptyAttribute { index: usize, attribute: String },

    /// The document could not be parsed as XML at all.
    /// 文档根本无法解析为 XML。
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The configured key pattern is not a valid regular expression.
    /// 配置的键模式不是有效的正则表达式。
    #[error("invalid test case key pattern '{pattern}': {source}")]
    KeyPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to serialize TM4J report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConvertError {
    /// Returns `true` for errors caused by the input document rather than by
    /// configuration or output.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ConvertError::UnexpectedRoot { .. }
                | ConvertError::EmptyAttribute { .. }
                | ConvertError::Xml(_)
        )
    }
}
