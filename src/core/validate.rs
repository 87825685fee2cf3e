//! # Key Validator Module / 键验证模块
//!
//! Checks extracted TM4J test case keys against the configured pattern. The
//! match is always against the full key; partial matches are rejected.
//!
//! 根据配置的模式检查提取出的 TM4J 测试用例键。匹配总是针对完整的键；部分匹配会被拒绝。

use regex::Regex;

use crate::core::error::ConvertError;

/// A compiled, fully anchored key pattern.
/// 已编译的、完全锚定的键模式。
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compiles `pattern` so that it only matches whole keys. Anchors already
    /// present in the pattern are harmless.
    ///
    /// A verbose-mode pattern (`(?x)`) ending in a `# comment` would swallow
    /// the closing anchor, so the anchor then goes on a line of its own.
    ///
    /// 编译 `pattern`，使其只匹配完整的键。模式中已有的锚点不会产生影响。
    /// 以 `# 注释` 结尾的详细模式（`(?x)`）会吞掉结尾锚点，此时锚点放在单独的一行。
    pub fn new(pattern: &str) -> Result<Self, ConvertError> {
        let regex = match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => regex,
            Err(source) => Regex::new(pattern)
                .and_then(|_| Regex::new(&format!("^(?:{pattern}\n)$")))
                .map_err(|_| ConvertError::KeyPattern {
                    pattern: pattern.to_string(),
                    source,
                })?,
        };
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as configured, without the added anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// Returns `true` iff `key` matches `pattern` in full.
/// 当且仅当 `key` 完整匹配 `pattern` 时返回 `true`。
pub fn is_valid(key: &str, pattern: &KeyPattern) -> bool {
    pattern.is_valid(key)
}
