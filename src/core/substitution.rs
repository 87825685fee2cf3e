//! # Field Substitution Module / 字段替换模块
//!
//! Resolves `env:NAME` indirections in configured values against an
//! environment. Values without the prefix pass through unchanged; unset or
//! empty variables resolve to the empty string.
//!
//! 根据环境解析配置值中的 `env:NAME` 间接引用。没有前缀的值原样传递；
//! 未设置或为空的变量解析为空字符串。

use std::collections::{BTreeMap, HashMap};

/// The literal prefix marking an environment variable reference.
pub const ENV_PREFIX: &str = "env:";

/// A read-only source of environment variables.
/// 环境变量的只读来源。
pub trait Environment {
    /// Returns the current value of `name`, if set.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
/// 当前运行进程的环境。
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolves `value` against the process environment.
/// 根据进程环境解析 `value`。
pub fn resolve(value: &str) -> String {
    resolve_with(value, &ProcessEnvironment)
}

/// Resolves `value` against `env`.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use tm4j_converter::core::substitution::resolve_with;
///
/// let env = HashMap::from([("BUILD".to_string(), "71".to_string())]);
/// assert_eq!(resolve_with("env:BUILD", &env), "71");
/// assert_eq!(resolve_with("env:MISSING", &env), "");
/// assert_eq!(resolve_with("plain", &env), "plain");
/// ```
pub fn resolve_with<E: Environment + ?Sized>(value: &str, env: &E) -> String {
    match value.strip_prefix(ENV_PREFIX) {
        Some(name) => env.lookup(name).unwrap_or_default(),
        None => value.to_string(),
    }
}

/// Resolves every value of a custom-fields template, keeping its keys.
pub fn resolve_fields<E: Environment + ?Sized>(
    template: &BTreeMap<String, String>,
    env: &E,
) -> BTreeMap<String, String> {
    template
        .iter()
        .map(|(key, value)| (key.clone(), resolve_with(value, env)))
        .collect()
}
