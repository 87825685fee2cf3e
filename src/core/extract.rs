//! # Case Extractor Module / 用例提取模块
//!
//! Pulls the identity and result attributes and the description annotation out
//! of a single `test-case` node, and parses the annotation into a TM4J key and
//! an optional tested version.
//!
//! 从单个 `test-case` 节点中提取标识和结果属性以及描述注解，
//! 并将注解解析为 TM4J 键和可选的被测版本。
//!
//! ## Annotation format / 注解格式
//!
//! - A raw key: any text not starting with `{`, e.g. `PROJ-T12`.
//! - A JSON object: `{"TestCaseKey": "PROJ-T12", "TestedAppVersion": "2.1"}`.
//!   Field names match case-insensitively and scalar values are read as text,
//!   so `{"testCaseKey": "PROJ-T12", "TestedAppVersion": 2.1}` is accepted too.

use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::core::config::Dialect;
use crate::core::error::ConvertError;
use crate::core::markup::MarkupNode;
use crate::core::models::SkipReason;

/// Tag of the block holding a test's properties.
pub const PROPERTIES_TAG: &str = "properties";
/// Tag of a single property entry.
pub const PROPERTY_TAG: &str = "property";
/// The property name reserved for the TM4J annotation.
pub const DESCRIPTION_MARKER: &str = "Description";

/// The raw data extracted from one test node.
/// 从一个测试节点中提取的原始数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// The unit test's full name / 单元测试的完整名称
    pub name: String,
    /// The result attribute as written in the report / 报告中写入的结果属性
    pub result_raw: String,
    /// The description annotation, empty if absent / 描述注解，如果不存在则为空
    pub annotation: String,
}

/// The TM4J identity parsed from an annotation.
/// 从注解中解析出的 TM4J 标识。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseIdentity {
    pub key: String,
    pub tested_version: Option<String>,
}

/// Field of a structured annotation holding the TM4J key.
pub const KEY_FIELD: &str = "TestCaseKey";
/// Field of a structured annotation holding the tested version.
pub const VERSION_FIELD: &str = "TestedAppVersion";

/// Extracts a [`TestCase`] from `node` using the dialect's attribute names.
///
/// `index` is the node's position among the scanned test nodes and only
/// serves the error message.
///
/// # Errors / 错误
/// Returns [`ConvertError::EmptyAttribute`] if the name or the result is empty.
/// This aborts the whole conversion.
pub fn extract(node: &MarkupNode, dialect: Dialect, index: usize) -> Result<TestCase, ConvertError> {
    let name = node.attr(dialect.name_attribute()).unwrap_or_default();
    let result_raw = node.attr(dialect.result_attribute()).unwrap_or_default();

    if name.is_empty() {
        return Err(ConvertError::EmptyAttribute {
            index,
            attribute: dialect.name_attribute().to_string(),
        });
    }
    if result_raw.is_empty() {
        return Err(ConvertError::EmptyAttribute {
            index,
            attribute: dialect.result_attribute().to_string(),
        });
    }

    Ok(TestCase {
        name: name.to_string(),
        result_raw: result_raw.to_string(),
        annotation: get_description(node),
    })
}

/// Returns the value of the `Description` property of `node`, or an empty
/// string if there is none.
///
/// Only the first `properties` child is consulted, and the first
/// `Description` property with a non-empty value wins.
///
/// 返回 `node` 的 `Description` 属性值，如果没有则返回空字符串。
/// 只查看第一个 `properties` 子节点，第一个值非空的 `Description` 属性胜出。
pub fn get_description(node: &MarkupNode) -> String {
    let Some(properties) = node.children.iter().find(|child| child.name == PROPERTIES_TAG) else {
        return String::new();
    };

    properties
        .children
        .iter()
        .filter(|property| property.name == PROPERTY_TAG)
        .filter(|property| property.attr("name") == Some(DESCRIPTION_MARKER))
        .filter_map(|property| property.attr("value"))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Parses an annotation into a [`CaseIdentity`].
///
/// The text is trimmed first. Text starting with `{` is decoded as a JSON
/// object; any other text is the key verbatim.
///
/// 将注解解析为 [`CaseIdentity`]。文本首先被修剪。以 `{` 开头的文本被解码为 JSON 对象；
/// 任何其他文本都原样作为键。
///
/// # Errors
/// Returns the [`SkipReason`] that excludes the case from the output.
pub fn parse_annotation(annotation: &str) -> Result<CaseIdentity, SkipReason> {
    let text = annotation.trim();
    if text.is_empty() {
        return Err(SkipReason::MissingAnnotation);
    }

    if !text.starts_with('{') {
        return Ok(CaseIdentity {
            key: text.to_string(),
            tested_version: None,
        });
    }

    let object: Map<String, Value> =
        serde_json::from_str(text).map_err(|_| SkipReason::MalformedAnnotation)?;

    let key = field_text(&object, KEY_FIELD)?.unwrap_or_default();
    if key.is_empty() {
        return Err(SkipReason::EmptyKey);
    }

    Ok(CaseIdentity {
        key,
        tested_version: field_text(&object, VERSION_FIELD)?.filter(|version| !version.is_empty()),
    })
}

/// Looks up `name` in `object`, preferring an exact match over a
/// case-insensitive one.
pub fn lookup_field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// The text of a JSON scalar: strings as they are, numbers and booleans in
/// their JSON spelling, null as the empty string. Arrays and objects have no
/// text and yield `None`.
///
/// 返回 JSON 标量的文本：字符串原样返回，数字和布尔值使用其 JSON 写法，null 为空字符串。
/// 数组和对象没有文本，返回 `None`。
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn field_text(object: &Map<String, Value>, name: &str) -> Result<Option<String>, SkipReason> {
    match lookup_field(object, name) {
        None => Ok(None),
        Some(value) => scalar_text(value)
            .map(|text| Some(text.into_owned()))
            .ok_or(SkipReason::MalformedAnnotation),
    }
}
