//! # Markup Module / 标记模块
//!
//! An owned, read-only element tree loaded from a test-run report. Only element
//! nodes are kept; text, comments and processing instructions are dropped since
//! the converter reads nothing but tag names and attributes.
//!
//! 从测试运行报告加载的、拥有所有权的只读元素树。只保留元素节点；
//! 文本、注释和处理指令会被丢弃，因为转换器只读取标签名称和属性。

use crate::core::error::ConvertError;

/// A labeled tree node with ordered attributes and ordered children.
/// 带有有序属性和有序子节点的标记树节点。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupNode {
    /// The element's tag name / 元素的标签名称
    pub name: String,
    /// Attribute name/value pairs in document order / 按文档顺序排列的属性名/值对
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order / 按文档顺序排列的子元素
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends an attribute, builder style.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a child element, builder style.
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the value of the first attribute called `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }

    /// Parses an XML document and returns its root element as a `MarkupNode` tree.
    ///
    /// 解析 XML 文档并将其根元素作为 `MarkupNode` 树返回。
    ///
    /// # Errors / 错误
    /// Returns [`ConvertError::Xml`] if the text is not well-formed XML.
    pub fn from_xml(text: &str) -> Result<MarkupNode, ConvertError> {
        let document = roxmltree::Document::parse(text)?;
        Ok(Self::from_element(document.root_element()))
    }

    fn from_element(element: roxmltree::Node<'_, '_>) -> MarkupNode {
        MarkupNode {
            name: element.tag_name().name().to_string(),
            attributes: element
                .attributes()
                .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
                .collect(),
            children: element
                .children()
                .filter(|child| child.is_element())
                .map(Self::from_element)
                .collect(),
        }
    }
}
