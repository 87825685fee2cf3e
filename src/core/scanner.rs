//! # Tree Scanner Module / 树扫描模块
//!
//! Depth-first search over a [`MarkupNode`] tree for nodes of a given tag that
//! carry a required set of attributes.
//!
//! 在 [`MarkupNode`] 树上进行深度优先搜索，查找具有给定标签并带有所需属性集的节点。

use crate::core::markup::MarkupNode;

/// Returns every descendant of `root` whose tag equals `tag_name` and whose
/// attributes include all of `required_attributes`.
///
/// The traversal is pre-order over all descendants (the root itself is not a
/// candidate): a parent comes before its children, siblings in document order.
/// An empty `required_attributes` matches every node of that tag.
///
/// 返回 `root` 的所有后代中标签等于 `tag_name` 且属性包含全部 `required_attributes` 的节点。
/// 遍历是对所有后代的前序遍历（根节点本身不是候选）：父节点在子节点之前，兄弟节点按文档顺序。
pub fn scan<'a>(
    root: &'a MarkupNode,
    tag_name: &str,
    required_attributes: &[&str],
) -> Vec<&'a MarkupNode> {
    let mut found = Vec::new();
    collect(root, tag_name, required_attributes, &mut found);
    found
}

fn collect<'a>(
    node: &'a MarkupNode,
    tag_name: &str,
    required_attributes: &[&str],
    found: &mut Vec<&'a MarkupNode>,
) {
    for child in &node.children {
        if child.name == tag_name && has_all_attributes(child, required_attributes) {
            found.push(child);
        }
        collect(child, tag_name, required_attributes, found);
    }
}

fn has_all_attributes(node: &MarkupNode, required_attributes: &[&str]) -> bool {
    required_attributes.iter().all(|name| node.has_attr(name))
}
