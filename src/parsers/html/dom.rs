use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 将 HTML 文本解析为 DOM
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// 按文档顺序查找所有指定名称的元素
pub fn find_elements(node: &Handle, element_name: &str) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    collect_elements(node, element_name, &mut found_nodes);
    found_nodes
}

fn collect_elements(node: &Handle, element_name: &str, found_nodes: &mut Vec<Handle>) {
    if get_node_name(node).is_some_and(|name| name.eq_ignore_ascii_case(element_name)) {
        found_nodes.push(node.clone());
    }

    for child_node in node.children.borrow().iter() {
        collect_elements(child_node, element_name, found_nodes);
    }
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 拼接节点下所有文本子节点的内容
pub fn get_text_content(node: &Handle) -> String {
    let mut text = String::new();
    append_text(node, &mut text);
    text
}

fn append_text(node: &Handle, text: &mut String) {
    for child_node in node.children.borrow().iter() {
        match &child_node.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            NodeData::Element { .. } => append_text(child_node, text),
            _ => {}
        }
    }
}
