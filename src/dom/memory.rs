//! # 内存文档
//!
//! `Dom` trait 的纯 Rust 实现：所有节点存放在一个 `Vec` arena 中，
//! 以 `NodeId` 下标互相引用。不依赖浏览器即可完整运行渲染流程，
//! 测试通过 `click()` 模拟用户点击、通过 `to_html()` 检查渲染结果。
//!
//! 节点一经创建不会从 arena 中删除；`remove_children` 只是断开父子关系，
//! 被移除节点的句柄（如 `RefreshReport::removed`）之后仍可读取。
//! 因此 arena 随渲染次数单调增长：`MemoryDom` 用于测试和短生命周期的宿主
//! （一次性渲染、快照导出），长期运行的页面应使用浏览器后端。

use super::{ClickHandler, Dom};

/// 内存文档中的节点句柄
///
/// 只能在创建它的 `MemoryDom` 上使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// 点击监听器句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Debug)]
enum NodeKind {
    Document,
    Fragment,
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
struct ElementData {
    tag: String,
    /// 除 class 以外的属性，保持设置顺序
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    disabled: bool,
    listeners: Vec<(ListenerId, ClickHandler<MemoryDom>)>,
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// 基于 arena 的内存文档
///
/// 新建时包含 `document` 根节点和挂在其下的 `<body>`。
#[derive(Debug)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    document: NodeId,
    body: NodeId,
    next_listener: u64,
}

impl MemoryDom {
    /// 创建只包含 `<body>` 的空文档
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            document: NodeId(0),
            body: NodeId(0),
            next_listener: 0,
        };
        let body = dom.create_element("body");
        let document = dom.document;
        dom.append_child(&document, &body);
        dom.body = body;
        dom
    }

    /// 文档的 `<body>` 元素，宿主在其下搭建页面骨架
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// 模拟一次点击：依次调用该节点上绑定的全部处理器
    ///
    /// # 返回值
    /// 实际触发的处理器数量
    pub fn click(&mut self, node: NodeId) -> usize {
        let handlers: Vec<ClickHandler<Self>> = match &self.node(node).kind {
            NodeKind::Element(data) => data.listeners.iter().map(|(_, h)| *h).collect(),
            _ => Vec::new(),
        };
        for handler in &handlers {
            handler(self, &node);
        }
        handlers.len()
    }

    /// 节点是否处于禁用状态
    pub fn is_disabled(&self, node: NodeId) -> bool {
        match &self.node(node).kind {
            NodeKind::Element(data) => data.disabled,
            _ => false,
        }
    }

    /// 节点上当前绑定的点击处理器数量
    pub fn listener_count(&self, node: NodeId) -> usize {
        match &self.node(node).kind {
            NodeKind::Element(data) => data.listeners.len(),
            _ => 0,
        }
    }

    /// 元素标签名；非元素节点返回 `None`
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element(data) => Some(data.tag.as_str()),
            _ => None,
        }
    }

    /// 直接子节点列表
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// 将节点序列化为 HTML 字符串（用于调试和断言）
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Document | NodeKind::Fragment => {
                for child in &node.children {
                    self.write_html(*child, out);
                }
            }
            NodeKind::Element(data) => {
                out.push('<');
                out.push_str(&data.tag);
                if !data.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", data.classes.join(" ")));
                }
                for (name, value) in &data.attrs {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
                if data.disabled {
                    out.push_str(" disabled");
                }
                out.push('>');
                for child in &node.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", data.tag));
            }
        }
    }

    // ======== 内部辅助方法 ========

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id).kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id).kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node_mut(child).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != child);
        }
    }

    /// `ancestor` 是否为 `node` 自身或其祖先
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).parent;
        }
        false
    }

    /// `root` 的全部后代（先序遍历，不含 `root` 自身）
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn find_element(&self, predicate: impl Fn(&ElementData) -> bool) -> Option<NodeId> {
        self.descendants(self.document)
            .into_iter()
            .find(|id| self.element(*id).is_some_and(&predicate))
    }

    fn element_attribute<'a>(data: &'a ElementData, name: &str) -> Option<&'a str> {
        data.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;
    type Listener = ListenerId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            disabled: false,
            listeners: Vec::new(),
        }))
    }

    fn create_fragment(&mut self) -> NodeId {
        self.push_node(NodeKind::Fragment)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        let (parent, child) = (*parent, *child);
        // 不能把节点挂到自己或自己的后代下面
        if self.is_inclusive_ancestor(child, parent) {
            log::warn!("忽略非法的 append_child: {:?} -> {:?}", child, parent);
            return;
        }

        if matches!(self.node(child).kind, NodeKind::Fragment) {
            let moved = std::mem::take(&mut self.node_mut(child).children);
            for grandchild in moved {
                self.node_mut(grandchild).parent = Some(parent);
                self.node_mut(parent).children.push(grandchild);
            }
            return;
        }

        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn remove_children(&mut self, parent: &NodeId) -> usize {
        let removed = std::mem::take(&mut self.node_mut(*parent).children);
        for child in &removed {
            self.node_mut(*child).parent = None;
        }
        removed.len()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let NodeKind::Text(current) = &mut self.node_mut(*node).kind {
            *current = text.to_string();
            return;
        }
        self.remove_children(node);
        if !text.is_empty() {
            let text_node = self.push_node(NodeKind::Text(text.to_string()));
            self.append_child(node, &text_node);
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        if let NodeKind::Text(text) = &self.node(*node).kind {
            return text.clone();
        }
        self.descendants(*node)
            .into_iter()
            .filter_map(|id| match &self.node(id).kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let Some(data) = self.element_mut(*node) else {
            return;
        };
        if name == "class" {
            data.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        match data.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, current)) => *current = value.to_string(),
            None => data.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let data = self.element(*node)?;
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        Self::element_attribute(data, name).map(str::to_string)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(data) = self.element_mut(*node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn toggle_class(&mut self, node: &NodeId, class: &str) -> bool {
        let Some(data) = self.element_mut(*node) else {
            return false;
        };
        if let Some(pos) = data.classes.iter().position(|c| c == class) {
            data.classes.remove(pos);
            false
        } else {
            data.classes.push(class.to_string());
            true
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(*node)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) {
        if let Some(data) = self.element_mut(*node) {
            data.disabled = disabled;
        }
    }

    fn query_all(&self, root: &NodeId, tag: &str, attr: &str) -> Vec<NodeId> {
        self.descendants(*root)
            .into_iter()
            .filter(|id| {
                self.element(*id).is_some_and(|data| {
                    data.tag == tag && Self::element_attribute(data, attr).is_some()
                })
            })
            .collect()
    }

    fn find_in_document(&self, tag: &str, attr: &str, value: &str) -> Option<NodeId> {
        self.find_element(|data| {
            data.tag == tag && Self::element_attribute(data, attr) == Some(value)
        })
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element(|data| Self::element_attribute(data, "id") == Some(id))
    }

    fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_element(|data| data.tag == tag)
    }

    fn add_click_listener(&mut self, node: &NodeId, handler: ClickHandler<Self>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        if let Some(data) = self.element_mut(*node) {
            data.listeners.push((id, handler));
        }
        id
    }

    fn remove_click_listener(&mut self, node: &NodeId, listener: ListenerId) {
        if let Some(data) = self.element_mut(*node) {
            data.listeners.retain(|(id, _)| *id != listener);
        }
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark_clicked(dom: &mut MemoryDom, node: &NodeId) {
        dom.toggle_class(node, "clicked");
    }

    #[test]
    fn test_new_document_has_body() {
        let dom = MemoryDom::new();
        assert_eq!(dom.first_by_tag("body"), Some(dom.body()));
        assert_eq!(dom.to_html(dom.body()), "<body></body>");
    }

    #[test]
    fn test_removed_nodes_stay_addressable() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let button = dom.create_element("button");
        dom.set_attribute(&button, "data-post-id", "1");
        dom.set_text(&button, "Show Comments");
        dom.append_child(&body, &button);

        assert_eq!(dom.remove_children(&body), 1);
        let replacement = dom.create_element("p");
        dom.append_child(&body, &replacement);

        // 旧句柄不会被新节点复用
        assert_ne!(button, replacement);
        assert_eq!(dom.text_content(&button), "Show Comments");
        assert_eq!(dom.attribute(&button, "data-post-id").as_deref(), Some("1"));
        assert_eq!(dom.find_in_document("button", "data-post-id", "1"), None);
    }

    #[test]
    fn test_append_fragment_moves_children() {
        let mut dom = MemoryDom::new();
        let fragment = dom.create_fragment();
        let a = dom.create_element("p");
        let b = dom.create_element("p");
        dom.append_child(&fragment, &a);
        dom.append_child(&fragment, &b);

        let body = dom.body();
        dom.append_child(&body, &fragment);

        assert_eq!(dom.children(body), &[a, b]);
        assert!(dom.children(fragment).is_empty());
    }

    #[test]
    fn test_append_reparents_node() {
        let mut dom = MemoryDom::new();
        let first = dom.create_element("div");
        let second = dom.create_element("div");
        let child = dom.create_element("span");
        dom.append_child(&first, &child);
        dom.append_child(&second, &child);
        assert!(dom.children(first).is_empty());
        assert_eq!(dom.children(second), &[child]);
    }

    #[test]
    fn test_append_into_own_descendant_is_ignored() {
        let mut dom = MemoryDom::new();
        let outer = dom.create_element("div");
        let inner = dom.create_element("div");
        dom.append_child(&outer, &inner);
        dom.append_child(&inner, &outer);
        assert_eq!(dom.children(outer), &[inner]);
        assert!(dom.children(inner).is_empty());
    }

    #[test]
    fn test_set_text_replaces_children() {
        let mut dom = MemoryDom::new();
        let p = dom.create_element("p");
        let span = dom.create_element("span");
        dom.append_child(&p, &span);
        dom.set_text(&p, "a < b");
        assert_eq!(dom.text_content(&p), "a < b");
        assert_eq!(dom.to_html(p), "<p>a &lt; b</p>");

        dom.set_text(&p, "");
        assert!(dom.children(p).is_empty());
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let mut dom = MemoryDom::new();
        let article = dom.create_element("article");
        let h = dom.create_element("h2");
        let p = dom.create_element("p");
        dom.set_text(&h, "Title");
        dom.set_text(&p, "Body");
        dom.append_child(&article, &h);
        dom.append_child(&article, &p);
        assert_eq!(dom.text_content(&article), "TitleBody");
    }

    #[test]
    fn test_class_attribute_round_trip() {
        let mut dom = MemoryDom::new();
        let section = dom.create_element("section");
        assert_eq!(dom.attribute(&section, "class"), None);
        dom.add_class(&section, "comments");
        dom.add_class(&section, "hide");
        dom.add_class(&section, "hide");
        assert_eq!(dom.attribute(&section, "class").as_deref(), Some("comments hide"));

        assert!(!dom.toggle_class(&section, "hide"));
        assert!(!dom.has_class(&section, "hide"));
        assert!(dom.toggle_class(&section, "hide"));

        dom.set_attribute(&section, "class", "a  b");
        assert!(dom.has_class(&section, "a"));
        assert!(!dom.has_class(&section, "comments"));
    }

    #[test]
    fn test_queries_only_see_attached_nodes() {
        let mut dom = MemoryDom::new();
        let detached = dom.create_element("button");
        dom.set_attribute(&detached, "data-post-id", "1");
        assert_eq!(dom.find_in_document("button", "data-post-id", "1"), None);

        let body = dom.body();
        dom.append_child(&body, &detached);
        assert_eq!(
            dom.find_in_document("button", "data-post-id", "1"),
            Some(detached)
        );
        assert_eq!(dom.find_in_document("button", "data-post-id", "2"), None);
    }

    #[test]
    fn test_query_all_filters_tag_and_attribute() {
        let mut dom = MemoryDom::new();
        let main = dom.create_element("main");
        let tagged = dom.create_element("button");
        let plain = dom.create_element("button");
        let section = dom.create_element("section");
        dom.set_attribute(&tagged, "data-post-id", "1");
        dom.set_attribute(&section, "data-post-id", "1");
        dom.append_child(&main, &tagged);
        dom.append_child(&main, &plain);
        dom.append_child(&main, &section);

        assert_eq!(dom.query_all(&main, "button", "data-post-id"), vec![tagged]);
    }

    #[test]
    fn test_element_by_id() {
        let mut dom = MemoryDom::new();
        let select = dom.create_element("select");
        dom.set_attribute(&select, "id", "selectMenu");
        let body = dom.body();
        dom.append_child(&body, &select);
        assert_eq!(dom.element_by_id("selectMenu"), Some(select));
        assert_eq!(dom.element_by_id("missing"), None);
    }

    #[test]
    fn test_click_dispatch_and_remove_listener() {
        let mut dom = MemoryDom::new();
        let button = dom.create_element("button");
        let listener = dom.add_click_listener(&button, mark_clicked);
        assert_eq!(dom.listener_count(button), 1);

        assert_eq!(dom.click(button), 1);
        assert!(dom.has_class(&button, "clicked"));

        dom.remove_click_listener(&button, listener);
        assert_eq!(dom.click(button), 0);
        assert!(dom.has_class(&button, "clicked"));
    }

    #[test]
    fn test_disabled_is_serialized() {
        let mut dom = MemoryDom::new();
        let select = dom.create_element("SELECT");
        dom.set_disabled(&select, true);
        assert!(dom.is_disabled(select));
        assert_eq!(dom.to_html(select), "<select disabled></select>");
        dom.set_disabled(&select, false);
        assert_eq!(dom.to_html(select), "<select></select>");
    }
}
