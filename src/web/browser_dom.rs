//! # 浏览器文档
//!
//! `Dom` trait 基于 `web-sys` 的实现。节点句柄直接使用 `web_sys::Node`，
//! 需要元素能力（属性、class、查询）时再 `dyn_ref::<Element>()`。
//!
//! 点击监听器以 `Closure` 形式保存在 `BrowserListener` 中，
//! 移除时用同一个 JS 函数引用调用 `removeEventListener`，随后释放闭包。

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentFragment, Element, Event, Node, NodeList};

use crate::dom::{ClickHandler, Dom};

/// 基于真实浏览器文档的 `Dom` 实现
///
/// 只持有 `Document` 的 JS 引用，克隆代价很低；
/// 每个点击回调内部都会临时构造一个新的 `BrowserDom`。
#[derive(Debug, Clone)]
pub struct BrowserDom {
    document: Document,
}

/// 已绑定的点击监听器
///
/// 丢弃前必须先交回 `remove_click_listener`，否则 JS 侧会持有失效的回调。
pub struct BrowserListener(Closure<dyn FnMut(Event)>);

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// 从全局 `window.document` 构造
    ///
    /// # 错误
    /// 不在浏览器主线程（无 window / document）时返回错误信息
    pub fn from_window() -> Result<Self, String> {
        let window = web_sys::window().ok_or("no window".to_string())?;
        let document = window.document().ok_or("no document".to_string())?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn node_list_to_vec(list: NodeList) -> Vec<Node> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

impl Dom for BrowserDom {
    type Node = Node;
    type Listener = BrowserListener;

    fn create_element(&mut self, tag: &str) -> Node {
        match self.document.create_element(tag) {
            Ok(element) => element.into(),
            Err(e) => {
                // 只有非法标签名才会失败；返回空片段，追加后不产生任何内容
                log::error!("document: create_element({}) failed: {:?}", tag, e);
                self.document.create_document_fragment().into()
            }
        }
    }

    fn create_fragment(&mut self) -> Node {
        self.document.create_document_fragment().into()
    }

    fn append_child(&mut self, parent: &Node, child: &Node) {
        if let Err(e) = parent.append_child(child) {
            log::warn!("node: append_child failed: {:?}", e);
        }
    }

    fn remove_children(&mut self, parent: &Node) -> usize {
        let mut removed = 0;
        while let Some(child) = parent.first_child() {
            if parent.remove_child(&child).is_err() {
                log::warn!("node: remove_child failed");
                break;
            }
            removed += 1;
        }
        removed
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<Element>() {
            if let Err(e) = element.set_attribute(name, value) {
                log::warn!("element: set_attribute({}) failed: {:?}", name, e);
            }
        }
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn add_class(&mut self, node: &Node, class: &str) {
        if let Some(element) = node.dyn_ref::<Element>() {
            if let Err(e) = element.class_list().add_1(class) {
                log::warn!("element: class_list.add({}) failed: {:?}", class, e);
            }
        }
    }

    fn toggle_class(&mut self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .and_then(|element| element.class_list().toggle(class).ok())
            .unwrap_or(false)
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_disabled(&mut self, node: &Node, disabled: bool) {
        let Some(element) = node.dyn_ref::<Element>() else {
            return;
        };
        let result = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
        if let Err(e) = result {
            log::warn!("element: toggle disabled failed: {:?}", e);
        }
    }

    fn query_all(&self, root: &Node, tag: &str, attr: &str) -> Vec<Node> {
        let selector = format!("{}[{}]", tag, attr);
        let list = if let Some(element) = root.dyn_ref::<Element>() {
            element.query_selector_all(&selector)
        } else if let Some(fragment) = root.dyn_ref::<DocumentFragment>() {
            fragment.query_selector_all(&selector)
        } else {
            return Vec::new();
        };
        list.map(node_list_to_vec).unwrap_or_default()
    }

    fn find_in_document(&self, tag: &str, attr: &str, value: &str) -> Option<Node> {
        let selector = format!("{}[{}=\"{}\"]", tag, attr, value);
        self.document.query_selector(&selector).ok().flatten().map(Into::into)
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Into::into)
    }

    fn first_by_tag(&self, tag: &str) -> Option<Node> {
        self.document.query_selector(tag).ok().flatten().map(Into::into)
    }

    fn add_click_listener(&mut self, node: &Node, handler: ClickHandler<Self>) -> BrowserListener {
        let document = self.document.clone();
        let target = node.clone();
        let on_click = Closure::wrap(Box::new(move |_ev: Event| {
            let mut dom = BrowserDom::new(document.clone());
            handler(&mut dom, &target);
        }) as Box<dyn FnMut(Event)>);

        if node
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("node: addEventListener(click) failed");
        }
        BrowserListener(on_click)
    }

    fn remove_click_listener(&mut self, node: &Node, listener: BrowserListener) {
        let BrowserListener(on_click) = listener;
        if node
            .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("node: removeEventListener(click) failed");
        }
    }
}
