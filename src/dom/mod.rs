//! # DOM 抽象层
//!
//! 渲染层只通过 `Dom` trait 访问文档，不直接依赖浏览器全局对象：
//! - `memory` - 基于 arena 的内存文档，用于测试和原生宿主
//! - `web::BrowserDom`（`web` feature，仅 wasm32）- 基于 `web-sys` 的真实浏览器文档
//!
//! ## 设计说明
//! - 页面锚点（`<main>`、用户选择器）以显式节点句柄传入渲染函数，
//!   编排器无需真实文档即可测试。
//! - 点击处理器是普通函数指针 `ClickHandler<D>`：同一个处理器绑定到所有按钮，
//!   解除绑定时依靠 `add_click_listener` 返回的句柄精确移除，
//!   不依赖"重新构造一个相同闭包"去匹配。

pub mod memory;

use std::fmt;

/// 点击事件处理器：接收文档和被点击的节点
pub type ClickHandler<D> = fn(&mut D, &<D as Dom>::Node);

/// 渲染层所需的最小文档操作集合
///
/// 语义与浏览器 DOM 一致：
/// - 追加 fragment 时移动其全部子节点，fragment 自身变空
/// - 追加已有父节点的节点时先从原父节点移除
/// - 查询只覆盖已挂载到文档上的节点（`find_in_document` / `element_by_id` / `first_by_tag`）
pub trait Dom: Sized {
    /// 节点句柄，克隆代价低
    type Node: Clone + PartialEq + fmt::Debug;

    /// 已绑定监听器的句柄，移除监听器时原样交回
    type Listener;

    /// 创建一个未挂载的元素
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// 创建一个空的文档片段
    fn create_fragment(&mut self) -> Self::Node;

    /// 将 `child` 追加为 `parent` 的最后一个子节点
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// 移除 `parent` 的全部子节点，返回移除的数量
    fn remove_children(&mut self, parent: &Self::Node) -> usize;

    /// 设置文本内容（替换全部子节点）
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// 读取文本内容（全部后代文本节点按文档顺序拼接）
    fn text_content(&self, node: &Self::Node) -> String;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    /// 切换 class，返回切换后该 class 是否存在
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> bool;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_disabled(&mut self, node: &Self::Node, disabled: bool);

    /// 查询 `root` 下所有匹配 `tag[attr]` 的后代元素（文档顺序）
    fn query_all(&self, root: &Self::Node, tag: &str, attr: &str) -> Vec<Self::Node>;

    /// 在整个文档中查找第一个匹配 `tag[attr="value"]` 的元素
    fn find_in_document(&self, tag: &str, attr: &str, value: &str) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// 文档中第一个指定标签的元素
    fn first_by_tag(&self, tag: &str) -> Option<Self::Node>;

    /// 为节点绑定点击处理器，返回用于移除的句柄
    fn add_click_listener(&mut self, node: &Self::Node, handler: ClickHandler<Self>)
        -> Self::Listener;

    /// 用绑定时返回的句柄移除点击处理器
    fn remove_click_listener(&mut self, node: &Self::Node, listener: Self::Listener);
}
