//! # 事件绑定
//!
//! 帖子按钮的点击行为与监听器生命周期管理：
//! - `toggle_comment_section` / `toggle_comment_button` / `toggle_comments` - 评论区显隐切换
//! - `handle_toggle_click` - 绑定到每个帖子按钮上的点击处理器
//! - `ListenerRegistry` - 记录"按钮 → 监听器句柄"，重建内容前统一解绑
//!
//! ## 评论区状态机
//! 每个评论区只有两个状态：Hidden（初始）和 Shown，仅由对应按钮的点击切换。
//! 按钮文本随之在 "Show Comments" / "Hide Comments" 之间切换。

use crate::dom::Dom;
use crate::services::builders::{HIDE_CLASS, HIDE_COMMENTS_LABEL, POST_ID_ATTR, SHOW_COMMENTS_LABEL};

/// 切换指定帖子评论区的隐藏状态
///
/// # 返回值
/// 找到的 `<section data-post-id>`；文档中不存在时返回 `None`
pub fn toggle_comment_section<D: Dom>(dom: &mut D, post_id: &str) -> Option<D::Node> {
    let Some(section) = dom.find_in_document("section", POST_ID_ATTR, post_id) else {
        log::warn!("未找到帖子 {} 的评论区", post_id);
        return None;
    };
    dom.toggle_class(&section, HIDE_CLASS);
    Some(section)
}

/// 切换指定帖子按钮的文本
///
/// 当前为 "Show Comments" 时改为 "Hide Comments"，否则改回 "Show Comments"。
///
/// # 返回值
/// 找到的 `<button data-post-id>`；文档中不存在时返回 `None`
pub fn toggle_comment_button<D: Dom>(dom: &mut D, post_id: &str) -> Option<D::Node> {
    let Some(button) = dom.find_in_document("button", POST_ID_ATTR, post_id) else {
        log::warn!("未找到帖子 {} 的评论按钮", post_id);
        return None;
    };
    let label = if dom.text_content(&button) == SHOW_COMMENTS_LABEL {
        HIDE_COMMENTS_LABEL
    } else {
        SHOW_COMMENTS_LABEL
    };
    dom.set_text(&button, label);
    Some(button)
}

/// 同时切换评论区和按钮文本
///
/// # 返回值
/// `(评论区, 按钮)`，各自缺失时为 `None`
pub fn toggle_comments<D: Dom>(dom: &mut D, post_id: &str) -> (Option<D::Node>, Option<D::Node>) {
    let section = toggle_comment_section(dom, post_id);
    let button = toggle_comment_button(dom, post_id);
    (section, button)
}

/// 帖子按钮的点击处理器：读取按钮的 `data-post-id` 并切换对应评论区
pub fn handle_toggle_click<D: Dom>(dom: &mut D, button: &D::Node) {
    match dom.attribute(button, POST_ID_ATTR) {
        Some(post_id) => {
            toggle_comments(dom, &post_id);
        }
        None => log::warn!("被点击的按钮缺少 {} 属性", POST_ID_ATTR),
    }
}

/// 按钮监听器登记表
///
/// 每次绑定都把 `(按钮, 监听器句柄)` 记录下来，解绑时用记录的句柄精确移除，
/// 保证多次刷新之后每个按钮上最多只有一个点击处理器。
pub struct ListenerRegistry<D: Dom> {
    bound: Vec<(D::Node, D::Listener)>,
}

impl<D: Dom> ListenerRegistry<D> {
    pub fn new() -> Self {
        Self { bound: Vec::new() }
    }

    /// 当前已绑定的按钮数量
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// 是否已为该按钮登记过监听器
    pub fn is_bound(&self, node: &D::Node) -> bool {
        self.bound.iter().any(|(bound, _)| bound == node)
    }

    /// 为 `root` 下所有 `button[data-post-id]` 绑定点击处理器
    ///
    /// 已登记的按钮会被跳过。
    ///
    /// # 返回值
    /// 本次新绑定的按钮列表
    pub fn attach_all(&mut self, dom: &mut D, root: &D::Node) -> Vec<D::Node> {
        let mut attached = Vec::new();
        for button in dom.query_all(root, "button", POST_ID_ATTR) {
            if self.is_bound(&button) {
                continue;
            }
            let listener = dom.add_click_listener(&button, handle_toggle_click::<D>);
            self.bound.push((button.clone(), listener));
            attached.push(button);
        }
        log::debug!("绑定了 {} 个评论按钮监听器", attached.len());
        attached
    }

    /// 移除全部已登记的监听器并清空登记表
    ///
    /// # 返回值
    /// 被解绑的按钮列表
    pub fn detach_all(&mut self, dom: &mut D) -> Vec<D::Node> {
        let detached: Vec<D::Node> = self
            .bound
            .drain(..)
            .map(|(button, listener)| {
                dom.remove_click_listener(&button, listener);
                button
            })
            .collect();
        log::debug!("移除了 {} 个评论按钮监听器", detached.len());
        detached
    }
}

impl<D: Dom> Default for ListenerRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}
