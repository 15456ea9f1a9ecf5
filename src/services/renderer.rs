//! # 渲染编排器
//!
//! 组合 API 客户端、DOM 构建函数和事件绑定，驱动整个页面：
//! - `init_page` - 首次加载：拉取全部用户、填充选择器、内容区显示占位文本
//! - `select_user` - 选择器变更：拉取该用户的帖子并整体刷新内容区
//! - `refresh_posts` - 解绑旧监听器 → 清空内容区 → 渲染 → 绑定新监听器
//!
//! ## 页面锚点
//! `<main>` 和用户选择器以 `PageAnchors` 显式传入，编排器本身不查找全局对象。
//!
//! ## 过期结果丢弃
//! 每次 `select_user` 都会开启新的渲染代（`RenderGeneration`）。
//! 网络请求返回后若发现已有更新的选择，本次结果直接丢弃，不触碰文档。
//!
//! ## 文档借用规则
//! 文档以 `&RefCell<D>` 传入，只在两次 `await` 之间短暂借用，
//! 绝不跨越 `await` 持有，因此多个选择变更可以在同一事件循环上交错执行。

use std::cell::{Cell, RefCell};

use crate::dom::Dom;
use crate::models::config::ViewerConfig;
use crate::models::post::Post;
use crate::models::user::User;
use crate::services::api::{ApiClient, Fetched, Transport};
use crate::services::builders::{self, PostCard, DEFAULT_TEXT_CLASS};
use crate::services::events::ListenerRegistry;
use crate::utils::endpoint::resolve_user_id;

/// 页面上的两个固定锚点
#[derive(Debug, Clone, PartialEq)]
pub struct PageAnchors<N> {
    /// 内容区 `<main>`
    pub main: N,
    /// 用户选择器 `<select>`
    pub selector: N,
}

impl<N> PageAnchors<N> {
    /// 在文档中查找 `<main>` 和 id 为 `config.selector_id` 的选择器
    ///
    /// 任一锚点缺失时记录警告并返回 `None`。
    pub fn locate<D: Dom<Node = N>>(dom: &D, config: &ViewerConfig) -> Option<Self> {
        let Some(main) = dom.first_by_tag("main") else {
            log::warn!("页面缺少 <main> 元素");
            return None;
        };
        let Some(selector) = dom.element_by_id(&config.selector_id) else {
            log::warn!("页面缺少 id 为 {} 的选择器", config.selector_id);
            return None;
        };
        Some(Self { main, selector })
    }
}

/// 渲染代计数器
///
/// 每次开始新的选择变更时递增；持有旧票据的渲染流程据此判断自己已过期。
#[derive(Debug, Default)]
pub struct RenderGeneration {
    current: Cell<u64>,
}

/// 某一渲染代的票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket(u64);

impl RenderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开启新的渲染代，之前发出的票据全部过期
    pub fn begin(&self) -> RenderTicket {
        let next = self.current.get() + 1;
        self.current.set(next);
        RenderTicket(next)
    }

    /// 当前渲染代的票据，不开启新的渲染代
    ///
    /// 用于只在"期间没有新的选择"时才触碰内容区的流程（如 `init_page`），
    /// 不会让已在进行中的选择过期。
    pub fn snapshot(&self) -> RenderTicket {
        RenderTicket(self.current.get())
    }

    /// 票据是否仍属于最新的渲染代
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.current.get() == ticket.0
    }
}

/// 一次 `refresh_posts` 的执行报告
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport<N> {
    /// 刷新前被解绑的按钮
    pub removed: Vec<N>,
    /// 追加到 `<main>` 的节点（帖子片段或占位段落）
    pub content: N,
    /// 渲染的帖子数量（显示占位文本时为 0）
    pub posts_rendered: usize,
    /// 刷新后新绑定的按钮
    pub added: Vec<N>,
}

/// 一次 `init_page` 的执行结果
#[derive(Debug, Clone, PartialEq)]
pub struct InitReport<N> {
    pub users: Fetched<Vec<User>>,
    /// 新增到选择器的选项；用户列表未加载时为 `None`
    pub options: Option<Vec<N>>,
    /// 内容区重置报告；用户列表返回前已开始新的选择时为 `None`
    pub refresh: Option<RefreshReport<N>>,
}

/// 一次 `select_user` 的执行结果
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome<N> {
    /// 实际使用的用户 ID（解析失败时为回退值）
    pub user_id: u64,
    pub posts: Fetched<Vec<Post>>,
    /// 刷新报告；本次结果因过期被丢弃时为 `None`
    pub refresh: Option<RefreshReport<N>>,
}

impl<N> SelectionOutcome<N> {
    /// 本次选择是否被更新的选择取代
    pub fn is_stale(&self) -> bool {
        self.refresh.is_none()
    }
}

/// 帖子浏览页面
///
/// 持有 API 客户端、配置、页面锚点、按钮监听器登记表和渲染代计数器。
/// 文档本身不归它所有，每次调用时传入。
pub struct PostBoard<D: Dom, T: Transport> {
    api: ApiClient<T>,
    config: ViewerConfig,
    anchors: PageAnchors<D::Node>,
    listeners: RefCell<ListenerRegistry<D>>,
    generation: RenderGeneration,
}

impl<D: Dom, T: Transport> PostBoard<D, T> {
    pub fn new(api: ApiClient<T>, config: ViewerConfig, anchors: PageAnchors<D::Node>) -> Self {
        Self {
            api,
            config,
            anchors,
            listeners: RefCell::new(ListenerRegistry::new()),
            generation: RenderGeneration::new(),
        }
    }

    pub fn anchors(&self) -> &PageAnchors<D::Node> {
        &self.anchors
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// 当前登记在册的按钮监听器数量
    pub fn bound_listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    // ======== 同步渲染步骤 ========

    /// 将用户选项追加到选择器
    ///
    /// # 返回值
    /// 新增的选项；用户列表缺失时返回 `None` 且不修改选择器
    pub fn populate_select_menu(&self, dom: &mut D, users: Option<&[User]>) -> Option<Vec<D::Node>> {
        let options = builders::create_select_options(dom, users)?;
        for option in &options {
            dom.append_child(&self.anchors.selector, option);
        }
        Some(options)
    }

    /// 将帖子片段追加到 `<main>`；没有帖子时追加占位段落
    ///
    /// # 返回值
    /// `(追加的节点, 渲染的帖子数量)`。追加的是片段时，
    /// 片段的子节点已移入 `<main>`，片段本身为空。
    pub fn display_posts(&self, dom: &mut D, cards: Option<&[PostCard]>) -> (D::Node, usize) {
        let main = &self.anchors.main;
        match builders::create_posts(dom, cards) {
            Some(fragment) => {
                dom.append_child(main, &fragment);
                let count = cards.map_or(0, <[PostCard]>::len);
                log::debug!("渲染了 {} 篇帖子", count);
                (fragment, count)
            }
            None => {
                let placeholder = builders::create_element_with_text(
                    dom,
                    Some("p"),
                    &self.config.placeholder_text,
                    Some(DEFAULT_TEXT_CLASS),
                );
                dom.append_child(main, &placeholder);
                (placeholder, 0)
            }
        }
    }

    /// 整体刷新内容区
    ///
    /// 顺序固定：解绑全部旧监听器 → 清空 `<main>` → 渲染 → 为新按钮绑定监听器。
    pub fn refresh_posts(&self, dom: &mut D, cards: Option<&[PostCard]>) -> RefreshReport<D::Node> {
        let mut listeners = self.listeners.borrow_mut();
        let removed = listeners.detach_all(dom);
        dom.remove_children(&self.anchors.main);
        let (content, posts_rendered) = self.display_posts(dom, cards);
        let added = listeners.attach_all(dom, &self.anchors.main);
        RefreshReport {
            removed,
            content,
            posts_rendered,
            added,
        }
    }

    // ======== 异步流程 ========

    /// 首次加载页面
    ///
    /// 拉取全部用户并填充选择器，内容区重置为占位文本。
    /// 若用户列表返回前已经开始了新的选择，只填充选择器，内容区交给该选择处理。
    pub async fn init_page(&self, dom: &RefCell<D>) -> InitReport<D::Node> {
        let ticket = self.generation.snapshot();
        let users = self.api.get_users().await;

        let mut dom = dom.borrow_mut();
        let options = self.populate_select_menu(&mut dom, users.as_loaded().map(Vec::as_slice));
        let refresh = if self.generation.is_current(ticket) {
            Some(self.refresh_posts(&mut dom, None))
        } else {
            log::debug!("初始化期间已有新的选择，保留内容区");
            None
        };
        log::info!(
            "页面初始化完成，共 {} 个用户",
            options.as_ref().map_or(0, Vec::len)
        );

        InitReport {
            users,
            options,
            refresh,
        }
    }

    /// 处理选择器变更
    ///
    /// 1. 开启新的渲染代并禁用选择器
    /// 2. 解析用户 ID（失败时使用配置的回退 ID）
    /// 3. 拉取帖子，再为每篇帖子拉取作者和评论
    /// 4. 若期间已有更新的选择，丢弃本次结果
    /// 5. 否则刷新内容区并重新启用选择器
    ///
    /// # 参数
    /// - `dom` - 文档
    /// - `raw_value` - 选择器当前取值（事件目标缺失时为 `None`）
    pub async fn select_user(&self, dom: &RefCell<D>, raw_value: Option<&str>) -> SelectionOutcome<D::Node> {
        let ticket = self.generation.begin();
        dom.borrow_mut().set_disabled(&self.anchors.selector, true);

        let user_id = resolve_user_id(raw_value, self.config.fallback_user_id);
        log::debug!("选择用户 {}（原始取值 {:?}）", user_id, raw_value);

        let posts = self.api.get_user_posts(Some(user_id)).await;
        let cards = match posts.as_loaded() {
            Some(list) => Some(builders::load_post_cards(&self.api, list).await),
            None => None,
        };

        if !self.generation.is_current(ticket) {
            log::debug!("用户 {} 的渲染结果已过期，丢弃", user_id);
            return SelectionOutcome {
                user_id,
                posts,
                refresh: None,
            };
        }

        let mut dom = dom.borrow_mut();
        let refresh = self.refresh_posts(&mut dom, cards.as_deref());
        dom.set_disabled(&self.anchors.selector, false);

        SelectionOutcome {
            user_id,
            posts,
            refresh: Some(refresh),
        }
    }
}
