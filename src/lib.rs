//! # Post Reader - 用户帖子浏览渲染层
//!
//! 从远端 JSON API 拉取用户、帖子和评论，渲染到文档中，
//! 并支持逐帖展开/折叠评论区。
//!
//! ## 模块结构
//! - `models/` - 数据模型（对应远端 JSON 记录）与运行配置
//! - `dom/` - 文档抽象 `Dom` 与内存实现 `MemoryDom`
//! - `services/` - API 客户端、DOM 构建、事件绑定、渲染编排
//! - `utils/` - 端点拼接等通用工具
//! - `web/` - 浏览器入口（`web` feature，仅 wasm32 目标）
//!
//! ## 数据流
//! ```text
//! 选择器变更 → get_user_posts → 每篇帖子并发 get_user + get_post_comments
//!           → create_posts（片段）→ 替换 <main> 内容 → 重新绑定按钮监听器
//! ```
//!
//! ## 原生使用
//! 内存文档的节点只增不减，适合测试和一次性渲染；长期运行的页面请使用 `web` 后端。
//!
//! ```no_run
//! use std::cell::RefCell;
//!
//! use post_reader::dom::memory::MemoryDom;
//! use post_reader::dom::Dom;
//! use post_reader::models::config::ViewerConfig;
//! use post_reader::services::api::{ApiClient, ReqwestTransport};
//! use post_reader::services::renderer::{PageAnchors, PostBoard};
//!
//! # async fn demo() {
//! let config = ViewerConfig::default();
//! let mut dom = MemoryDom::new();
//! let body = dom.body();
//! let select = dom.create_element("select");
//! dom.set_attribute(&select, "id", &config.selector_id);
//! let main = dom.create_element("main");
//! dom.append_child(&body, &select);
//! dom.append_child(&body, &main);
//!
//! let anchors = PageAnchors::locate(&dom, &config).unwrap();
//! let api = ApiClient::new(ReqwestTransport::new(), &config.api_base_url);
//! let board: PostBoard<MemoryDom, _> = PostBoard::new(api, config, anchors);
//!
//! let dom = RefCell::new(dom);
//! board.init_page(&dom).await;
//! board.select_user(&dom, Some("1")).await;
//! println!("{}", dom.borrow().to_html(main));
//! # }
//! ```

pub mod dom;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;
