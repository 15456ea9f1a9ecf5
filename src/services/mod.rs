//! # 业务逻辑服务模块
//!
//! 包含渲染层的全部业务逻辑，与具体文档实现（内存 / 浏览器）解耦：
//! - `api` - 远端 REST JSON API 客户端与 HTTP 传输层抽象
//! - `builders` - 数据 → 未挂载 DOM 片段的构建函数
//! - `events` - 评论区显隐切换与按钮监听器登记表
//! - `renderer` - 渲染编排器：首次加载、选择变更、整体刷新

pub mod api;
pub mod builders;
pub mod events;
pub mod renderer;
