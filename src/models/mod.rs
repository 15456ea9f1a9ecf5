//! # 数据模型模块
//!
//! 定义了与远端 JSON API 一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` 和 `Deserialize`，字段在 JSON 中使用 camelCase。
//! - `user` - 用户及其所属公司
//! - `post` - 用户发布的帖子
//! - `comment` - 帖子下的评论
//! - `config` - 渲染层的运行配置

pub mod comment;
pub mod config;
pub mod post;
pub mod user;
