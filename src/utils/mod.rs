//! # 通用工具函数
//!
//! - `endpoint` - 远端 API 端点路径与 URL 拼接、选择器取值解析

pub mod endpoint;
