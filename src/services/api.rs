//! # 远端 API 客户端
//!
//! 封装对远端 REST JSON API 的四个 GET 请求：
//! - `get_users` - 全部用户
//! - `get_user_posts` - 某个用户的帖子
//! - `get_user` - 单个用户
//! - `get_post_comments` - 某篇帖子的评论
//!
//! ## 返回值约定
//! 每个请求都返回三态结果 `Fetched<T>`，错误不会以 panic 或 `Err` 的形式抛给调用方：
//! - `Absent`：必需的 ID 参数缺失，**不发起任何网络请求**
//! - `Failed`：网络错误、非 2xx 响应或响应体无法解析，已通过 `log::error!` 记录
//! - `Loaded(T)`：解析成功的数据
//!
//! ## 传输层
//! 网络访问通过 `Transport` trait 抽象：生产环境使用 `ReqwestTransport`
//! （原生目标基于 hyper，wasm32 目标基于浏览器 fetch），测试中替换为桩实现。
//! 不做重试、不设超时、不限制并发。

use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::models::comment::Comment;
use crate::models::post::Post;
use crate::models::user::User;
use crate::utils::endpoint::Endpoint;

/// 一次请求的三态结果
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// 必需参数缺失，未发起请求
    Absent,
    /// 请求失败（已记录日志）
    Failed,
    /// 请求成功并完成解析
    Loaded(T),
}

impl<T> Fetched<T> {
    /// 取出成功数据，`Absent` 与 `Failed` 均返回 `None`
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Absent | Self::Failed => None,
        }
    }

    /// 借用成功数据
    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Absent | Self::Failed => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// 传输层返回的原始 HTTP 响应
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP 传输层抽象
///
/// 渲染层运行在单线程事件循环上（浏览器或 current_thread 运行时），
/// 因此返回的 future 不要求 `Send`。
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// 对给定 URL 发起一次 GET 请求
    ///
    /// # 错误
    /// 仅在请求无法完成（连接失败、响应体读取失败等）时返回错误；
    /// 非 2xx 状态码属于正常返回，由调用方判断。
    async fn get(&self, url: &str) -> Result<HttpResponse, String>;
}

impl<T: Transport> Transport for &T {
    async fn get(&self, url: &str) -> Result<HttpResponse, String> {
        (**self).get(url).await
    }
}

/// 基于 `reqwest` 的生产传输层
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 复用外部构建的 `reqwest::Client`（例如自定义 User-Agent 或代理）
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| format!("请求发送失败: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("读取响应体失败: {}", e))?;

        Ok(HttpResponse { status, body })
    }
}

/// 远端 API 客户端
///
/// 每个方法只发起一次 GET 请求，调用之间没有任何共享状态。
#[derive(Debug, Clone)]
pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ApiClient<T> {
    /// 创建客户端
    ///
    /// # 参数
    /// - `transport` - HTTP 传输层实现
    /// - `base_url` - API 根地址（如 `https://jsonplaceholder.typicode.com`）
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 获取全部用户（`GET /users`）
    pub async fn get_users(&self) -> Fetched<Vec<User>> {
        self.fetch_json(Endpoint::Users).await
    }

    /// 获取某个用户的全部帖子（`GET /posts?userId={id}`）
    ///
    /// `user_id` 为 `None` 时直接返回 `Fetched::Absent`。
    pub async fn get_user_posts(&self, user_id: Option<u64>) -> Fetched<Vec<Post>> {
        match user_id {
            Some(id) => self.fetch_json(Endpoint::UserPosts(id)).await,
            None => Fetched::Absent,
        }
    }

    /// 获取单个用户（`GET /users/{id}`）
    ///
    /// `user_id` 为 `None` 时直接返回 `Fetched::Absent`。
    pub async fn get_user(&self, user_id: Option<u64>) -> Fetched<User> {
        match user_id {
            Some(id) => self.fetch_json(Endpoint::User(id)).await,
            None => Fetched::Absent,
        }
    }

    /// 获取某篇帖子的全部评论（`GET /comments?postId={id}`）
    ///
    /// `post_id` 为 `None` 时直接返回 `Fetched::Absent`。
    pub async fn get_post_comments(&self, post_id: Option<u64>) -> Fetched<Vec<Comment>> {
        match post_id {
            Some(id) => self.fetch_json(Endpoint::PostComments(id)).await,
            None => Fetched::Absent,
        }
    }

    /// 请求端点并把响应体解析为 `R`
    ///
    /// 所有失败都在这里收口：记录一条 error 日志并返回 `Fetched::Failed`。
    async fn fetch_json<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Fetched<R> {
        let url = endpoint.url(&self.base_url);
        log::debug!("{} -> {}", endpoint, url);

        match self.request_json(&url).await {
            Ok(value) => Fetched::Loaded(value),
            Err(e) => {
                log::error!("{} 失败: {}", endpoint, e);
                Fetched::Failed
            }
        }
    }

    async fn request_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, String> {
        let response = self.transport.get(url).await?;

        if !response.status.is_success() {
            return Err(format!("HTTP {} ({})", response.status, url));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| format!("解析响应 JSON 失败: {} ({})", e, url))
    }
}
