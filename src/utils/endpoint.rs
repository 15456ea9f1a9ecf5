//! # 远端 API 端点
//!
//! 集中定义渲染层访问的四个 REST 端点，负责：
//! - 生成端点路径（含查询参数）
//! - 将路径拼接到配置的 API 根地址
//! - 把选择器的原始取值解析为用户 ID

use std::fmt;

/// 渲染层访问的远端端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /users`：全部用户
    Users,
    /// `GET /users/{id}`：单个用户
    User(u64),
    /// `GET /posts?userId={id}`：某个用户的全部帖子
    UserPosts(u64),
    /// `GET /comments?postId={id}`：某篇帖子的全部评论
    PostComments(u64),
}

impl Endpoint {
    /// 端点路径（以 `/` 开头，不含根地址）
    pub fn path(&self) -> String {
        match self {
            Self::Users => "/users".to_string(),
            Self::User(id) => format!("/users/{}", id),
            Self::UserPosts(user_id) => format!("/posts?userId={}", user_id),
            Self::PostComments(post_id) => format!("/comments?postId={}", post_id),
        }
    }

    /// 拼接完整 URL
    ///
    /// 根地址末尾的 `/` 会被去掉，避免出现 `//users`。
    ///
    /// # 示例
    /// ```
    /// use post_reader::utils::endpoint::Endpoint;
    ///
    /// let url = Endpoint::UserPosts(1).url("https://jsonplaceholder.typicode.com/");
    /// assert_eq!(url, "https://jsonplaceholder.typicode.com/posts?userId=1");
    /// ```
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

/// 将选择器的原始取值解析为用户 ID
///
/// 取值缺失、为空或不是非负整数时返回 `fallback`。
/// 首尾空白会被忽略。
///
/// # 参数
/// - `raw` - `<select>` 的当前取值（事件目标缺失时为 `None`）
/// - `fallback` - 解析失败时使用的用户 ID
pub fn resolve_user_id(raw: Option<&str>, fallback: u64) -> u64 {
    raw.map(str::trim)
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Users.path(), "/users");
        assert_eq!(Endpoint::User(3).path(), "/users/3");
        assert_eq!(Endpoint::UserPosts(3).path(), "/posts?userId=3");
        assert_eq!(Endpoint::PostComments(21).path(), "/comments?postId=21");
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        assert_eq!(
            Endpoint::User(5).url("http://127.0.0.1:8080//"),
            "http://127.0.0.1:8080/users/5"
        );
        assert_eq!(
            Endpoint::Users.url("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080/users"
        );
    }

    #[test]
    fn test_resolve_user_id() {
        assert_eq!(resolve_user_id(Some("4"), 1), 4);
        assert_eq!(resolve_user_id(Some(" 10 "), 1), 10);
        assert_eq!(resolve_user_id(Some(""), 1), 1);
        assert_eq!(resolve_user_id(Some("Select an Employee"), 1), 1);
        assert_eq!(resolve_user_id(Some("-2"), 1), 1);
        assert_eq!(resolve_user_id(None, 9), 9);
    }
}
