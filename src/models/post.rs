//! # 帖子数据模型
//!
//! 对应远端 API `GET /posts?userId={id}` 返回的帖子数组元素。

use serde::{Deserialize, Serialize};

/// 帖子数据结构
///
/// 对应远端 JSON：
/// ```json
/// { "userId": 1, "id": 1, "title": "...", "body": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// 作者用户 ID，用于请求作者信息（`GET /users/{userId}`）
    pub user_id: u64,

    /// 帖子 ID：写入按钮和评论区的 `data-post-id` 属性，
    /// 也是请求评论（`GET /comments?postId={id}`）的参数
    pub id: u64,

    /// 标题
    pub title: String,

    /// 正文
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_deserialize_array() {
        let raw = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"},
            {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore"}
        ]"#;
        let posts: Vec<Post> = serde_json::from_str(raw).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].user_id, 1);
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].title, "qui est esse");
    }
}
