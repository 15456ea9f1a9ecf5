//! # 评论数据模型
//!
//! 对应远端 API `GET /comments?postId={id}` 返回的评论数组元素。

use serde::{Deserialize, Serialize};

/// 评论数据结构
///
/// 对应远端 JSON：
/// ```json
/// { "postId": 1, "id": 1, "name": "...", "email": "Eliseo@gardner.biz", "body": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// 所属帖子 ID
    pub post_id: u64,

    #[serde(default)]
    pub id: u64,

    /// 评论标题（评论者填写的名称），渲染为 `<h3>`
    pub name: String,

    /// 评论者邮箱，渲染为 "From: {email}"
    pub email: String,

    /// 评论正文
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_deserialize() {
        let raw = r#"{"postId": 3, "id": 11, "name": "fugit labore", "email": "Veronica_Goodwin@timmothy.net", "body": "ut dolorum"}"#;
        let comment: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(comment.post_id, 3);
        assert_eq!(comment.id, 11);
        assert_eq!(comment.email, "Veronica_Goodwin@timmothy.net");
    }
}
