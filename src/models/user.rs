//! # 用户数据模型
//!
//! 对应远端 API `GET /users` 与 `GET /users/{id}` 返回的用户记录。
//! 用户数据是每个渲染周期的只读快照：请求后立即用于构建 DOM，随后丢弃。

use serde::{Deserialize, Serialize};

/// 用户数据结构
///
/// 渲染层只依赖 `id`、`name` 和 `company`，其余字段以默认值兜底，
/// 远端缺失时不会导致反序列化失败。
///
/// 对应远端 JSON：
/// ```json
/// {
///   "id": 1,
///   "name": "Leanne Graham",
///   "username": "Bret",
///   "email": "Sincere@april.biz",
///   "company": { "name": "Romaguera-Crona", "catchPhrase": "...", "bs": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// 用户 ID：同时作为选择器 `<option>` 的 value
    pub id: u64,

    /// 显示名称：选择器选项标签和帖子作者行使用
    pub name: String,

    /// 登录名
    #[serde(default)]
    pub username: String,

    /// 联系邮箱
    #[serde(default)]
    pub email: String,

    /// 所属公司
    pub company: Company,
}

/// 公司信息（嵌套在用户记录中）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// 公司名称，显示在 "Author: {name} with {company}" 行
    pub name: String,

    /// 公司标语，单独成行显示在作者行之后
    pub catch_phrase: String,

    #[serde(default)]
    pub bs: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_camel_case() {
        let raw = r#"{
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Leanne Graham");
        assert_eq!(user.company.name, "Romaguera-Crona");
        assert_eq!(
            user.company.catch_phrase,
            "Multi-layered client-server neural-net"
        );
    }

    #[test]
    fn test_user_optional_fields_default() {
        // 只有渲染必需的字段
        let raw = r#"{"id": 7, "name": "Kurtis", "company": {"name": "Acme", "catchPhrase": "Go"}}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.username, "");
        assert_eq!(user.email, "");
        assert_eq!(user.company.bs, "");
    }

    #[test]
    fn test_user_missing_company_is_error() {
        let raw = r#"{"id": 7, "name": "Kurtis"}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }
}
