//! # 运行配置数据模型
//!
//! 定义渲染层的运行配置 `ViewerConfig`。
//! 本应用不读取配置文件或环境变量：配置要么使用内置默认值，
//! 要么由宿主页面在启动时以 JSON 字符串传入（见 `web::init_app`）。

use serde::{Deserialize, Serialize};

/// 远端 API 默认根地址
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// 选择器取值无法解析时使用的回退用户 ID
pub const DEFAULT_FALLBACK_USER_ID: u64 = 1;

/// 用户选择器元素的默认 id
pub const DEFAULT_SELECTOR_ID: &str = "selectMenu";

/// 内容区没有帖子时显示的占位文本
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Select an Employee to display their posts.";

/// 渲染层运行配置
///
/// 所有字段均有默认值，宿主只需传入想要覆盖的字段：
/// ```json
/// { "apiBaseUrl": "http://localhost:3000", "fallbackUserId": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// 远端 API 根地址，末尾斜杠可有可无
    pub api_base_url: String,

    /// 选择器取值无法解析为用户 ID 时的回退值
    pub fallback_user_id: u64,

    /// 用户选择器 `<select>` 元素的 id
    pub selector_id: String,

    /// 内容区占位文本
    pub placeholder_text: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fallback_user_id: DEFAULT_FALLBACK_USER_ID,
            selector_id: DEFAULT_SELECTOR_ID.to_string(),
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
        }
    }
}

impl ViewerConfig {
    /// 从宿主传入的 JSON 字符串解析配置
    ///
    /// 缺失的字段使用默认值；空字符串视为未传入配置。
    ///
    /// # 错误
    /// JSON 格式错误或字段类型不匹配时返回错误信息
    pub fn from_json(raw: &str) -> Result<Self, String> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| format!("解析渲染配置失败: {}", e))
    }
}
