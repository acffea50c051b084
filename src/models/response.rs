//! 通用 API 响应模型
//!
//! 成功响应直接返回业务数据，失败响应统一为 `{"error": "..."}`

use serde::{Deserialize, Serialize};

/// 错误响应体
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// 错误信息
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
