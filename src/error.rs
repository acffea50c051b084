//! 错误类型
//!
//! 各业务操作返回明确的错误分类，由 HTTP 边界层统一映射状态码

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum AppError {
    /// 输入参数错误或自相矛盾
    #[error("{0}")]
    Validation(String),

    /// 上游返回空序列
    #[error("No data retrieved from Yahoo Finance for {0}")]
    NoData(String),

    /// 网络传输或上游服务故障
    #[error("{0}")]
    Upstream(String),

    /// 服务端配置缺失
    #[error("{0}")]
    Configuration(String),

    /// 页面模板不存在
    #[error("template not found: {0}")]
    TemplateNotFound(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Upstream(format!("invalid upstream response: {}", e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) | AppError::NoData(_) | AppError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
