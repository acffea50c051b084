//! 对话补全代理接口
//!
//! POST /api/chatgpt - 请求体原样转发到上游

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// 上游故障返回 502，凭证缺失返回 500，均为 `{"error": ...}`
pub async fn proxy_chat(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let reply = state.chat.forward(&payload).await.map_err(|e| {
        log::error!("对话补全转发失败: {}", e);
        e
    })?;
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok(HttpResponse::build(status).json(reply.body))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/chatgpt", web::post().to(proxy_chat));
}
