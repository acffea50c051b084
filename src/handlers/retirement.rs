//! 401(k) 计算器接口
//!
//! GET 读取查询参数，POST 读取 JSON 对象

use actix_web::{web, HttpResponse, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{ErrorBody, RetirementInputs};
use crate::services::retirement;

/// 对外统一的错误信息，细节只写日志
const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

/// GET /api/calculate-401k?current_age=30&retirement_age=65...
pub async fn calculate_get(query: web::Query<HashMap<String, String>>) -> Result<HttpResponse> {
    let params: Map<String, Value> = query
        .into_inner()
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    Ok(respond(Ok(params)))
}

/// POST /api/calculate-401k，请求体为 JSON 对象
pub async fn calculate_post(body: web::Bytes) -> Result<HttpResponse> {
    let params = serde_json::from_slice::<Value>(&body)
        .map_err(|e| AppError::Validation(format!("request body is not valid JSON: {}", e)))
        .and_then(|value| match value {
            Value::Object(map) => Ok(map),
            _ => Err(AppError::Validation("request body must be a JSON object".to_string())),
        });
    Ok(respond(params))
}

fn respond(params: Result<Map<String, Value>, AppError>) -> HttpResponse {
    let result = params
        .and_then(|params| RetirementInputs::from_params(&params))
        .and_then(|inputs| retirement::project(&inputs));

    match result {
        Ok(projection) => HttpResponse::Ok().json(projection),
        Err(e) => {
            log::error!("401(k) 计算失败: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new(SERVER_ERROR_MESSAGE))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/calculate-401k")
            .route(web::get().to(calculate_get))
            .route(web::post().to(calculate_post)),
    );
}
