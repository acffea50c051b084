//! 静态页面路由
//!
//! 路径与模板一一对应，模板原样返回

use actix_web::http::header::ContentType;
use actix_web::{guard, web, HttpResponse};
use std::io::ErrorKind;

use crate::error::AppError;
use crate::state::AppState;

/// 路径 -> 模板文件
pub const PAGES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/aboutus", "aboutus.html"),
    ("/tour", "tour.html"),
    ("/planning", "planning.html"),
    ("/rothIRA", "rothIRA.html"),
    ("/four_o_one_k", "four_o_one_k.html"),
    ("/pensionplans", "pensionplans.html"),
    ("/tools", "tools.html"),
    ("/chatbot", "chatbot.html"),
    ("/retirmentcalc", "retirmentcalc.html"),
    ("/portfolio", "portfolio.html"),
    ("/taxes", "taxes.html"),
];

/// 读取模板并返回，模板缺失视为配置错误（404）
pub async fn render_page(
    state: web::Data<AppState>,
    template: &'static str,
) -> Result<HttpResponse, AppError> {
    let path = state.template_dir.join(template);
    match tokio::fs::read(&path).await {
        Ok(content) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::error!("模板不存在: {}", path.display());
            Err(AppError::TemplateNotFound(template.to_string()))
        }
        Err(e) => {
            log::error!("读取模板 {} 失败: {}", path.display(), e);
            Err(AppError::Configuration(format!("cannot read template {}", template)))
        }
    }
}

/// 页面同时响应 GET 和 HEAD
pub fn config(cfg: &mut web::ServiceConfig) {
    for &(path, template) in PAGES {
        cfg.route(
            path,
            web::route()
                .guard(guard::Any(guard::Get()).or(guard::Head()))
                .to(move |state: web::Data<AppState>| render_page(state, template)),
        );
    }
}
