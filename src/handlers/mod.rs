//! HTTP 路由注册
//!
//! - /api/*: JSON 接口
//! - 其余路径: 静态页面

pub mod chat;
pub mod health;
pub mod market;
pub mod pages;
pub mod retirement;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::config)
            .configure(market::config)
            .configure(retirement::config)
            .configure(chat::config),
    )
    .configure(pages::config);
}
