//! 理财教育网站后端服务
//!
//! 提供静态页面和 JSON 接口：市场概览、报价列表、401(k) 计算器、对话补全代理
//! 数据来源：Yahoo Finance、OpenAI 兼容的对话补全接口

mod config;     // 配置加载
mod error;      // 错误类型
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务
mod state;      // 共享状态

#[cfg(test)]
mod test_support;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::{AppConfig, ConfigSource};
use crate::state::AppState;

/// 构建 HTTP 服务器实例，路由由 handlers::config 注册
fn build_server(config: &AppConfig, state: AppState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    Ok(server.bind(config.bind_addr())?.run())
}

/// 应用程序入口
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (mut config, source) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先，其次为配置中的级别
    env_logger::init_from_env(Env::default().default_filter_or(config.log_filter()));

    match source {
        ConfigSource::File(path) => log::info!("从 {} 加载配置成功", path),
        ConfigSource::Invalid(path, e) => log::warn!("加载配置文件 {} 失败: {}，使用默认配置", path, e),
        ConfigSource::Default => log::info!("使用默认配置"),
    }

    if let Err(e) = config.validate() {
        log::error!("配置校验失败: {:#}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
    if config.chat.api_key.is_empty() {
        log::warn!("未设置 CHAT_API_KEY 环境变量，/api/chatgpt 将返回错误");
    }

    let state = AppState::from_config(&config).map_err(|e| {
        log::error!("初始化服务失败: {:#}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    log::info!("启动理财教育后端服务，监听 {}", config.bind_addr());
    build_server(&config, state)?.await
}
