//! 行情接口处理器
//!
//! - GET /api/market-overview - 市场概览收盘价序列
//! - GET /api/tickers - 多代码最新价格

use actix_web::{web, HttpResponse, Result};

use crate::models::ErrorBody;
use crate::state::AppState;

/// 市场概览图表
///
/// 任何失败（含无数据）均返回 500 和 `{"error": ...}`
pub async fn market_overview(state: web::Data<AppState>) -> Result<HttpResponse> {
    let chart = &state.chart;
    match state
        .market
        .get_chart_series(&chart.symbol, &chart.range, &chart.interval)
        .await
    {
        Ok(series) => Ok(HttpResponse::Ok().json(series)),
        Err(e) => {
            log::error!("获取 {} 市场概览失败: {}", chart.symbol, e);
            Ok(HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())))
        }
    }
}

/// 报价列表，单个代码失败只影响该代码
pub async fn tickers(state: web::Data<AppState>) -> Result<HttpResponse> {
    let quotes = state.market.get_quotes(&state.tickers).await;
    Ok(HttpResponse::Ok().json(quotes))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/market-overview", web::get().to(market_overview))
        .route("/tickers", web::get().to(tickers));
}
