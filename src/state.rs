//! 进程级共享状态
//!
//! 启动时由配置构建一次，之后只读

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::services::chat::ChatProxy;
use crate::services::market::MarketDataService;

/// 市场概览图表参数
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub symbol: String,
    pub range: String,
    pub interval: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub market: MarketDataService,
    pub chart: ChartSettings,
    /// 报价列表（大写）
    pub tickers: Vec<String>,
    pub chat: ChatProxy,
    /// 页面模板目录
    pub template_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let market_data = &config.market_data;
        Ok(Self {
            market: MarketDataService::new(market_data)?,
            chart: ChartSettings {
                symbol: market_data.chart_symbol.clone(),
                range: market_data.chart_range.clone(),
                interval: market_data.chart_interval.clone(),
            },
            tickers: market_data.tickers.clone(),
            chat: ChatProxy::new(&config.chat)?,
            template_dir: config.pages.template_dir.clone(),
        })
    }
}
