//! 多代码最新价格

use futures::future::join_all;

use crate::error::AppError;
use crate::models::{TickerQuote, TickerQuotes};
use crate::services::round2;

use super::MarketDataService;

impl MarketDataService {
    /// 并发查询多个代码的最新收盘价
    ///
    /// 每个代码独立成败，失败的代码记录 `error` 字段，其余代码照常返回
    pub async fn get_quotes(&self, symbols: &[String]) -> TickerQuotes {
        let lookups = symbols.iter().map(|symbol| async move {
            log::info!("获取 {} 最新价格", symbol);
            let quote = match self.get_last_close(symbol).await {
                Ok(price) => TickerQuote::Price {
                    current_price: round2(price),
                },
                Err(e) => {
                    log::error!("获取 {} 价格失败: {}", symbol, e);
                    TickerQuote::Error {
                        error: format!("Could not fetch price: {}", e),
                    }
                }
            };
            (symbol.clone(), quote)
        });

        join_all(lookups).await.into_iter().collect()
    }

    /// 获取单个代码最近一个交易日的收盘价
    pub async fn get_last_close(&self, symbol: &str) -> Result<f64, AppError> {
        let result = self.fetch_chart(symbol, "1d", "1d").await?;
        result
            .closes()
            .last()
            .map(|(_, close)| *close)
            .ok_or_else(|| AppError::NoData(symbol.to_string()))
    }
}
