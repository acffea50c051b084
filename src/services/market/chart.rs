//! 市场概览K线序列

use crate::error::AppError;
use crate::models::{ChartResult, ChartSeries};

use super::common::{chart_url, exchange_date, exchange_tz, parse_chart_response, USER_AGENT};
use super::MarketDataService;

impl MarketDataService {
    /// 获取指定代码的收盘价序列
    ///
    /// - period: 时间范围（如 1mo）
    /// - interval: K线周期（如 1d）
    ///
    /// 上游无数据时返回 `AppError::NoData`，不会返回空序列
    pub async fn get_chart_series(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<ChartSeries, AppError> {
        let result = self.fetch_chart(symbol, period, interval).await?;
        let series = build_series(&result);
        if series.is_empty() {
            return Err(AppError::NoData(symbol.to_string()));
        }
        log::debug!("{} 获取到 {} 条K线", symbol, series.len());
        Ok(series)
    }

    /// 请求图表接口，单次调用，不重试
    pub(super) async fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, AppError> {
        let url = chart_url(&self.base_url, symbol)?;
        log::debug!("请求K线数据 URL: {}?range={}&interval={}", url, range, interval);

        let response = self
            .client
            .get(url)
            .query(&[("range", range), ("interval", interval)])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        parse_chart_response(status, &text, symbol)
    }
}

/// 将原始响应转换为按日期排列的收盘价序列
fn build_series(result: &ChartResult) -> ChartSeries {
    let tz = exchange_tz(&result.meta);
    let mut series = ChartSeries::default();
    for (ts, close) in result.closes() {
        if let Some(date) = exchange_date(ts, tz) {
            series.push(date, close);
        }
    }
    series
}
