//! 行情数据模型
//!
//! 包含对外响应结构和行情 API 的原始响应结构

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 市场概览图表序列
///
/// `prices` 与 `timestamps` 按时间顺序一一对应
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    /// 收盘价
    pub prices: Vec<f64>,
    /// 日期（YYYY-MM-DD）
    pub timestamps: Vec<String>,
}

impl ChartSeries {
    pub fn push(&mut self, date: String, close: f64) {
        self.timestamps.push(date);
        self.prices.push(close);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// 单个代码的报价结果，成功与失败二选一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TickerQuote {
    Price { current_price: f64 },
    Error { error: String },
}

/// 代码 -> 报价，按代码排序输出
pub type TickerQuotes = BTreeMap<String, TickerQuote>;

// ==================== 行情 API 原始响应 ====================

/// GET /v8/finance/chart/{symbol}
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartApiError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    /// Unix 时间戳（秒）
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartMeta {
    #[serde(rename = "exchangeTimezoneName")]
    pub exchange_timezone_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseIndicator>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdjCloseIndicator {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResult {
    /// 按时间顺序返回 (时间戳, 收盘价)，优先使用复权收盘价，跳过空值
    pub fn closes(&self) -> Vec<(i64, f64)> {
        let column = self
            .indicators
            .adjclose
            .first()
            .map(|a| &a.adjclose)
            .filter(|c| !c.is_empty())
            .or_else(|| self.indicators.quote.first().map(|q| &q.close));

        let Some(column) = column else {
            return Vec::new();
        };

        self.timestamp
            .iter()
            .zip(column.iter())
            .filter_map(|(ts, close)| match close {
                Some(v) if v.is_finite() => Some((*ts, *v)),
                _ => None,
            })
            .collect()
    }
}
