//! 公共常量和辅助函数

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::StatusCode;
use url::Url;

use crate::error::AppError;
use crate::models::{ChartEnvelope, ChartMeta, ChartResult};

/// 浏览器 User-Agent，行情接口会拒绝缺省 UA
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// 行情接口未找到代码时返回的错误码
const NOT_FOUND_CODE: &str = "Not Found";

/// 交易所时区缺失时使用纽约时间
const DEFAULT_EXCHANGE_TZ: Tz = chrono_tz::America::New_York;

/// 拼接图表接口地址: {base}/v8/finance/chart/{symbol}
pub fn chart_url(base: &Url, symbol: &str) -> Result<Url, AppError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::Configuration(format!("invalid market data base url: {}", base)))?
        .pop_if_empty()
        .extend(["v8", "finance", "chart", symbol]);
    Ok(url)
}

/// 将 Unix 时间戳转换为交易所当地日期（YYYY-MM-DD）
pub fn exchange_date(ts: i64, tz: Tz) -> Option<String> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.with_timezone(&tz).format("%Y-%m-%d").to_string())
}

/// 从元数据中解析交易所时区
pub fn exchange_tz(meta: &ChartMeta) -> Tz {
    meta.exchange_timezone_name
        .as_deref()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(DEFAULT_EXCHANGE_TZ)
}

/// 解析图表接口响应
///
/// 上游返回 "Not Found" 或结果为空时视为无数据，其余错误视为上游故障
pub fn parse_chart_response(
    status: StatusCode,
    body: &str,
    symbol: &str,
) -> Result<ChartResult, AppError> {
    let envelope: ChartEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(AppError::Upstream(format!(
                "market data provider returned {} for {}",
                status, symbol
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(err) = envelope.chart.error {
        if err.code == NOT_FOUND_CODE {
            return Err(AppError::NoData(symbol.to_string()));
        }
        return Err(AppError::Upstream(format!(
            "market data provider error for {}: {} {}",
            symbol, err.code, err.description
        )));
    }

    if !status.is_success() {
        return Err(AppError::Upstream(format!(
            "market data provider returned {} for {}",
            status, symbol
        )));
    }

    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::NoData(symbol.to_string()))
}
