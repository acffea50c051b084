//! 行情数据服务
//!
//! 对接 Yahoo Finance 图表接口，提供市场概览K线序列和多代码最新价格
//!
//! ## 主要功能
//! - 指定代码的日K线收盘价序列
//! - 多个代码并发查询最新收盘价，单个代码失败不影响其他代码

mod chart;
mod common;
mod quote;

use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::MarketDataConfig;

/// 行情数据服务
///
/// 每个 worker 共享同一个实例，内部无可变状态
#[derive(Debug, Clone)]
pub struct MarketDataService {
    /// HTTP 客户端
    client: Client,
    /// 行情 API 根地址
    base_url: Url,
}

impl MarketDataService {
    /// 按配置创建服务实例（含请求超时和连接超时）
    pub fn new(config: &MarketDataConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .cookie_store(true)
            .gzip(true)
            .build()
            .context("创建行情 HTTP 客户端失败")?;
        Self::with_client(client, &config.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("行情地址无效: {}", base_url))?;
        Ok(Self { client, base_url })
    }
}
