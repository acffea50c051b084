//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，密钥通过环境变量注入

use anyhow::{anyhow, bail, Context};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
    /// 调试模式（默认日志级别提升为 debug）
    #[serde(default)]
    pub debug: bool,
}

/// 行情数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// 行情 API 根地址
    #[serde(default = "default_market_base_url")]
    pub base_url: String,
    /// 市场概览图表使用的代码
    #[serde(default = "default_chart_symbol")]
    pub chart_symbol: String,
    /// 图表时间范围
    #[serde(default = "default_chart_range")]
    pub chart_range: String,
    /// 图表K线周期
    #[serde(default = "default_chart_interval")]
    pub chart_interval: String,
    /// 报价列表
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 对话补全上游配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// 上游接口地址
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,
    /// API Key（通常由环境变量提供）
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 页面模板配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    /// 模板目录
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 配置来源，日志系统初始化后再输出
#[derive(Debug)]
pub enum ConfigSource {
    File(&'static str),
    Invalid(&'static str, String),
    Default,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_chat_timeout() -> u64 { 120 }
fn default_log_level() -> String { "info".to_string() }
fn default_market_base_url() -> String { "https://query1.finance.yahoo.com".to_string() }
fn default_chart_symbol() -> String { "SPY".to_string() }
fn default_chart_range() -> String { "1mo".to_string() }
fn default_chart_interval() -> String { "1d".to_string() }
fn default_chat_endpoint() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_template_dir() -> PathBuf { PathBuf::from("templates") }

fn default_tickers() -> Vec<String> {
    ["QQQ", "DIA", "VGK", "NVDA", "VTI", "SCHG"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
            debug: false,
        }
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            chart_symbol: default_chart_symbol(),
            chart_range: default_chart_range(),
            chart_interval: default_chart_interval(),
            tickers: default_tickers(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_chat_endpoint(),
            api_key: String::new(),
            timeout_secs: default_chat_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值；随后应用环境变量覆盖
    pub fn load() -> (Self, ConfigSource) {
        let config_paths = ["config.json", "config/config.json"];
        let mut source = ConfigSource::Default;
        let mut config = None;

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(loaded) => {
                        config = Some(loaded);
                        source = ConfigSource::File(path);
                        break;
                    }
                    Err(e) => {
                        source = ConfigSource::Invalid(path, e.to_string());
                    }
                }
            }
        }

        let mut config = config.unwrap_or_default();
        config.apply_env();
        (config, source)
    }

    /// 环境变量覆盖：CHAT_API_KEY（回退 OPENAI_API_KEY）、PORT
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// 按给定查找函数应用覆盖，空白值视为未设置
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = non_blank("CHAT_API_KEY").or_else(|| non_blank("OPENAI_API_KEY")) {
            self.chat.api_key = key;
        }
        if let Some(port) = non_blank("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// 校验配置，并将报价代码统一为大写
    pub fn validate(&mut self) -> anyhow::Result<()> {
        Url::parse(&self.market_data.base_url)
            .with_context(|| format!("行情地址无效: {}", self.market_data.base_url))?;
        Url::parse(&self.chat.endpoint)
            .with_context(|| format!("对话接口地址无效: {}", self.chat.endpoint))?;

        if self.market_data.tickers.is_empty() {
            bail!("报价列表为空");
        }

        let pattern = Regex::new(r"^[A-Z0-9.^=-]{1,16}$")?;
        let chart_symbol = self.market_data.chart_symbol.trim().to_uppercase();
        if !pattern.is_match(&chart_symbol) {
            return Err(anyhow!("图表代码无效: {}", self.market_data.chart_symbol));
        }
        self.market_data.chart_symbol = chart_symbol;

        let mut seen = HashSet::new();
        for ticker in self.market_data.tickers.iter_mut() {
            let normalized = ticker.trim().to_uppercase();
            if !pattern.is_match(&normalized) {
                return Err(anyhow!("报价代码无效: {}", ticker));
            }
            if !seen.insert(normalized.clone()) {
                return Err(anyhow!("报价代码重复: {}", normalized));
            }
            *ticker = normalized;
        }
        Ok(())
    }

    /// 日志默认过滤级别
    pub fn log_filter(&self) -> String {
        if self.server.debug {
            "debug".to_string()
        } else {
            self.log.level.clone()
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
