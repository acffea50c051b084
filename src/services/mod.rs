//! 业务逻辑服务模块
//!
//! 封装数据获取和处理逻辑

pub mod chat;        // 对话补全代理
pub mod market;      // 行情数据服务
pub mod retirement;  // 401(k) 计算器

/// 保留两位小数，四舍五入（远离零方向）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
