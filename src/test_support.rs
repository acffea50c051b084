//! 测试辅助：本地模拟上游服务

use actix_web::{web, App, HttpServer};
use serde_json::{json, Value};

/// 在 127.0.0.1 随机端口启动模拟上游，返回根地址
pub fn spawn_upstream<F>(routes: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(routes.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock upstream");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

/// 构造图表接口响应，`None` 表示该K线收盘价为空
pub fn chart_body(symbol: &str, bars: &[(i64, Option<f64>)]) -> Value {
    let timestamps: Vec<i64> = bars.iter().map(|(ts, _)| *ts).collect();
    let closes: Vec<Option<f64>> = bars.iter().map(|(_, close)| *close).collect();
    json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": symbol,
                    "exchangeTimezoneName": "America/New_York"
                },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{"close": closes}]
                }
            }],
            "error": null
        }
    })
}
