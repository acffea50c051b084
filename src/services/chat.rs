//! 对话补全代理
//!
//! 将客户端 JSON 原样转发到上游对话补全接口，附加服务端持有的 Bearer 凭证，
//! 并原样返回上游 JSON

use anyhow::Context;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::config::ChatConfig;
use crate::error::AppError;

/// 上游响应（状态码 + JSON）
#[derive(Debug)]
pub struct ChatReply {
    pub status: u16,
    pub body: Value,
}

#[derive(Clone)]
pub struct ChatProxy {
    client: Client,
    endpoint: Url,
    /// 为空表示未配置
    api_key: String,
}

impl fmt::Debug for ChatProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatProxy")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &if self.has_credential() { "<redacted>" } else { "<unset>" })
            .finish()
    }
}

impl ChatProxy {
    pub fn new(config: &ChatConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("创建对话 HTTP 客户端失败")?;
        Self::with_client(client, &config.endpoint, &config.api_key)
    }

    pub fn with_client(client: Client, endpoint: &str, api_key: &str) -> anyhow::Result<Self> {
        let endpoint =
            Url::parse(endpoint).with_context(|| format!("对话接口地址无效: {}", endpoint))?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// 转发一次请求，不重试，不校验载荷结构
    pub async fn forward(&self, payload: &Value) -> Result<ChatReply, AppError> {
        if !self.has_credential() {
            return Err(AppError::Configuration(
                "chat completion credential is not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Upstream(format!(
                "chat completion provider returned {} with a non-JSON body: {}",
                status, e
            ))
        })?;

        if !status.is_success() {
            log::warn!("对话上游返回状态 {}", status);
        }

        Ok(ChatReply {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use actix_web::{web, HttpRequest, HttpResponse};
    use serde_json::json;

    fn echo_upstream() -> String {
        spawn_upstream(|cfg| {
            cfg.route(
                "/v1/chat/completions",
                web::post().to(|req: HttpRequest, body: web::Json<Value>| async move {
                    let auth = req
                        .headers()
                        .get("Authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    if auth != "Bearer sk-test" {
                        return HttpResponse::Unauthorized()
                            .json(json!({"error": {"message": "Incorrect API key provided"}}));
                    }
                    HttpResponse::Ok().json(json!({
                        "object": "chat.completion",
                        "echo": body.into_inner(),
                    }))
                }),
            );
            cfg.route(
                "/broken",
                web::post().to(|| async { HttpResponse::BadGateway().body("upstream exploded") }),
            );
        })
    }

    #[actix_web::test]
    async fn test_forward_attaches_bearer_and_relays_body() {
        let base = echo_upstream();
        let proxy = ChatProxy::with_client(
            Client::new(),
            &format!("{}/v1/chat/completions", base),
            "sk-test",
        )
        .unwrap();

        let payload = json!({"model": "gpt-4o-mini", "messages": [{"role": "user", "content": "What is a Roth IRA?"}]});
        let reply = proxy.forward(&payload).await.unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["object"], "chat.completion");
        assert_eq!(reply.body["echo"], payload);
    }

    #[actix_web::test]
    async fn test_forward_relays_upstream_error_status() {
        let base = echo_upstream();
        let proxy = ChatProxy::with_client(
            Client::new(),
            &format!("{}/v1/chat/completions", base),
            "sk-wrong",
        )
        .unwrap();

        let reply = proxy.forward(&json!({})).await.unwrap();
        assert_eq!(reply.status, 401);
        assert_eq!(reply.body["error"]["message"], "Incorrect API key provided");
    }

    #[actix_web::test]
    async fn test_forward_non_json_is_upstream_error() {
        let base = echo_upstream();
        let proxy = ChatProxy::with_client(Client::new(), &format!("{}/broken", base), "sk-test").unwrap();

        let err = proxy.forward(&json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[actix_web::test]
    async fn test_debug_redacts_credential() {
        let proxy = ChatProxy::with_client(Client::new(), "http://127.0.0.1:9/v1/chat/completions", "sk-secret").unwrap();
        let text = format!("{:?}", proxy);
        assert!(!text.contains("sk-secret"));
        assert!(text.contains("<redacted>"));
        assert!(text.contains("http://127.0.0.1:9/v1/chat/completions"));
    }

    #[actix_web::test]
    async fn test_missing_credential() {
        let proxy = ChatProxy::with_client(Client::new(), "http://127.0.0.1:9/v1/chat/completions", "").unwrap();
        let err = proxy.forward(&json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
