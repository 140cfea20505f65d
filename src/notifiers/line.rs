use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::notifiers::{Notifier, NotifyError};

/// LINE Messaging API 推送服务
pub struct LineNotifier {
    /// 推送接口地址
    endpoint: String,
    /// 接收消息的用户 ID
    user_id: String,
    /// Channel access token
    token: String,
    /// HTTP客户端
    client: Client,
}

#[derive(Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

impl LineNotifier {
    pub fn new(endpoint: &str, user_id: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            user_id: user_id.to_string(),
            token: token.to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for LineNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let payload = PushRequest {
            to: &self.user_id,
            messages: [TextMessage {
                kind: "text",
                text: message,
            }],
        };

        debug!("发送LINE推送到: {}", self.endpoint);

        let res = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("推送响应: {}", body);

        Ok(())
    }
}
