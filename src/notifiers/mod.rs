pub mod line;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("push request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push rejected with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// 推送通道特性，每个周期组好的消息都通过它送出
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// 推送一条文字消息
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}
