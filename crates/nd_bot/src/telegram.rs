//! Minimal Telegram Bot API client: long polling plus the handful of
//! send methods the digest bot needs.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use nd_core::{Error, Result};

use crate::text::{chunk_text, CHUNK_SIZE};

const API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub first_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: format!("{API_BASE}/bot{token}"),
        })
    }

    #[cfg(test)]
    fn with_base_url(token: &str, base: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{base}/bot{token}"),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(payload)
            .timeout(timeout)
            .send()
            .await?;

        let body: ApiResponse<T> = response.json().await?;
        if !body.ok {
            return Err(Error::Chat(
                body.description
                    .unwrap_or_else(|| format!("{method} failed without description")),
            ));
        }
        body.result
            .ok_or_else(|| Error::Chat(format!("{method} returned no result")))
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: i64, poll_secs: u64) -> Result<Vec<Update>> {
        let payload = json!({
            "offset": offset,
            "timeout": poll_secs,
            "allowed_updates": ["message"],
        });
        // Leave headroom over the server-side poll window.
        let timeout = Duration::from_secs(poll_secs + 10);
        let updates: Vec<Update> = self.call("getUpdates", &payload, timeout).await?;
        if !updates.is_empty() {
            debug!(count = updates.len(), "received updates");
        }
        Ok(updates)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str, markdown: bool) -> Result<()> {
        let mut payload = json!({ "chat_id": chat_id, "text": text });
        if markdown {
            payload["parse_mode"] = json!("MarkdownV2");
        }
        self.call::<serde_json::Value>("sendMessage", &payload, Duration::from_secs(30))
            .await?;
        Ok(())
    }

    /// Send long text in chunks that stay under the platform limit.
    pub async fn send_long_message(&self, chat_id: i64, text: &str, markdown: bool) -> Result<()> {
        for chunk in chunk_text(text, CHUNK_SIZE) {
            self.send_message(chat_id, &chunk, markdown).await?;
        }
        Ok(())
    }

    pub async fn send_typing(&self, chat_id: i64) -> Result<()> {
        let payload = json!({ "chat_id": chat_id, "action": "typing" });
        self.call::<serde_json::Value>("sendChatAction", &payload, Duration::from_secs(30))
            .await?;
        Ok(())
    }

    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<()> {
        let payload = json!({ "commands": commands });
        self.call::<serde_json::Value>("setMyCommands", &payload, Duration::from_secs(30))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_payload_deserializes() {
        let json = r#"{
            "ok": true,
            "result": [{
                "update_id": 12,
                "message": {
                    "message_id": 7,
                    "chat": {"id": 42, "type": "private"},
                    "from": {"id": 9, "is_bot": false, "first_name": "Ada"},
                    "text": "/digest"
                }
            }]
        }"#;

        let body: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(body.ok);
        let updates = body.result.unwrap();
        assert_eq!(updates[0].update_id, 12);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.from.as_ref().unwrap().first_name, "Ada");
        assert_eq!(message.text.as_deref(), Some("/digest"));
    }

    #[test]
    fn error_payload_keeps_the_description() {
        let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let body: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!body.ok);
        assert_eq!(body.description.as_deref(), Some("Unauthorized"));
    }

    #[tokio::test]
    async fn api_level_failure_surfaces_as_chat_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let body = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
                let reply = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
            }
        });

        let client = TelegramClient::with_base_url("bad-token", &format!("http://{addr}"));
        match client.send_message(1, "hello", false).await {
            Err(Error::Chat(description)) => assert_eq!(description, "Unauthorized"),
            other => panic!("expected Chat error, got {other:?}"),
        }
    }
}
