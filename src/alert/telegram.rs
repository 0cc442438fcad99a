//! Telegram alert delivery via the bot `sendMessage` endpoint.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use crate::alert::AlertDispatcher;

const TOKEN_ENV: &str = "TG_TOKEN";
const CHAT_ID_ENV: &str = "TG_CHAT_ID";

pub struct TelegramAlerter {
    http: reqwest::Client,
    token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramAlerter {
    /// Credentials come from `TG_TOKEN` / `TG_CHAT_ID`. Missing credentials
    /// are not fatal: the alerter warns and drops every message instead.
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV).ok().filter(|v| !v.is_empty());
        let chat_id = std::env::var(CHAT_ID_ENV).ok().filter(|v| !v.is_empty());
        if token.is_none() || chat_id.is_none() {
            log::warn!("⚠️ Missing Telegram credentials ({TOKEN_ENV}/{CHAT_ID_ENV}); alerts will be dropped");
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(TelegramAlerter {
            http,
            token,
            chat_id,
        })
    }
}

#[async_trait]
impl AlertDispatcher for TelegramAlerter {
    fn signature(&self) -> &'static str {
        "Telegram"
    }

    async fn send(&self, message: &str) -> Result<()> {
        let (Some(token), Some(chat_id)) = (&self.token, &self.chat_id) else {
            log::warn!("⚠️ Missing Telegram credentials, dropping alert");
            return Ok(());
        };

        let url = format!("https://api.telegram.org/bot{token}/sendMessage");
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": message,
            "parse_mode": "Markdown",
        });

        let res = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("telegram request failed")?;
        if !res.status().is_success() {
            bail!("telegram returned {}", res.status());
        }
        Ok(())
    }
}
