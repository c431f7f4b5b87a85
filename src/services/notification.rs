// src/services/notification.rs

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub const CONFIRMATION_SUBJECT: &str = "Booking Confirmation";
pub const CONFIRMATION_BODY: &str = "Your booking is confirmed.";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Falha no envio HTTP: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook recusou a mensagem com status {0}")]
    Rejected(reqwest::StatusCode),
}

/// Canal de saída das confirmações. Quem chama decide o que fazer com a falha;
/// na admissão de reservas ela só é logada.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// Padrão quando nenhum webhook está configurado: só registra no log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        tracing::info!(to, subject, body, "📧 Notificação registrada");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Entrega a mensagem como JSON num endpoint HTTP (gateway de e-mail externo).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookMessage { to, subject, body })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotificationError::Rejected(response.status()));
        }

        Ok(())
    }
}
