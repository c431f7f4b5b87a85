// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{BookingRepository, CatalogRepository, GuestRepository, ReviewRepository},
    services::{
        booking_service::BookingService,
        notification::{LogNotifier, Notifier, WebhookNotifier},
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub notify_webhook_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections,
            notify_webhook_url: lookup("NOTIFY_WEBHOOK_URL").filter(|url| !url.is_empty()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_repo: CatalogRepository,
    pub guest_repo: GuestRepository,
    pub review_repo: ReviewRepository,
    pub booking_service: BookingService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let notifier: Arc<dyn Notifier> = match &settings.notify_webhook_url {
            Some(url) => {
                tracing::info!(%url, "📧 Confirmações serão enviadas via webhook");
                Arc::new(WebhookNotifier::new(url.clone()))
            }
            None => Arc::new(LogNotifier),
        };

        // --- Monta o gráfico de dependências ---
        let booking_service = BookingService::new(
            Arc::new(BookingRepository::new(db_pool.clone())),
            notifier,
        );

        Ok(Self {
            catalog_repo: CatalogRepository::new(db_pool.clone()),
            guest_repo: GuestRepository::new(db_pool.clone()),
            review_repo: ReviewRepository::new(db_pool.clone()),
            booking_service,
            db_pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_database_is_set() {
        let settings =
            Settings::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/hotel")]))
                .unwrap();

        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(settings.notify_webhook_url, None);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(Settings::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/hotel"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("NOTIFY_WEBHOOK_URL", "http://mailer/send"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_addr, "127.0.0.1:8080");
        assert_eq!(settings.max_connections, 12);
        assert_eq!(settings.notify_webhook_url.as_deref(), Some("http://mailer/send"));

        let bad = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/hotel"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]));
        assert!(bad.is_err());
    }
}
