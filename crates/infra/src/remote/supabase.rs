use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::{RemoteError, RemoteSource};

#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub key: SecretString,
}

/// PostgREST reader for a Supabase project.
pub struct SupabaseSource {
    client: Client,
    settings: SupabaseSettings,
}

impl SupabaseSource {
    pub fn new(settings: SupabaseSettings) -> Self {
        Self { client: Client::new(), settings }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}?select=*", self.settings.url.trim_end_matches('/'), table)
    }
}

#[async_trait]
impl RemoteSource for SupabaseSource {
    async fn fetch_table(&self, table: &str) -> Result<Vec<JsonValue>, RemoteError> {
        let url = self.table_url(table);
        debug!(%url, "fetching remote table");

        let key = self.settings.key.expose_secret();
        let response = self
            .client
            .get(&url)
            .header("apikey", key.as_str())
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status { status: status.as_u16(), message });
        }

        response.json::<Vec<JsonValue>>().await.map_err(|e| RemoteError::Decode {
            table: table.to_string(),
            message: e.to_string(),
        })
    }

    fn source_name(&self) -> &'static str {
        "supabase"
    }
}
