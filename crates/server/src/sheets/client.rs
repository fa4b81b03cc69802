//! Google Sheets API client implementation.
//!
//! Uses the v4 REST values endpoints with `reqwest`. Authentication is a
//! bearer token minted outside this process (service credentials are out of
//! scope here); the client only carries it.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::SheetsConfig;

use super::{SheetStore, SheetsError, ValueGrid};

/// Client for the Google Sheets v4 values API.
///
/// Cheaply cloneable; all submissions and reference reloads in the process
/// share one HTTP connection pool.
#[derive(Clone)]
pub struct SheetsClient {
    inner: Arc<SheetsClientInner>,
}

struct SheetsClientInner {
    client: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    access_token: String,
}

/// Response shape of `values.get`.
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: ValueGrid,
}

impl SheetsClient {
    /// Create a new Sheets API client.
    #[must_use]
    pub fn new(config: &SheetsConfig) -> Self {
        Self {
            inner: Arc::new(SheetsClientInner {
                client: reqwest::Client::new(),
                api_base: config.api_base.clone(),
                spreadsheet_id: config.spreadsheet_id.clone(),
                access_token: config.api_token.expose_secret().to_string(),
            }),
        }
    }

    fn values_url(&self, table: &str, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.inner.api_base,
            self.inner.spreadsheet_id,
            urlencoding::encode(table),
            suffix
        )
    }

    async fn check_response(
        table: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SheetsError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SheetsError::TableNotFound(table.to_owned()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

impl SheetStore for SheetsClient {
    async fn read_table(&self, table: &str) -> Result<ValueGrid, SheetsError> {
        let url = self.values_url(table, "?majorDimension=ROWS");

        debug!(table, "reading sheet table");

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.access_token)
            .send()
            .await?;

        let response = Self::check_response(table, response).await?;

        let parsed: ValuesResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        Ok(parsed.values)
    }

    async fn append_row(&self, table: &str, row: Vec<Value>) -> Result<(), SheetsError> {
        let url = self.values_url(table, ":append?valueInputOption=USER_ENTERED");

        debug!(table, columns = row.len(), "appending row");

        let body = serde_json::json!({ "values": [row] });

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.access_token)
            .json(&body)
            .send()
            .await?;

        Self::check_response(table, response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn test_config() -> SheetsConfig {
        SheetsConfig {
            api_base: "https://sheets.googleapis.com".to_owned(),
            spreadsheet_id: "sheet-id-123".to_owned(),
            api_token: SecretString::from("token"),
        }
    }

    #[test]
    fn test_values_url_encodes_table_names() {
        let client = SheetsClient::new(&test_config());
        let url = client.values_url("AUDITORIA BODEGA", "?majorDimension=ROWS");
        assert_eq!(
            url,
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id-123/values/AUDITORIA%20BODEGA?majorDimension=ROWS"
        );
    }

    #[test]
    fn test_values_url_append_suffix() {
        let client = SheetsClient::new(&test_config());
        let url = client.values_url("WAREHOUSE", ":append?valueInputOption=USER_ENTERED");
        assert!(url.ends_with("/values/WAREHOUSE:append?valueInputOption=USER_ENTERED"));
    }
}
