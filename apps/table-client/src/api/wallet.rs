//! Wallet balance collaborator.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ClientError;

#[async_trait]
pub trait WalletApi: Send + Sync {
    async fn fetch_balance(&self) -> Result<f64, ClientError>;
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: f64,
}

/// `GET {api_url}/wallet/balance`, optionally with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpWalletApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpWalletApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn balance_url(&self) -> String {
        format!("{}/wallet/balance", self.base_url)
    }
}

#[async_trait]
impl WalletApi for HttpWalletApi {
    async fn fetch_balance(&self) -> Result<f64, ClientError> {
        let mut request = self.http.get(self.balance_url());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                detail,
            });
        }
        let body: BalanceResponse = response.json().await?;
        Ok(body.balance)
    }
}

/// Last known balance plus fetch state, for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletBalance {
    balance: Option<f64>,
    loading: bool,
    error: Option<String>,
}

impl WalletBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Option<f64> {
        self.balance
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Server-pushed balance; wins over any pending fetch error.
    pub fn set(&mut self, balance: f64) {
        self.balance = Some(balance);
        self.error = None;
    }

    pub async fn refresh(&mut self, api: &dyn WalletApi) -> Result<f64, ClientError> {
        self.loading = true;
        let result = api.fetch_balance().await;
        self.loading = false;
        match &result {
            Ok(balance) => {
                debug!(balance, "wallet balance refreshed");
                self.set(*balance);
            }
            Err(err) => {
                warn!(error = %err, "wallet balance refresh failed");
                self.error = Some(err.to_string());
            }
        }
        result
    }

    pub fn label(&self) -> String {
        match (self.loading, self.balance, &self.error) {
            (true, _, _) => "...".to_string(),
            (false, _, Some(_)) => "Error".to_string(),
            (false, Some(balance), None) => format!("${balance:.2}"),
            (false, None, None) => "-".to_string(),
        }
    }
}
