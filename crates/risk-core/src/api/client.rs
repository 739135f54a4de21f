// HTTP implementation of `RiskApi` using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{OddsRecord, PlayerRecord, TeamRecord, TerritoryRecord, TerritoryTurn};
use super::{ApiError, ApiResult, Endpoint, RiskApi};
use crate::config::ApiConfig;

/// `RiskApi` backed by the live service.
#[derive(Debug, Clone)]
pub struct HttpRiskApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRiskApi {
    /// Build a client for `base_url` (no trailing slash) with a per-request
    /// timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cfbrisk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Build)?;
        Ok(HttpRiskApi {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let shown = format!("{}{}", self.base_url, endpoint);
        debug!(url = %shown, "GET");

        let response = self
            .http
            .get(&url)
            .query(&endpoint.query())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: shown.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url: shown, status });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: shown.clone(),
            source,
        })?;
        decode(&shown, &body)
    }
}

/// Decode a response body, attributing failures to `url`.
pub(crate) fn decode<T: DeserializeOwned>(url: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl RiskApi for HttpRiskApi {
    async fn teams(&self) -> ApiResult<Vec<TeamRecord>> {
        self.get(Endpoint::Teams).await
    }

    async fn team_players(&self, team: &str, season: u32, day: u32) -> ApiResult<Vec<PlayerRecord>> {
        self.get(Endpoint::TeamPlayers {
            team: team.to_string(),
            season,
            day,
        })
        .await
    }

    async fn territories(&self, season: u32, day: u32) -> ApiResult<Vec<TerritoryRecord>> {
        self.get(Endpoint::Territories { season, day }).await
    }

    async fn team_odds(&self, team: &str, season: u32, day: u32) -> ApiResult<Vec<OddsRecord>> {
        self.get(Endpoint::TeamOdds {
            team: team.to_string(),
            season,
            day,
        })
        .await
    }

    async fn territory_turn(
        &self,
        territory: &str,
        season: u32,
        day: u32,
    ) -> ApiResult<TerritoryTurn> {
        self.get(Endpoint::TerritoryTurn {
            territory: territory.to_string(),
            season,
            day,
        })
        .await
    }
}
