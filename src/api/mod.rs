use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://collectionapi.metmuseum.org/public/collection/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: u32,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DepartmentsResponse {
    pub(crate) departments: Vec<Department>,
}

// wire shape of the id-source endpoints; objectIDs is null for empty departments
#[derive(Debug, Deserialize)]
pub(crate) struct IdSetResponse {
    #[serde(default)]
    pub(crate) total: usize,
    #[serde(rename = "objectIDs")]
    pub(crate) object_ids: Option<Vec<u64>>,
}

/// Ordered object-id sequence for one department, plus the catalog's reported
/// total. Fetched once per department selection and cached by the view until
/// the department changes.
#[derive(Clone, Debug, Default)]
pub struct IdSet {
    pub ids: Vec<u64>,
    pub total: usize,
}

pub(crate) fn normalize_id_set(raw: IdSetResponse) -> IdSet {
    let ids = raw.object_ids.unwrap_or_default();
    let total = if raw.total == 0 { ids.len() } else { raw.total };
    IdSet { ids, total }
}

/// One catalog entry. Every field beyond the identifier may be absent; the
/// catalog reports absence as an empty string and renderers must omit the
/// line rather than print a placeholder.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectRecord {
    #[serde(rename = "objectID")]
    pub object_id: u64,
    pub department: String,
    pub title: String,
    pub artist_display_name: String,
    pub object_date: String,
    pub primary_image: String,
    pub primary_image_small: String,
    pub medium: String,
    pub culture: String,
    pub period: String,
    pub credit_line: String,
}

impl ObjectRecord {
    pub fn has_thumbnail(&self) -> bool {
        !self.primary_image_small.trim().is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base: String,
    pub timeout_seconds: u64,
    pub rate: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: 10,
            rate: 50,
        }
    }
}

pub struct CatalogClient {
    http: reqwest::Client,
    api_base: String,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl CatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("metbrowse/0.2"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let rate = std::num::NonZeroU32::new(config.rate.max(1)).unwrap();
        let limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            limiter,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        self.limiter.until_ready().await;
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }
        resp.json::<T>().await.map_err(|e| ApiError::Decode { url, source: e })
    }

    pub async fn departments(&self) -> Result<Vec<Department>, ApiError> {
        let url = format!("{}/departments", self.api_base);
        let body: DepartmentsResponse = self.get_json(url).await?;
        Ok(body.departments)
    }

    /// Id source over the plain objects endpoint.
    pub async fn object_ids(&self, department_id: u32) -> Result<IdSet, ApiError> {
        let url = format!("{}/objects?departmentIds={}", self.api_base, department_id);
        let body: IdSetResponse = self.get_json(url).await?;
        Ok(normalize_id_set(body))
    }

    /// Id source over the search endpoint, pre-filtered to objects the
    /// catalog says carry images.
    pub async fn search_object_ids(&self, department_id: u32) -> Result<IdSet, ApiError> {
        let url = format!(
            "{}/search?departmentId={}&hasImages=true&q=*",
            self.api_base, department_id
        );
        let body: IdSetResponse = self.get_json(url).await?;
        Ok(normalize_id_set(body))
    }

    pub async fn object(&self, object_id: u64) -> Result<ObjectRecord, ApiError> {
        let url = format!("{}/objects/{}", self.api_base, object_id);
        self.get_json(url).await
    }
}
