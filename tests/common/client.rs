//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per catalog endpoint. When routes change,
//! update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}/v1{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    // ========================================================================
    // Albums
    // ========================================================================

    pub async fn post_album(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/v1/albums", self.base_url))
            .json(body)
            .send()
            .await
            .expect("POST album request failed")
    }

    /// Sends a raw body, for malformed-request tests
    pub async fn post_album_raw(&self, body: &'static str) -> Response {
        self.client
            .post(format!("{}/v1/albums", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST album request failed")
    }

    pub async fn get_album(&self, id: i64) -> Response {
        self.get(&format!("/albums/{}", id)).await
    }

    pub async fn get_album_songs(&self, id: i64) -> Response {
        self.get(&format!("/albums/{}/songs", id)).await
    }

    // ========================================================================
    // Songs
    // ========================================================================

    pub async fn get_song(&self, id: i64) -> Response {
        self.get(&format!("/songs/{}", id)).await
    }

    // ========================================================================
    // Artists
    // ========================================================================

    pub async fn get_artist(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}", id)).await
    }

    pub async fn get_artist_songs(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}/songs", id)).await
    }

    pub async fn get_artist_albums(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}/albums", id)).await
    }

    pub async fn get_artist_avg_length(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}/avg-length", id)).await
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub async fn get_top_length(&self, n: Option<usize>) -> Response {
        match n {
            Some(n) => self.get(&format!("/stats/top-length?n={}", n)).await,
            None => self.get("/stats/top-length").await,
        }
    }
}
