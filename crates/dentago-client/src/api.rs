//! Dentago HTTP API.
//!
//! Every call returns the raw JSON body; envelope handling lives in
//! `envelope` so the transport can be swapped for a scripted one in tests.

use std::time::Duration;

use async_trait::async_trait;
use dentago_core::booking::AppointmentRequest;
use dentago_core::reviews::ReviewSubmission;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Remote endpoints used by the app.
#[async_trait]
pub trait DentagoApi: Send + Sync {
    /// `GET /public/doctors?page&limit&sort`
    async fn list_doctors(&self, page: u32, limit: u32, sort: &str) -> ClientResult<Value>;

    /// `GET /public/doctors/{id}`
    async fn get_doctor(&self, doctor_id: &str) -> ClientResult<Value>;

    /// `POST /public/appointments`
    async fn create_appointment(
        &self,
        request: &AppointmentRequest,
        token: Option<&str>,
    ) -> ClientResult<Value>;

    /// `GET /user/doctors`
    async fn user_appointments(&self, token: &str) -> ClientResult<Value>;

    /// `GET /favorites`
    async fn favorites(&self, token: &str) -> ClientResult<Value>;

    /// `POST /favorites/{id}`
    async fn add_favorite(&self, token: &str, doctor_id: &str) -> ClientResult<Value>;

    /// `DELETE /favorites/{id}`
    async fn remove_favorite(&self, token: &str, doctor_id: &str) -> ClientResult<Value>;

    /// `POST /public/doctors/{id}/reviews`
    async fn submit_review(
        &self,
        token: &str,
        doctor_id: &str,
        review: &ReviewSubmission,
    ) -> ClientResult<Value>;
}

/// `reqwest`-backed API client.
pub struct HttpApi {
    base_url: String,
    client: Client,
    timeout_secs: u64,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the JSON body, classifying failures.
    async fn send(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                ClientError::Network(format!("Cannot reach {}", self.base_url))
            } else {
                ClientError::from(e)
            }
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), path = %url, "API request failed");
            return Err(ClientError::from_status(status.as_u16(), error_message(&body)));
        }

        debug!(status = status.as_u16(), path = %url, "API request ok");
        Ok(response.json::<Value>().await?)
    }
}

/// Pull `message` out of a JSON error body, else return the body itself.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl DentagoApi for HttpApi {
    async fn list_doctors(&self, page: u32, limit: u32, sort: &str) -> ClientResult<Value> {
        let request = self
            .client
            .get(self.url("/public/doctors"))
            .query(&[
                ("page", page.to_string()),
                ("limit", limit.to_string()),
                ("sort", sort.to_string()),
            ]);
        self.send(request).await
    }

    async fn get_doctor(&self, doctor_id: &str) -> ClientResult<Value> {
        let request = self
            .client
            .get(self.url(&format!("/public/doctors/{doctor_id}")));
        self.send(request).await
    }

    async fn create_appointment(
        &self,
        request: &AppointmentRequest,
        token: Option<&str>,
    ) -> ClientResult<Value> {
        let mut builder = self.client.post(self.url("/public/appointments")).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        self.send(builder).await
    }

    async fn user_appointments(&self, token: &str) -> ClientResult<Value> {
        let request = self.client.get(self.url("/user/doctors")).bearer_auth(token);
        self.send(request).await
    }

    async fn favorites(&self, token: &str) -> ClientResult<Value> {
        let request = self.client.get(self.url("/favorites")).bearer_auth(token);
        self.send(request).await
    }

    async fn add_favorite(&self, token: &str, doctor_id: &str) -> ClientResult<Value> {
        let request = self
            .client
            .post(self.url(&format!("/favorites/{doctor_id}")))
            .bearer_auth(token);
        self.send(request).await
    }

    async fn remove_favorite(&self, token: &str, doctor_id: &str) -> ClientResult<Value> {
        let request = self
            .client
            .delete(self.url(&format!("/favorites/{doctor_id}")))
            .bearer_auth(token);
        self.send(request).await
    }

    async fn submit_review(
        &self,
        token: &str,
        doctor_id: &str,
        review: &ReviewSubmission,
    ) -> ClientResult<Value> {
        let request = self
            .client
            .post(self.url(&format!("/public/doctors/{doctor_id}/reviews")))
            .bearer_auth(token)
            .json(review);
        self.send(request).await
    }
}
