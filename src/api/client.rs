//! Authenticated HTTP client for the calling backend
//!
//! Wraps reqwest::Client with HTTP Basic credentials and strict status checks.

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::error::{ApiError, Operation};
use super::CallApi;
use crate::config::Config;
use crate::models::{
    CallRecord, CallStatusResponse, RecentCallsResponse, StartCallRequest, StartCallResponse,
};

/// Client for the calling backend. One connection pool, reused for every request.
pub struct DialerClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl DialerClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach credentials, send, and require HTTP 200.
    async fn send(
        &self,
        op: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|source| ApiError::Transport { op, source })?;

        check_response(op, resp)
    }
}

#[async_trait]
impl CallApi for DialerClient {
    async fn start_call(&self, to_number: &str, company: &str) -> Result<String, ApiError> {
        let op = Operation::StartCall;
        let url = self.url("/start_call");
        tracing::debug!("POST {} to_number={}", url, to_number);

        let body = StartCallRequest { to_number, company };
        let resp = self.send(op, self.http.post(&url).json(&body)).await?;
        let started: StartCallResponse = resp
            .json()
            .await
            .map_err(|source| ApiError::Decode { op, source })?;

        tracing::info!("Call {} started to {}", started.call_sid, to_number);
        Ok(started.call_sid)
    }

    async fn call_status(&self, call_sid: &str) -> Result<String, ApiError> {
        let op = Operation::CallStatus;
        let url = self.url(&format!("/call_status/{}", call_sid));
        tracing::debug!("GET {}", url);

        let resp = self.send(op, self.http.get(&url)).await?;
        let body: CallStatusResponse = resp
            .json()
            .await
            .map_err(|source| ApiError::Decode { op, source })?;

        tracing::debug!("Call {} status: {}", call_sid, body.status);
        Ok(body.status)
    }

    async fn recent_calls(&self, limit: usize) -> Result<Vec<CallRecord>, ApiError> {
        let op = Operation::RecentCalls;
        let url = self.url("/all_calls");
        tracing::debug!("GET {}?limit={}", url, limit);

        let resp = self
            .send(op, self.http.get(&url).query(&[("limit", limit)]))
            .await?;
        let body: RecentCallsResponse = resp
            .json()
            .await
            .map_err(|source| ApiError::Decode { op, source })?;

        let mut calls = body.calls;
        if calls.len() > limit {
            tracing::debug!("Backend returned {} calls, keeping {}", calls.len(), limit);
            calls.truncate(limit);
        }
        Ok(calls)
    }
}

/// Anything but 200 is a failure, including other 2xx codes.
fn check_response(op: Operation, resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        tracing::warn!(
            "401 Unauthorized for {}. Check username/password in the config file.",
            resp.url()
        );
    }
    if status != reqwest::StatusCode::OK {
        tracing::warn!("{} returned HTTP {}", op, status.as_u16());
        return Err(ApiError::Status { op, status });
    }
    Ok(resp)
}
