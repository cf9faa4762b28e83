use crate::{
    constants::CHAT_ENDPOINT,
    errors::{AtomiaError, AtomiaResult},
    logging::log_api_call,
    models::{ApiCallLog, ChatRequest, ChatResponse, ServiceInfo},
};
use chrono::Utc;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// HTTP client for the Atomia backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AtomiaClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl AtomiaClient {
    pub fn new(base_url: &str, timeout: Duration) -> AtomiaResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one chat turn and returns the parsed reply.
    pub async fn send_chat(&self, request: &ChatRequest) -> AtomiaResult<ChatResponse> {
        let url = format!("{}{}", self.base_url, CHAT_ENDPOINT);
        let summary = format!(
            "subject={} session={} chars={}",
            request.subject,
            request.session_id.as_deref().unwrap_or("<new>"),
            request.message.chars().count()
        );

        let started = Instant::now();
        let result = self.http.post(&url).json(request).send().await;
        let response = self.check_response(result, CHAT_ENDPOINT, summary, started)?;

        let reply: ChatResponse = self.parse_body(response).await?;
        log::debug!("{}", describe_reply(&reply));
        Ok(reply)
    }

    /// Fetches the backend's service metadata from its root route.
    pub async fn service_info(&self) -> AtomiaResult<ServiceInfo> {
        let url = format!("{}/", self.base_url);

        let started = Instant::now();
        let result = self.http.get(&url).send().await;
        let response = self.check_response(result, "/", "service info".to_string(), started)?;

        self.parse_body(response).await
    }

    fn check_response(
        &self,
        result: reqwest::Result<Response>,
        endpoint: &str,
        request_summary: String,
        started: Instant,
    ) -> AtomiaResult<Response> {
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            request_summary,
            response_status: response_status(&result),
            response_time_ms: started.elapsed().as_millis(),
        });

        let response = result.map_err(|e| {
            log::warn!("request to {} failed: {}", endpoint, e);
            self.transport_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AtomiaError::api_error(format!(
                "{} returned {}",
                endpoint, status
            )));
        }

        Ok(response)
    }

    async fn parse_body<T: DeserializeOwned>(&self, response: Response) -> AtomiaResult<T> {
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body)
            .map_err(|e| AtomiaError::api_error(format!("Failed to parse API response: {}", e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> AtomiaError {
        if e.is_timeout() {
            AtomiaError::Timeout(self.timeout)
        } else {
            AtomiaError::from(e)
        }
    }
}

/// HTTP status for the call log; 0 when no response arrived.
fn response_status(result: &reqwest::Result<Response>) -> u16 {
    result
        .as_ref()
        .map(|response| response.status().as_u16())
        .unwrap_or(0)
}

fn describe_reply(reply: &ChatResponse) -> String {
    format!(
        "chat reply session={} subject={} confidence={}",
        reply.session_id,
        reply.subject.as_deref().unwrap_or("-"),
        reply
            .confidence
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string())
    )
}
