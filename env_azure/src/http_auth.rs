use anyhow::{anyhow, Result};
use azure_core::credentials::TokenCredential;
use env_defs::DeployerError;
use log::{debug, info};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Authenticated JSON calls against the Azure management plane.
///
/// Calls that Azure accepts asynchronously (201/202 with an `Azure-AsyncOperation`
/// or `Location` header) are followed until the operation finishes, so a
/// returned value always describes a completed call.
#[derive(Clone)]
pub struct AuthenticatedHttp {
    client: Client,
    credential: Arc<dyn TokenCredential>,
    poll_interval: Duration,
}

impl AuthenticatedHttp {
    pub fn new(credential: Arc<dyn TokenCredential>) -> Self {
        Self {
            client: Client::new(),
            credential,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn send(&self, method: &str, url: &str, body: Option<&Value>) -> Result<Response> {
        let token_response = self
            .credential
            .get_token(&[MANAGEMENT_SCOPE], None)
            .await
            .map_err(|e| anyhow!("Failed to get Azure access token: {}", e))?;

        let mut request = match method.to_uppercase().as_str() {
            "GET" => self.client.get(url),
            "POST" => self.client.post(url),
            "PUT" => self.client.put(url),
            "DELETE" => self.client.delete(url),
            _ => return Err(DeployerError::UnsupportedMethod(method.to_string()).into()),
        };

        request = request
            .bearer_auth(token_response.token.secret())
            .header("Content-Type", "application/json; charset=utf-8")
            .header("x-ms-client-request-id", uuid::Uuid::new_v4().to_string());

        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send authenticated request: {}", e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response)
    }

    /// Sends one management call and returns the final JSON body.
    pub async fn call(&self, method: &str, url: &str, body: Option<Value>) -> Result<Value> {
        let response = self.send(method, url, body.as_ref()).await?;
        let status = response.status();
        let async_operation = header_value(&response, "azure-asyncoperation");
        let location = header_value(&response, "location");
        let interval = retry_after(&response).unwrap_or(self.poll_interval);
        let result = read_json(response).await?;

        if status != StatusCode::CREATED && status != StatusCode::ACCEPTED {
            return Ok(result);
        }

        if let Some(operation_url) = async_operation {
            self.wait_for_async_operation(&operation_url, interval)
                .await?;
            // The operation status does not carry the resource, read it back
            if method.eq_ignore_ascii_case("PUT") {
                let response = self.send("GET", url, None).await?;
                return read_json(response).await;
            }
            return Ok(result);
        }

        match location {
            Some(location_url) if status == StatusCode::ACCEPTED => {
                self.wait_for_location(&location_url, interval).await
            }
            _ => Ok(result),
        }
    }

    async fn wait_for_async_operation(&self, operation_url: &str, interval: Duration) -> Result<()> {
        loop {
            tokio::time::sleep(interval).await;
            let response = self.send("GET", operation_url, None).await?;
            let body = read_json(response).await?;
            let status = body
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("InProgress")
                .to_string();
            match status.as_str() {
                "Succeeded" => return Ok(()),
                "Failed" | "Canceled" => {
                    return Err(DeployerError::OperationFailed {
                        status,
                        body: body.to_string(),
                    }
                    .into())
                }
                _ => info!("Waiting for operation to complete ({})", status),
            }
        }
    }

    async fn wait_for_location(&self, location_url: &str, interval: Duration) -> Result<Value> {
        loop {
            tokio::time::sleep(interval).await;
            let response = self.send("GET", location_url, None).await?;
            if response.status() != StatusCode::ACCEPTED {
                return read_json(response).await;
            }
            info!("Waiting for operation to complete");
        }
    }
}

/// Calls a cognitive-services data-plane endpoint that authenticates with a
/// subscription key instead of a bearer token.
pub async fn call_with_subscription_key(
    client: &Client,
    url: &str,
    subscription_key: &str,
    body: &Value,
) -> Result<Value> {
    let response = client
        .post(url)
        .header("Ocp-Apim-Subscription-Key", subscription_key)
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    read_json(response).await
}

async fn api_error(response: Response) -> anyhow::Error {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    DeployerError::ApiError {
        status: status.as_u16(),
        body: error_text,
    }
    .into()
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn retry_after(response: &Response) -> Option<Duration> {
    header_value(response, "retry-after")
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

async fn read_json(response: Response) -> Result<Value> {
    let text = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response: {}", e))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| anyhow!("Failed to parse response: {}", e))
}
