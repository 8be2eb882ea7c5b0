use async_trait::async_trait;
use azure_core::credentials::{AccessToken, TokenCredential, TokenRequestOptions};
use azure_core::error::{ErrorKind, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
// Public client id of the Azure cross-platform CLI
pub const PUBLIC_CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";

const EXPIRY_MARGIN: Duration = Duration::from_secs(300);

#[derive(Debug, Deserialize)]
struct PasswordGrantResponse {
    access_token: String,
    expires_in: Value,
}

/// Signs in with a work account's user name and password (OAuth2 password grant).
///
/// Tokens are cached per scope set and reused until five minutes before expiry.
pub struct UsernamePasswordCredential {
    client: Client,
    authority_host: String,
    tenant: String,
    username: String,
    password: String,
    cache: Mutex<HashMap<String, (String, SystemTime)>>,
}

impl UsernamePasswordCredential {
    pub fn new(tenant: &str, username: &str, password: &str) -> Self {
        Self::with_authority_host(DEFAULT_AUTHORITY_HOST, tenant, username, password)
    }

    pub fn with_authority_host(
        authority_host: &str,
        tenant: &str,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            client: Client::new(),
            authority_host: authority_host.trim_end_matches('/').to_string(),
            tenant: tenant.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, scope: &str) -> Option<(String, SystemTime)> {
        let cache = self.cache.lock().ok()?;
        let (token, expires_on) = cache.get(scope)?;
        let still_valid = expires_on
            .checked_sub(EXPIRY_MARGIN)
            .map(|refresh_at| refresh_at > SystemTime::now())
            .unwrap_or(false);
        if still_valid {
            Some((token.clone(), *expires_on))
        } else {
            None
        }
    }

    fn store(&self, scope: &str, token: &str, expires_on: SystemTime) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(scope.to_string(), (token.to_string(), expires_on));
        }
    }
}

impl std::fmt::Debug for UsernamePasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernamePasswordCredential")
            .field("authority_host", &self.authority_host)
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn parse_expires_in(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

#[async_trait]
impl TokenCredential for UsernamePasswordCredential {
    async fn get_token(
        &self,
        scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> Result<AccessToken> {
        let scope = scopes.join(" ");
        if let Some((token, expires_on)) = self.cached(&scope) {
            return Ok(AccessToken {
                token: token.into(),
                expires_on: expires_on.into(),
            });
        }

        let url = format!("{}/{}/oauth2/v2.0/token", self.authority_host, self.tenant);
        debug!("Requesting token for {} from {}", self.username, url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("client_id", PUBLIC_CLIENT_ID),
                ("grant_type", "password"),
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
                ("scope", scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| azure_core::Error::new(ErrorKind::Credential, e))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let description = body
                .get("error_description")
                .and_then(|d| d.as_str())
                .unwrap_or("no description");
            return Err(azure_core::Error::new(
                ErrorKind::Credential,
                format!("Sign-in failed with status {}: {}", status, description),
            ));
        }

        let grant: PasswordGrantResponse = response
            .json()
            .await
            .map_err(|e| azure_core::Error::new(ErrorKind::Credential, e))?;
        let expires_on =
            SystemTime::now() + Duration::from_secs(parse_expires_in(&grant.expires_in));
        self.store(&scope, &grant.access_token, expires_on);

        Ok(AccessToken {
            token: grant.access_token.into(),
            expires_on: expires_on.into(),
        })
    }
}
