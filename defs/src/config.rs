use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_TENANT: &str = "organizations";
pub const DEFAULT_CULTURE: &str = "en-us";
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Values read once from the environment and handed to the deployer.
///
/// Empty values are treated as absent so that an exported-but-blank variable
/// still triggers the interactive fallback.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub subscription_id: Option<String>,
    pub location: Option<String>,
    pub authoring_key: Option<String>,
    pub tenant: String,
    pub culture: String,
    pub management_endpoint: String,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl DeployerConfig {
    /// Reads the process environment, then a `.env` file in the working
    /// directory or one of its parents for keys the environment leaves unset.
    pub fn from_env() -> Self {
        let file_values = match dotenvy::dotenv_iter() {
            Ok(iter) => iter.filter_map(Result::ok).collect(),
            Err(_) => HashMap::new(),
        };
        Self::layered(|key| std::env::var(key).ok(), file_values)
    }

    /// Like `from_env`, with an explicit file. A missing or malformed file is an error.
    pub fn from_env_file(path: &Path) -> Result<Self, dotenvy::Error> {
        let file_values = read_env_file(path)?;
        Ok(Self::layered(|key| std::env::var(key).ok(), file_values))
    }

    fn layered<F>(env: F, file_values: HashMap<String, String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or_else(|| file_values.get(key).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        DeployerConfig {
            username: get("CLOUD_USERNAME"),
            password: get("CLOUD_PASSWORD"),
            subscription_id: get("CLOUD_SUBSCRIPTIONID"),
            location: get("CLOUD_LOCATION"),
            authoring_key: get("NLP_AUTHORING_KEY"),
            tenant: get("CLOUD_TENANT").unwrap_or_else(|| DEFAULT_TENANT.to_string()),
            culture: get("NLP_CULTURE").unwrap_or_else(|| DEFAULT_CULTURE.to_string()),
            management_endpoint: get("MANAGEMENT_ENDPOINT")
                .map(|endpoint| endpoint.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_MANAGEMENT_ENDPOINT.to_string()),
        }
    }

    /// True when every cloud value needed to log in and target a region is present.
    pub fn has_cloud_settings(&self) -> bool {
        self.username.is_some()
            && self.password.is_some()
            && self.subscription_id.is_some()
            && self.location.is_some()
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, dotenvy::Error> {
    dotenvy::from_path_iter(path)?.collect()
}
