use env_defs::{
    CloudCredentials, CredentialProvider, DeployerConfig, DeployerError, DeploymentContext,
    SubscriptionSource,
};
use log::info;

pub const FIRST_RUN_NOTICE: &str =
    "FIRST RUN: An empty environment was detected. Please enter credentials to create a new bot farm.";

/// Asks `provider` for `key` until a non-empty value comes back.
///
/// This blocks for as long as the operator takes; an error from the provider
/// (closed terminal, interrupted prompt) ends the wait.
pub fn read_until_supplied(
    provider: &dyn CredentialProvider,
    key: &str,
    secret: bool,
) -> Result<String, anyhow::Error> {
    loop {
        if let Some(value) = provider.read_value(key, secret)? {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }
}

async fn select_subscription(
    provider: &dyn CredentialProvider,
    source: &dyn SubscriptionSource,
    credentials: &CloudCredentials,
) -> Result<String, anyhow::Error> {
    let subscriptions = source.list_subscriptions(credentials).await?;
    if subscriptions.is_empty() {
        return Err(DeployerError::NoSubscriptions.into());
    }

    loop {
        if let Some(index) = provider.select_subscription(&subscriptions)? {
            if let Some(subscription) = subscriptions.get(index) {
                info!(
                    "Using subscription {} ({})",
                    subscription.display_name, subscription.subscription_id
                );
                return Ok(subscription.subscription_id.clone());
            }
        }
    }
}

fn has_account_settings(config: &DeployerConfig) -> bool {
    config.username.is_some() && config.password.is_some() && config.subscription_id.is_some()
}

async fn resolve_account(
    config: &DeployerConfig,
    provider: &dyn CredentialProvider,
    source: &dyn SubscriptionSource,
) -> Result<(CloudCredentials, String), anyhow::Error> {
    let username = match &config.username {
        Some(username) => username.clone(),
        None => read_until_supplied(provider, "CLOUD_USERNAME", false)?,
    };
    let password = match &config.password {
        Some(password) => password.clone(),
        None => read_until_supplied(provider, "CLOUD_PASSWORD", true)?,
    };
    let credentials = CloudCredentials { username, password };

    let subscription_id = match &config.subscription_id {
        Some(subscription_id) => subscription_id.clone(),
        None => select_subscription(provider, source, &credentials).await?,
    };
    Ok((credentials, subscription_id))
}

/// Resolves credentials and subscription only, for operations that never
/// create anything and so need no region.
pub async fn ensure_subscription(
    config: &DeployerConfig,
    provider: &dyn CredentialProvider,
    source: &dyn SubscriptionSource,
) -> Result<(CloudCredentials, String), anyhow::Error> {
    if !has_account_settings(config) {
        provider.notify(FIRST_RUN_NOTICE);
    }
    resolve_account(config, provider, source).await
}

/// Builds the deployment context from configuration, asking for whatever is missing.
///
/// The subscription is chosen from the account's subscription list when it is
/// not configured, which requires signing in with the username and password first.
pub async fn ensure_context(
    config: &DeployerConfig,
    provider: &dyn CredentialProvider,
    source: &dyn SubscriptionSource,
) -> Result<DeploymentContext, anyhow::Error> {
    if !config.has_cloud_settings() {
        provider.notify(FIRST_RUN_NOTICE);
    }

    let (credentials, subscription_id) = resolve_account(config, provider, source).await?;

    let location = match &config.location {
        Some(location) => location.clone(),
        None => read_until_supplied(provider, "CLOUD_LOCATION", false)?,
    };

    Ok(DeploymentContext::new(
        credentials,
        &subscription_id,
        &location,
    ))
}
