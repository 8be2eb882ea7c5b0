use env_azure::AzureSubscriptionClient;
use env_common::read_until_supplied;
use env_defs::{CloudCredentials, DeployerConfig, DeployerError, SubscriptionSource};
use farm_deployer::{format_subscriptions, TerminalCredentialProvider};

pub async fn handle_subscriptions() -> Result<(), anyhow::Error> {
    let config = DeployerConfig::from_env();
    let provider = TerminalCredentialProvider;

    let username = match &config.username {
        Some(username) => username.clone(),
        None => read_until_supplied(&provider, "CLOUD_USERNAME", false)?,
    };
    let password = match &config.password {
        Some(password) => password.clone(),
        None => read_until_supplied(&provider, "CLOUD_PASSWORD", true)?,
    };
    let credentials = CloudCredentials { username, password };

    let subscriptions = AzureSubscriptionClient::new(&config)
        .list_subscriptions(&credentials)
        .await?;
    if subscriptions.is_empty() {
        return Err(DeployerError::NoSubscriptions.into());
    }
    println!("{}", format_subscriptions(&subscriptions));
    Ok(())
}
