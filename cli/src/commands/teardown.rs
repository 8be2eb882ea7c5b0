use colored::Colorize;
use env_azure::{AzureManagementClient, AzureSubscriptionClient};
use env_common::{ensure_subscription, Deployer};
use env_defs::DeployerConfig;
use farm_deployer::TerminalCredentialProvider;

pub async fn handle_teardown(name: &str, yes: bool) -> Result<(), anyhow::Error> {
    if !yes {
        anyhow::bail!(
            "Refusing to delete resource group {} and everything in it without --yes",
            name
        );
    }

    let config = DeployerConfig::from_env();
    let provider = TerminalCredentialProvider;
    let subscriptions = AzureSubscriptionClient::new(&config);
    let (credentials, subscription_id) =
        ensure_subscription(&config, &provider, &subscriptions).await?;
    let api = AzureManagementClient::for_account(&credentials, &subscription_id, &config);

    Deployer::new(&api, &provider, &config)
        .delete_deploy(name)
        .await?;
    println!("{}", format!("Bot farm {} deleted", name).green());
    Ok(())
}
