use std::path::Path;

use colored::Colorize;
use env_azure::{AzureManagementClient, AzureSubscriptionClient};
use env_common::{ensure_context, Deployer};
use env_defs::{DeployerConfig, DeploymentRecord};
use farm_deployer::{write_record, TerminalCredentialProvider};
use log::error;

pub async fn handle_deploy(
    name: &str,
    proxy_address: &str,
    location: Option<String>,
    output: Option<&Path>,
) -> Result<(), anyhow::Error> {
    let mut config = DeployerConfig::from_env();
    if location.is_some() {
        config.location = location;
    }

    let provider = TerminalCredentialProvider;
    let subscriptions = AzureSubscriptionClient::new(&config);
    let context = ensure_context(&config, &provider, &subscriptions).await?;
    let api = AzureManagementClient::new(&context, &config);
    let deployer = Deployer::new(&api, &provider, &config);

    let mut record = DeploymentRecord::new();
    let result = deployer
        .deploy_farm(name, context.location(), proxy_address, &mut record)
        .await;

    match result {
        Ok(()) => {
            write_record(&record, output)?;
            println!("{}", format!("Bot farm {} deployed", name).green());
            Ok(())
        }
        Err(e) => {
            error!("Deployment of {} stopped: {}", name, e);
            if !record.is_empty() {
                eprintln!(
                    "{}",
                    "Resources created before the failure are still in place:".yellow()
                );
                write_record(&record, output)?;
            }
            Err(e)
        }
    }
}
