use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use env_defs::{
    BotServiceRequest, CloudCredentials, CognitiveAccount, CognitiveKeys, CognitiveServiceKind,
    DeployerConfig, DeploymentContext, HostingPlan, LuisAppRequest, ManagementApi, SearchQueryKey,
    Subscription, SubscriptionSource,
};
use log::info;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::api;
use crate::credential::{UsernamePasswordCredential, DEFAULT_AUTHORITY_HOST};
use crate::http_auth::{call_with_subscription_key, AuthenticatedHttp};

/// `ManagementApi` backed by the Azure Resource Manager REST API.
#[derive(Clone)]
pub struct AzureManagementClient {
    http: AuthenticatedHttp,
    subscription_id: String,
    management_endpoint: String,
    luis_endpoint: Option<String>,
}

impl AzureManagementClient {
    pub fn new(context: &DeploymentContext, config: &DeployerConfig) -> Self {
        Self::for_account(context.credentials(), context.subscription_id(), config)
    }

    /// Client for calls that need no region, such as deleting a resource group.
    pub fn for_account(
        credentials: &CloudCredentials,
        subscription_id: &str,
        config: &DeployerConfig,
    ) -> Self {
        let credential = Arc::new(UsernamePasswordCredential::new(
            &config.tenant,
            &credentials.username,
            &credentials.password,
        ));
        Self::with_credential(credential, subscription_id, &config.management_endpoint)
    }

    pub fn with_credential(
        credential: Arc<dyn TokenCredential>,
        subscription_id: &str,
        management_endpoint: &str,
    ) -> Self {
        Self {
            http: AuthenticatedHttp::new(credential),
            subscription_id: subscription_id.to_string(),
            management_endpoint: management_endpoint.trim_end_matches('/').to_string(),
            luis_endpoint: None,
        }
    }

    /// Overrides the regional LUIS authoring endpoint (full apps URL).
    pub fn with_luis_endpoint(mut self, luis_endpoint: &str) -> Self {
        self.luis_endpoint = Some(luis_endpoint.to_string());
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.http = self.http.with_poll_interval(poll_interval);
        self
    }

    fn base(&self) -> &str {
        &self.management_endpoint
    }
}

#[async_trait]
impl ManagementApi for AzureManagementClient {
    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<Value, anyhow::Error> {
        let url = api::get_resource_group_url(self.base(), &self.subscription_id, name);
        self.http
            .call("PUT", &url, Some(api::get_resource_group_payload(location)))
            .await
    }

    async fn delete_resource_group(&self, name: &str) -> Result<(), anyhow::Error> {
        let url = api::get_resource_group_url(self.base(), &self.subscription_id, name);
        self.http.call("DELETE", &url, None).await?;
        Ok(())
    }

    async fn create_hosting_plan(
        &self,
        group: &str,
        name: &str,
        location: &str,
    ) -> Result<HostingPlan, anyhow::Error> {
        let url = api::get_hosting_plan_url(self.base(), &self.subscription_id, group, name);
        let response = self
            .http
            .call("PUT", &url, Some(api::get_hosting_plan_payload(location)))
            .await?;
        api::parse_hosting_plan(&response)
    }

    async fn create_web_app(
        &self,
        group: &str,
        name: &str,
        location: &str,
        server_farm_id: &str,
    ) -> Result<Value, anyhow::Error> {
        let url = api::get_web_app_url(self.base(), &self.subscription_id, group, name);
        self.http
            .call(
                "PUT",
                &url,
                Some(api::get_web_app_payload(location, server_farm_id)),
            )
            .await
    }

    async fn create_sql_server(
        &self,
        group: &str,
        name: &str,
        location: &str,
        administrator_login: &str,
        administrator_password: &str,
    ) -> Result<Value, anyhow::Error> {
        let url = api::get_sql_server_url(self.base(), &self.subscription_id, group, name);
        let payload =
            api::get_sql_server_payload(location, administrator_login, administrator_password);
        self.http.call("PUT", &url, Some(payload)).await
    }

    async fn create_sql_database(
        &self,
        group: &str,
        server_name: &str,
        name: &str,
        location: &str,
    ) -> Result<Value, anyhow::Error> {
        let url = api::get_sql_database_url(
            self.base(),
            &self.subscription_id,
            group,
            server_name,
            name,
        );
        self.http
            .call("PUT", &url, Some(api::get_sql_database_payload(location)))
            .await
    }

    async fn create_search_service(
        &self,
        group: &str,
        name: &str,
        location: &str,
    ) -> Result<Value, anyhow::Error> {
        let url = api::get_search_service_url(self.base(), &self.subscription_id, group, name);
        self.http
            .call("PUT", &url, Some(api::get_search_service_payload(location)))
            .await
    }

    async fn list_search_query_keys(
        &self,
        group: &str,
        name: &str,
    ) -> Result<Vec<SearchQueryKey>, anyhow::Error> {
        let url = api::get_search_query_keys_url(self.base(), &self.subscription_id, group, name);
        let response = self.http.call("GET", &url, None).await?;
        api::parse_search_query_keys(&response)
    }

    async fn create_cognitive_account(
        &self,
        group: &str,
        name: &str,
        location: &str,
        kind: CognitiveServiceKind,
    ) -> Result<CognitiveAccount, anyhow::Error> {
        let url = api::get_cognitive_account_url(self.base(), &self.subscription_id, group, name);
        let response = self
            .http
            .call(
                "PUT",
                &url,
                Some(api::get_cognitive_account_payload(location, kind)),
            )
            .await?;
        api::parse_cognitive_account(&response)
    }

    async fn list_cognitive_keys(
        &self,
        group: &str,
        name: &str,
    ) -> Result<CognitiveKeys, anyhow::Error> {
        let url = api::get_cognitive_keys_url(self.base(), &self.subscription_id, group, name);
        let response = self.http.call("POST", &url, None).await?;
        api::parse_cognitive_keys(&response)
    }

    async fn create_luis_app(
        &self,
        location: &str,
        authoring_key: &str,
        app: &LuisAppRequest,
    ) -> Result<String, anyhow::Error> {
        let url = self
            .luis_endpoint
            .clone()
            .unwrap_or_else(|| api::get_luis_apps_url(location));
        let response = call_with_subscription_key(
            self.http.client(),
            &url,
            authoring_key,
            &serde_json::to_value(app)?,
        )
        .await?;
        api::parse_luis_app_id(&response)
    }

    async fn register_provider(&self, namespace: &str) -> Result<(), anyhow::Error> {
        let url = api::get_register_provider_url(self.base(), &self.subscription_id, namespace);
        info!("Registering resource provider {}", namespace);
        self.http.call("POST", &url, None).await?;
        Ok(())
    }

    async fn create_bot_service(
        &self,
        group: &str,
        bot: &BotServiceRequest,
    ) -> Result<Value, anyhow::Error> {
        let url = api::get_bot_service_url(self.base(), &self.subscription_id, group, &bot.bot_id);
        self.http
            .call("PUT", &url, Some(api::get_bot_service_payload(bot)))
            .await
    }

    async fn get_webchat_key(&self, group: &str, bot_id: &str) -> Result<String, anyhow::Error> {
        let url = api::get_webchat_keys_url(self.base(), &self.subscription_id, group, bot_id);
        let response = self.http.call("POST", &url, None).await?;
        api::parse_webchat_key(&response)
    }
}

/// Lists subscriptions visible to a user, signing in with their password.
#[derive(Clone, Debug)]
pub struct AzureSubscriptionClient {
    authority_host: String,
    tenant: String,
    management_endpoint: String,
}

impl AzureSubscriptionClient {
    pub fn new(config: &DeployerConfig) -> Self {
        Self::with_authority_host(DEFAULT_AUTHORITY_HOST, config)
    }

    pub fn with_authority_host(authority_host: &str, config: &DeployerConfig) -> Self {
        Self {
            authority_host: authority_host.to_string(),
            tenant: config.tenant.clone(),
            management_endpoint: config.management_endpoint.clone(),
        }
    }
}

#[async_trait]
impl SubscriptionSource for AzureSubscriptionClient {
    async fn list_subscriptions(
        &self,
        credentials: &CloudCredentials,
    ) -> Result<Vec<Subscription>, anyhow::Error> {
        let credential = Arc::new(UsernamePasswordCredential::with_authority_host(
            &self.authority_host,
            &self.tenant,
            &credentials.username,
            &credentials.password,
        ));
        let http = AuthenticatedHttp::new(credential);
        let response = http
            .call("GET", &api::get_subscriptions_url(&self.management_endpoint), None)
            .await?;
        api::parse_subscriptions(&response)
    }
}
