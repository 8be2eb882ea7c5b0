use async_trait::async_trait;
use serde_json::Value;

use crate::{
    BotServiceRequest, CloudCredentials, CognitiveAccount, CognitiveKeys, CognitiveServiceKind,
    HostingPlan, LuisAppRequest, SearchQueryKey, Subscription,
};

/// Management-plane calls needed to stand up a bot farm.
///
/// Every method is a single request/response pair against the provider.
/// Implementations must not retry and must surface remote failures as errors.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    // Resource group
    async fn create_resource_group(&self, name: &str, location: &str)
        -> Result<Value, anyhow::Error>;
    async fn delete_resource_group(&self, name: &str) -> Result<(), anyhow::Error>;
    // Web
    async fn create_hosting_plan(
        &self,
        group: &str,
        name: &str,
        location: &str,
    ) -> Result<HostingPlan, anyhow::Error>;
    async fn create_web_app(
        &self,
        group: &str,
        name: &str,
        location: &str,
        server_farm_id: &str,
    ) -> Result<Value, anyhow::Error>;
    // Database
    async fn create_sql_server(
        &self,
        group: &str,
        name: &str,
        location: &str,
        administrator_login: &str,
        administrator_password: &str,
    ) -> Result<Value, anyhow::Error>;
    async fn create_sql_database(
        &self,
        group: &str,
        server_name: &str,
        name: &str,
        location: &str,
    ) -> Result<Value, anyhow::Error>;
    // Search
    async fn create_search_service(
        &self,
        group: &str,
        name: &str,
        location: &str,
    ) -> Result<Value, anyhow::Error>;
    async fn list_search_query_keys(
        &self,
        group: &str,
        name: &str,
    ) -> Result<Vec<SearchQueryKey>, anyhow::Error>;
    // Cognitive services
    async fn create_cognitive_account(
        &self,
        group: &str,
        name: &str,
        location: &str,
        kind: CognitiveServiceKind,
    ) -> Result<CognitiveAccount, anyhow::Error>;
    async fn list_cognitive_keys(
        &self,
        group: &str,
        name: &str,
    ) -> Result<CognitiveKeys, anyhow::Error>;
    async fn create_luis_app(
        &self,
        location: &str,
        authoring_key: &str,
        app: &LuisAppRequest,
    ) -> Result<String, anyhow::Error>;
    // Bot service
    async fn register_provider(&self, namespace: &str) -> Result<(), anyhow::Error>;
    async fn create_bot_service(
        &self,
        group: &str,
        bot: &BotServiceRequest,
    ) -> Result<Value, anyhow::Error>;
    async fn get_webchat_key(&self, group: &str, bot_id: &str) -> Result<String, anyhow::Error>;
}

/// Lists the subscriptions an operator can deploy into.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    async fn list_subscriptions(
        &self,
        credentials: &CloudCredentials,
    ) -> Result<Vec<Subscription>, anyhow::Error>;
}

/// Supplies values that are missing from configuration, usually by asking the operator.
///
/// Returning `Ok(None)` (or an empty string) means nothing was supplied yet; callers ask again.
pub trait CredentialProvider: Send + Sync {
    fn read_value(&self, key: &str, secret: bool) -> Result<Option<String>, anyhow::Error>;

    /// Returns a zero-based index into `subscriptions`, or `None` if the choice was not usable.
    fn select_subscription(
        &self,
        subscriptions: &[Subscription],
    ) -> Result<Option<usize>, anyhow::Error>;

    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}
