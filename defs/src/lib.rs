mod config;
mod context;
mod errors;
mod provider;
mod record;
mod resources;
mod search_schema;

pub use config::DeployerConfig;
pub use context::{CloudCredentials, DeploymentContext, Subscription};
pub use errors::DeployerError;
pub use provider::{CredentialProvider, ManagementApi, SubscriptionSource};
pub use record::{DeploymentRecord, SEARCH_INDEX, SEARCH_INDEXER, STORAGE_DIALECT};
pub use resources::{
    BotServiceRequest, CognitiveAccount, CognitiveKeys, CognitiveServiceKind, HostingPlan,
    LuisAppRequest, SearchQueryKey, BOT_DESCRIPTION, BOT_ICON_URL, BOT_SERVICE_PROVIDER,
};
pub use search_schema::get_kb_search_schema;
