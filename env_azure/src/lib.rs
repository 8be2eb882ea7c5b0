mod api;
mod credential;
mod http_auth;
mod provider;

pub use credential::UsernamePasswordCredential;
pub use http_auth::AuthenticatedHttp;
pub use provider::{AzureManagementClient, AzureSubscriptionClient};
