use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq)]
pub struct CloudCredentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs and panic messages.
impl std::fmt::Debug for CloudCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_id: String,
    pub display_name: String,
}

/// Who deploys, into which subscription, and where. Fixed for the whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct DeploymentContext {
    credentials: CloudCredentials,
    subscription_id: String,
    location: String,
}

impl DeploymentContext {
    pub fn new(credentials: CloudCredentials, subscription_id: &str, location: &str) -> Self {
        DeploymentContext {
            credentials,
            subscription_id: subscription_id.to_string(),
            location: location.to_string(),
        }
    }

    pub fn credentials(&self) -> &CloudCredentials {
        &self.credentials
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}
