use serde::{Deserialize, Serialize};

pub const STORAGE_DIALECT: &str = "mssql";
pub const SEARCH_INDEX: &str = "azuresql-index";
pub const SEARCH_INDEXER: &str = "azuresql-indexer";

/// Everything a bot server needs to know about the farm it runs in.
///
/// Fields are filled in the order the resources are provisioned. A field that
/// is `None` belongs to a step that has not completed, so a record left behind
/// by a failed run describes exactly what was created.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dialect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_server_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_indexer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlp_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlp_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlp_app_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_key_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_checker_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_checker_endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_analytics_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_analytics_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webchat_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
}

impl DeploymentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Names (as serialized) of the fields that have been populated.
    pub fn populated_fields(&self) -> Vec<String> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => vec![],
        }
    }
}
