use anyhow::Result;
use env_defs::{
    BotServiceRequest, CognitiveAccount, CognitiveKeys, CognitiveServiceKind, DeployerError,
    HostingPlan, SearchQueryKey, Subscription,
};
use serde_json::{json, Value};

pub const RESOURCES_API_VERSION: &str = "2021-04-01";
pub const SUBSCRIPTIONS_API_VERSION: &str = "2020-01-01";
pub const WEB_API_VERSION: &str = "2022-03-01";
pub const SQL_API_VERSION: &str = "2021-11-01";
pub const SEARCH_API_VERSION: &str = "2020-08-01";
pub const COGNITIVE_API_VERSION: &str = "2017-04-18";
pub const BOT_API_VERSION: &str = "2017-12-01";
pub const PROVIDER_REGISTER_API_VERSION: &str = "2018-02-01";

fn resource_url(
    base: &str,
    subscription_id: &str,
    group: &str,
    resource_path: &str,
    api_version: &str,
) -> String {
    format!(
        "{}/subscriptions/{}/resourceGroups/{}/providers/{}?api-version={}",
        base, subscription_id, group, resource_path, api_version
    )
}

// Resource groups and subscriptions

pub fn get_subscriptions_url(base: &str) -> String {
    format!(
        "{}/subscriptions?api-version={}",
        base, SUBSCRIPTIONS_API_VERSION
    )
}

pub fn get_resource_group_url(base: &str, subscription_id: &str, group: &str) -> String {
    format!(
        "{}/subscriptions/{}/resourcegroups/{}?api-version={}",
        base, subscription_id, group, RESOURCES_API_VERSION
    )
}

pub fn get_resource_group_payload(location: &str) -> Value {
    json!({ "location": location })
}

pub fn get_register_provider_url(base: &str, subscription_id: &str, namespace: &str) -> String {
    format!(
        "{}/subscriptions/{}/providers/{}/register?api-version={}",
        base, subscription_id, namespace, PROVIDER_REGISTER_API_VERSION
    )
}

// Web

pub fn get_hosting_plan_url(base: &str, subscription_id: &str, group: &str, name: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.Web/serverfarms/{}", name),
        WEB_API_VERSION,
    )
}

pub fn get_hosting_plan_payload(location: &str) -> Value {
    json!({
        "location": location,
        "sku": {
            "name": "F1",
            "capacity": 1,
            "tier": "Free"
        }
    })
}

pub fn get_web_app_url(base: &str, subscription_id: &str, group: &str, name: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.Web/sites/{}", name),
        WEB_API_VERSION,
    )
}

pub fn get_web_app_payload(location: &str, server_farm_id: &str) -> Value {
    json!({
        "location": location,
        "properties": {
            "serverFarmId": server_farm_id
        }
    })
}

// Database

pub fn get_sql_server_url(base: &str, subscription_id: &str, group: &str, name: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.Sql/servers/{}", name),
        SQL_API_VERSION,
    )
}

pub fn get_sql_server_payload(
    location: &str,
    administrator_login: &str,
    administrator_password: &str,
) -> Value {
    json!({
        "location": location,
        "properties": {
            "administratorLogin": administrator_login,
            "administratorLoginPassword": administrator_password
        }
    })
}

pub fn get_sql_database_url(
    base: &str,
    subscription_id: &str,
    group: &str,
    server_name: &str,
    name: &str,
) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.Sql/servers/{}/databases/{}", server_name, name),
        SQL_API_VERSION,
    )
}

pub fn get_sql_database_payload(location: &str) -> Value {
    json!({
        "location": location,
        "sku": { "name": "Free" },
        "properties": {
            "createMode": "Default"
        }
    })
}

// Search

pub fn get_search_service_url(base: &str, subscription_id: &str, group: &str, name: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.Search/searchServices/{}", name),
        SEARCH_API_VERSION,
    )
}

pub fn get_search_service_payload(location: &str) -> Value {
    json!({
        "location": location,
        "sku": { "name": "free" }
    })
}

pub fn get_search_query_keys_url(
    base: &str,
    subscription_id: &str,
    group: &str,
    name: &str,
) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.Search/searchServices/{}/listQueryKeys", name),
        SEARCH_API_VERSION,
    )
}

// Cognitive services

pub fn get_cognitive_account_url(
    base: &str,
    subscription_id: &str,
    group: &str,
    name: &str,
) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.CognitiveServices/accounts/{}", name),
        COGNITIVE_API_VERSION,
    )
}

pub fn get_cognitive_account_payload(location: &str, kind: CognitiveServiceKind) -> Value {
    json!({
        "location": kind.location(location),
        "sku": { "name": "F0" },
        "kind": kind.as_kind(),
        "properties": {}
    })
}

pub fn get_cognitive_keys_url(base: &str, subscription_id: &str, group: &str, name: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.CognitiveServices/accounts/{}/listKeys", name),
        COGNITIVE_API_VERSION,
    )
}

pub fn get_luis_apps_url(location: &str) -> String {
    format!(
        "https://{}.api.cognitive.microsoft.com/luis/api/v2.0/apps/",
        location
    )
}

// Bot service

pub fn get_bot_service_url(base: &str, subscription_id: &str, group: &str, bot_id: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!("Microsoft.BotService/botServices/{}", bot_id),
        BOT_API_VERSION,
    )
}

pub fn get_bot_service_payload(bot: &BotServiceRequest) -> Value {
    json!({
        "location": bot.location,
        "sku": { "name": "F0" },
        "name": bot.bot_id,
        "kind": "sdk",
        "properties": {
            "description": bot.description,
            "displayName": bot.display_name,
            "endpoint": bot.endpoint,
            "iconUrl": bot.icon_url,
            "luisAppIds": bot.luis_app_ids,
            "luisKey": bot.luis_key,
            "msaAppId": bot.app_id,
            "msaAppPassword": bot.app_password
        }
    })
}

pub fn get_webchat_keys_url(base: &str, subscription_id: &str, group: &str, bot_id: &str) -> String {
    resource_url(
        base,
        subscription_id,
        group,
        &format!(
            "Microsoft.BotService/botServices/{}/channels/WebChatChannel/listChannelWithKeys",
            bot_id
        ),
        BOT_API_VERSION,
    )
}

// Response parsing

fn get_str<'a>(value: &'a Value, pointer: &str) -> Result<&'a str, DeployerError> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .ok_or_else(|| DeployerError::MissingField(pointer.to_string()))
}

pub fn parse_hosting_plan(response: &Value) -> Result<HostingPlan> {
    Ok(HostingPlan {
        id: get_str(response, "/id")?.to_string(),
        name: get_str(response, "/name")?.to_string(),
    })
}

pub fn parse_search_query_keys(response: &Value) -> Result<Vec<SearchQueryKey>> {
    let keys = response
        .get("value")
        .cloned()
        .ok_or_else(|| DeployerError::MissingField("/value".to_string()))?;
    Ok(serde_json::from_value(keys)?)
}

pub fn parse_cognitive_account(response: &Value) -> Result<CognitiveAccount> {
    Ok(CognitiveAccount {
        name: get_str(response, "/name")?.to_string(),
        endpoint: get_str(response, "/properties/endpoint")?.to_string(),
    })
}

pub fn parse_cognitive_keys(response: &Value) -> Result<CognitiveKeys> {
    Ok(serde_json::from_value(response.clone())?)
}

pub fn parse_webchat_key(response: &Value) -> Result<String> {
    Ok(get_str(response, "/properties/properties/sites/0/key")?.to_string())
}

/// The authoring API answers with the new application id as a bare JSON string.
pub fn parse_luis_app_id(response: &Value) -> Result<String> {
    response
        .as_str()
        .map(|id| id.to_string())
        .ok_or_else(|| DeployerError::MissingField("application id".to_string()).into())
}

pub fn parse_subscriptions(response: &Value) -> Result<Vec<Subscription>> {
    let subscriptions = response
        .get("value")
        .cloned()
        .ok_or_else(|| DeployerError::MissingField("/value".to_string()))?;
    Ok(serde_json::from_value(subscriptions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://management.azure.com";

    #[test]
    fn test_hosting_plan_url() {
        assert_eq!(
            get_hosting_plan_url(BASE, "sub-1", "farm", "farm-server-plan"),
            "https://management.azure.com/subscriptions/sub-1/resourceGroups/farm/providers/Microsoft.Web/serverfarms/farm-server-plan?api-version=2022-03-01"
        );
    }

    #[test]
    fn test_register_provider_url() {
        assert_eq!(
            get_register_provider_url(BASE, "sub-1", "Microsoft.BotService"),
            "https://management.azure.com/subscriptions/sub-1/providers/Microsoft.BotService/register?api-version=2018-02-01"
        );
    }

    #[test]
    fn test_webchat_keys_url() {
        assert_eq!(
            get_webchat_keys_url(BASE, "sub-1", "farm", "farmab12cd34"),
            "https://management.azure.com/subscriptions/sub-1/resourceGroups/farm/providers/Microsoft.BotService/botServices/farmab12cd34/channels/WebChatChannel/listChannelWithKeys?api-version=2017-12-01"
        );
    }

    #[test]
    fn test_luis_apps_url() {
        assert_eq!(
            get_luis_apps_url("westus"),
            "https://westus.api.cognitive.microsoft.com/luis/api/v2.0/apps/"
        );
    }

    #[test]
    fn test_cognitive_payload_spell_check_is_global() {
        let payload = get_cognitive_account_payload("westeurope", CognitiveServiceKind::SpellCheck);
        assert_eq!(
            payload,
            json!({
                "location": "global",
                "sku": { "name": "F0" },
                "kind": "Bing.SpellCheck.v7",
                "properties": {}
            })
        );
    }

    #[test]
    fn test_bot_service_payload() {
        let bot = BotServiceRequest {
            bot_id: "farmab12cd34".to_string(),
            display_name: "farm".to_string(),
            description: "General BootBot".to_string(),
            endpoint: "https://proxy.example.com/api/messages/farm".to_string(),
            location: "global".to_string(),
            icon_url: env_defs::BOT_ICON_URL.to_string(),
            luis_app_ids: vec!["app-1".to_string()],
            luis_key: "luis-key".to_string(),
            app_id: "3f1b6a3e-0000-4000-8000-000000000000".to_string(),
            app_password: "P4ss!word".to_string(),
        };
        let payload = get_bot_service_payload(&bot);
        assert_eq!(payload["kind"], "sdk");
        assert_eq!(payload["sku"]["name"], "F0");
        assert_eq!(payload["name"], "farmab12cd34");
        assert_eq!(payload["properties"]["luisAppIds"], json!(["app-1"]));
        assert_eq!(payload["properties"]["msaAppPassword"], "P4ss!word");
        assert_eq!(
            payload["properties"]["endpoint"],
            "https://proxy.example.com/api/messages/farm"
        );
    }

    #[test]
    fn test_parse_webchat_key() {
        let response = json!({
            "properties": {
                "properties": {
                    "sites": [
                        { "siteName": "Default Site", "key": "webchat-secret" }
                    ]
                }
            }
        });
        assert_eq!(parse_webchat_key(&response).unwrap(), "webchat-secret");
    }

    #[test]
    fn test_parse_webchat_key_missing_sites() {
        let response = json!({ "properties": { "properties": { "sites": [] } } });
        let err = parse_webchat_key(&response).unwrap_err();
        assert!(err.to_string().contains("sites/0/key"));
    }

    #[test]
    fn test_parse_cognitive_account() {
        let response = json!({
            "name": "farm-nlp",
            "kind": "LUIS",
            "properties": { "endpoint": "https://westus.api.cognitive.microsoft.com/luis/v2.0" }
        });
        assert_eq!(
            parse_cognitive_account(&response).unwrap(),
            CognitiveAccount {
                name: "farm-nlp".to_string(),
                endpoint: "https://westus.api.cognitive.microsoft.com/luis/v2.0".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_search_query_keys() {
        let response = json!({ "value": [ { "name": null, "key": "query-key" } ] });
        let keys = parse_search_query_keys(&response).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key, "query-key");
    }

    #[test]
    fn test_parse_subscriptions() {
        let response = json!({
            "value": [
                { "subscriptionId": "sub-1", "displayName": "Production", "state": "Enabled" },
                { "subscriptionId": "sub-2", "displayName": "Sandbox", "state": "Enabled" }
            ]
        });
        let subscriptions = parse_subscriptions(&response).unwrap();
        assert_eq!(subscriptions[1].display_name, "Sandbox");
        assert_eq!(subscriptions[0].subscription_id, "sub-1");
    }

    #[test]
    fn test_parse_luis_app_id() {
        assert_eq!(parse_luis_app_id(&json!("app-guid")).unwrap(), "app-guid");
        assert!(parse_luis_app_id(&json!({ "error": "nope" })).is_err());
    }
}
