use anyhow::anyhow;
use async_trait::async_trait;
use env_defs::{
    BotServiceRequest, CloudCredentials, CognitiveAccount, CognitiveKeys, CognitiveServiceKind,
    CredentialProvider, HostingPlan, LuisAppRequest, ManagementApi, SearchQueryKey, Subscription,
    SubscriptionSource,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers prompts from a fixed script and errors once the script runs out.
pub struct ScriptedProvider {
    values: Mutex<VecDeque<Option<String>>>,
    choices: Mutex<VecDeque<Option<usize>>>,
    asked: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self {
            values: Mutex::new(values.into()),
            choices: Mutex::new(VecDeque::new()),
            asked: Mutex::new(vec![]),
            notices: Mutex::new(vec![]),
        }
    }

    pub fn with_choices(self, choices: Vec<Option<usize>>) -> Self {
        *self.choices.lock().unwrap() = choices.into();
        self
    }

    pub fn asked_keys(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl CredentialProvider for ScriptedProvider {
    fn read_value(&self, key: &str, _secret: bool) -> Result<Option<String>, anyhow::Error> {
        self.asked.lock().unwrap().push(key.to_string());
        self.values
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("input closed while reading {}", key))
    }

    fn select_subscription(
        &self,
        _subscriptions: &[Subscription],
    ) -> Result<Option<usize>, anyhow::Error> {
        self.choices
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("input closed while choosing a subscription"))
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

pub struct StaticSubscriptions {
    subscriptions: Vec<Subscription>,
    usernames: Mutex<Vec<String>>,
}

impl StaticSubscriptions {
    pub fn new(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions,
            usernames: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> usize {
        self.usernames.lock().unwrap().len()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.usernames.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionSource for StaticSubscriptions {
    async fn list_subscriptions(
        &self,
        credentials: &CloudCredentials,
    ) -> Result<Vec<Subscription>, anyhow::Error> {
        self.usernames
            .lock()
            .unwrap()
            .push(credentials.username.clone());
        Ok(self.subscriptions.clone())
    }
}

/// In-memory `ManagementApi` that records every call as `method:resource`.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<String>>,
    fail_on: Option<String>,
    pub web_app_farm_ids: Mutex<Vec<String>>,
    pub cognitive_locations: Mutex<Vec<(String, String)>>,
    pub sql_logins: Mutex<Vec<(String, String)>>,
    pub luis_requests: Mutex<Vec<(String, String, LuisAppRequest)>>,
    pub bot_requests: Mutex<Vec<BotServiceRequest>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the call recorded as `call` fail after it is recorded.
    pub fn failing_on(call: &str) -> Self {
        Self {
            fail_on: Some(call.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, resource: &str) -> Result<(), anyhow::Error> {
        let call = format!("{}:{}", method, resource);
        self.calls.lock().unwrap().push(call.clone());
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(anyhow!("{} failed", call));
        }
        Ok(())
    }
}

#[async_trait]
impl ManagementApi for RecordingApi {
    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<Value, anyhow::Error> {
        self.record("create_resource_group", name)?;
        Ok(json!({ "name": name, "location": location }))
    }

    async fn delete_resource_group(&self, name: &str) -> Result<(), anyhow::Error> {
        self.record("delete_resource_group", name)
    }

    async fn create_hosting_plan(
        &self,
        group: &str,
        name: &str,
        _location: &str,
    ) -> Result<HostingPlan, anyhow::Error> {
        self.record("create_hosting_plan", name)?;
        Ok(HostingPlan {
            id: format!("/resourceGroups/{}/serverfarms/{}", group, name),
            name: name.to_string(),
        })
    }

    async fn create_web_app(
        &self,
        _group: &str,
        name: &str,
        _location: &str,
        server_farm_id: &str,
    ) -> Result<Value, anyhow::Error> {
        self.record("create_web_app", name)?;
        self.web_app_farm_ids
            .lock()
            .unwrap()
            .push(server_farm_id.to_string());
        Ok(json!({ "name": name }))
    }

    async fn create_sql_server(
        &self,
        _group: &str,
        name: &str,
        _location: &str,
        administrator_login: &str,
        administrator_password: &str,
    ) -> Result<Value, anyhow::Error> {
        self.record("create_sql_server", name)?;
        self.sql_logins.lock().unwrap().push((
            administrator_login.to_string(),
            administrator_password.to_string(),
        ));
        Ok(json!({ "name": name }))
    }

    async fn create_sql_database(
        &self,
        _group: &str,
        _server_name: &str,
        name: &str,
        _location: &str,
    ) -> Result<Value, anyhow::Error> {
        self.record("create_sql_database", name)?;
        Ok(json!({ "name": name }))
    }

    async fn create_search_service(
        &self,
        _group: &str,
        name: &str,
        _location: &str,
    ) -> Result<Value, anyhow::Error> {
        self.record("create_search_service", name)?;
        Ok(json!({ "name": name }))
    }

    async fn list_search_query_keys(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<Vec<SearchQueryKey>, anyhow::Error> {
        self.record("list_search_query_keys", name)?;
        Ok(vec![SearchQueryKey {
            name: None,
            key: format!("{}-query-key", name),
        }])
    }

    async fn create_cognitive_account(
        &self,
        _group: &str,
        name: &str,
        location: &str,
        kind: CognitiveServiceKind,
    ) -> Result<CognitiveAccount, anyhow::Error> {
        self.record("create_cognitive_account", name)?;
        self.cognitive_locations
            .lock()
            .unwrap()
            .push((name.to_string(), kind.location(location).to_string()));
        Ok(CognitiveAccount {
            name: name.to_string(),
            endpoint: format!("https://{}.cognitive.example.com", name),
        })
    }

    async fn list_cognitive_keys(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<CognitiveKeys, anyhow::Error> {
        self.record("list_cognitive_keys", name)?;
        Ok(CognitiveKeys {
            key1: format!("{}-key1", name),
            key2: format!("{}-key2", name),
        })
    }

    async fn create_luis_app(
        &self,
        location: &str,
        authoring_key: &str,
        app: &LuisAppRequest,
    ) -> Result<String, anyhow::Error> {
        self.record("create_luis_app", &app.name)?;
        self.luis_requests.lock().unwrap().push((
            location.to_string(),
            authoring_key.to_string(),
            app.clone(),
        ));
        Ok(format!("{}-luis-app", app.name))
    }

    async fn register_provider(&self, namespace: &str) -> Result<(), anyhow::Error> {
        self.record("register_provider", namespace)
    }

    async fn create_bot_service(
        &self,
        group: &str,
        bot: &BotServiceRequest,
    ) -> Result<Value, anyhow::Error> {
        self.record("create_bot_service", group)?;
        self.bot_requests.lock().unwrap().push(bot.clone());
        Ok(json!({ "name": bot.bot_id }))
    }

    async fn get_webchat_key(&self, group: &str, bot_id: &str) -> Result<String, anyhow::Error> {
        self.record("get_webchat_key", group)?;
        Ok(format!("{}-webchat-key", bot_id))
    }
}
