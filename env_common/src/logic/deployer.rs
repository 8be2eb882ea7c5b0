use env_defs::{
    BotServiceRequest, CognitiveServiceKind, CredentialProvider, DeployerConfig, DeployerError,
    DeploymentRecord, LuisAppRequest, ManagementApi, BOT_DESCRIPTION, BOT_ICON_URL,
    BOT_SERVICE_PROVIDER, SEARCH_INDEX, SEARCH_INDEXER, STORAGE_DIALECT,
};
use env_utils::{get_rnd_admin_account, get_rnd_bot_id, get_rnd_password};
use log::{debug, info};

use crate::interface::read_until_supplied;

pub const AUTHORING_KEY_NOTICE: &str = "Please enter your LUIS Authoring Key:";

const BOT_LOCATION: &str = "global";

/// Endpoints and keys returned by one cognitive-services account.
struct CognitiveService {
    endpoint: String,
    key: String,
}

/// Provisions a bot farm through a `ManagementApi`, one awaited call at a time.
///
/// The first failing call aborts the run and its error is returned as-is.
/// Whatever was recorded before that point stays in the caller's record.
pub struct Deployer<'a> {
    api: &'a dyn ManagementApi,
    credentials: &'a dyn CredentialProvider,
    config: &'a DeployerConfig,
}

impl<'a> Deployer<'a> {
    pub fn new(
        api: &'a dyn ManagementApi,
        credentials: &'a dyn CredentialProvider,
        config: &'a DeployerConfig,
    ) -> Self {
        Deployer {
            api,
            credentials,
            config,
        }
    }

    pub async fn deploy_farm(
        &self,
        name: &str,
        location: &str,
        proxy_address: &str,
        record: &mut DeploymentRecord,
    ) -> Result<(), anyhow::Error> {
        info!("Deploying Deploy Group...");
        self.api.create_resource_group(name, location).await?;

        info!("Deploying Bot Server...");
        let plan = self
            .api
            .create_hosting_plan(name, &format!("{}-server-plan", name), location)
            .await?;
        self.api
            .create_web_app(name, &format!("{}-server", name), location, &plan.id)
            .await?;

        info!("Deploying Bot Storage...");
        let administrator_login = get_rnd_admin_account()?;
        let administrator_password = get_rnd_password()?;
        let storage_server = format!("{}-storage-server", name);
        let storage_name = format!("{}-storage", name);
        self.api
            .create_sql_server(
                name,
                &storage_server,
                location,
                &administrator_login,
                &administrator_password,
            )
            .await?;
        self.api
            .create_sql_database(name, &storage_server, &storage_name, location)
            .await?;
        record.storage_username = Some(administrator_login);
        record.storage_password = Some(administrator_password);
        record.storage_name = Some(storage_name);
        record.storage_server_name = Some(storage_server);
        record.storage_dialect = Some(STORAGE_DIALECT.to_string());

        info!("Deploying Search...");
        let search_name = format!("{}-search", name);
        self.api
            .create_search_service(name, &search_name, location)
            .await?;
        let query_keys = self.api.list_search_query_keys(name, &search_name).await?;
        let search_key = query_keys
            .into_iter()
            .next()
            .ok_or_else(|| DeployerError::MissingField(format!("query key for {}", search_name)))?;
        record.search_host = Some(format!("{}.search.windows.net", search_name));
        record.search_index = Some(SEARCH_INDEX.to_string());
        record.search_indexer = Some(SEARCH_INDEXER.to_string());
        record.search_key = Some(search_key.key);

        info!("Deploying NLP...");
        let nlp = self
            .create_cognitive_service(name, location, CognitiveServiceKind::LanguageUnderstanding)
            .await?;
        let authoring_key = self.authoring_key()?;
        let app = LuisAppRequest {
            name: name.to_string(),
            description: name.to_string(),
            culture: self.config.culture.clone(),
        };
        let nlp_app_id = self
            .api
            .create_luis_app(location, &authoring_key, &app)
            .await?;
        record.nlp_endpoint = Some(nlp.endpoint);
        record.nlp_key = Some(nlp.key.clone());
        record.nlp_app_id = Some(nlp_app_id.clone());

        info!("Deploying Speech...");
        let speech = self
            .create_cognitive_service(name, location, CognitiveServiceKind::Speech)
            .await?;
        record.speech_key_endpoint = Some(speech.endpoint);
        record.speech_key = Some(speech.key);

        info!("Deploying SpellChecker...");
        let spell_checker = self
            .create_cognitive_service(name, location, CognitiveServiceKind::SpellCheck)
            .await?;
        record.spell_checker_key = Some(spell_checker.key);
        record.spell_checker_endpoint = Some(spell_checker.endpoint);

        info!("Deploying Text Analytics...");
        let text_analytics = self
            .create_cognitive_service(name, location, CognitiveServiceKind::TextAnalytics)
            .await?;
        record.text_analytics_endpoint = Some(text_analytics.endpoint);
        record.text_analytics_key = Some(text_analytics.key);

        info!("Deploying Bot...");
        let app_id = uuid::Uuid::new_v4().to_string();
        let endpoint = format!(
            "{}/api/messages/{}",
            proxy_address.trim_end_matches('/'),
            name
        );
        self.deploy_boot_bot(record, name, &endpoint, &nlp_app_id, &nlp.key, &app_id)
            .await?;

        info!("Bot farm {} deployed", name);
        Ok(())
    }

    /// Registers the bot service and its web chat channel for an existing farm.
    pub async fn deploy_boot_bot(
        &self,
        record: &mut DeploymentRecord,
        name: &str,
        endpoint: &str,
        nlp_app_id: &str,
        nlp_key: &str,
        app_id: &str,
    ) -> Result<(), anyhow::Error> {
        let bot_id = format!("{}{}", name, get_rnd_bot_id()?);

        self.api.register_provider(BOT_SERVICE_PROVIDER).await?;

        let app_password = get_rnd_password()?;
        let bot = BotServiceRequest {
            bot_id: bot_id.clone(),
            display_name: name.to_string(),
            description: BOT_DESCRIPTION.to_string(),
            endpoint: endpoint.to_string(),
            location: BOT_LOCATION.to_string(),
            icon_url: BOT_ICON_URL.to_string(),
            luis_app_ids: vec![nlp_app_id.to_string()],
            luis_key: nlp_key.to_string(),
            app_id: app_id.to_string(),
            app_password: app_password.clone(),
        };
        debug!("Creating bot service {:?}", bot);
        self.api.create_bot_service(name, &bot).await?;
        record.marketplace_id = Some(app_id.to_string());
        record.marketplace_password = Some(app_password);

        let webchat_key = self.api.get_webchat_key(name, &bot_id).await?;
        record.webchat_key = Some(webchat_key);
        record.bot_id = Some(bot_id);
        Ok(())
    }

    /// Removes the farm's resource group and everything in it.
    pub async fn delete_deploy(&self, name: &str) -> Result<(), anyhow::Error> {
        info!("Deleting resource group {}...", name);
        self.api.delete_resource_group(name).await?;
        info!("Resource group {} deleted", name);
        Ok(())
    }

    async fn create_cognitive_service(
        &self,
        group: &str,
        location: &str,
        kind: CognitiveServiceKind,
    ) -> Result<CognitiveService, anyhow::Error> {
        let account_name = format!("{}-{}", group, kind.name_suffix());
        let account = self
            .api
            .create_cognitive_account(group, &account_name, kind.location(location), kind)
            .await?;
        let keys = self.api.list_cognitive_keys(group, &account.name).await?;
        Ok(CognitiveService {
            endpoint: account.endpoint,
            key: keys.key1,
        })
    }

    fn authoring_key(&self) -> Result<String, anyhow::Error> {
        match &self.config.authoring_key {
            Some(key) => Ok(key.clone()),
            None => {
                self.credentials.notify(AUTHORING_KEY_NOTICE);
                read_until_supplied(self.credentials, "NLP_AUTHORING_KEY", true)
            }
        }
    }
}
