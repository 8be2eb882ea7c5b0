use serde::{Deserialize, Serialize};

pub const BOT_SERVICE_PROVIDER: &str = "Microsoft.BotService";
pub const BOT_DESCRIPTION: &str = "General BootBot";
pub const BOT_ICON_URL: &str =
    "https://github.com/pragmatismo-io/BotServer/blob/master/docs/images/generalbots-logo-squared.png";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct HostingPlan {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SearchQueryKey {
    #[serde(default)]
    pub name: Option<String>,
    pub key: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CognitiveAccount {
    pub name: String,
    pub endpoint: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CognitiveKeys {
    pub key1: String,
    pub key2: String,
}

/// Capability of a cognitive-services account. The variant decides the `kind`
/// sent to the provider and whether the account is pinned to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CognitiveServiceKind {
    LanguageUnderstanding,
    Speech,
    SpellCheck,
    TextAnalytics,
}

impl CognitiveServiceKind {
    pub fn as_kind(&self) -> &'static str {
        match self {
            CognitiveServiceKind::LanguageUnderstanding => "LUIS",
            CognitiveServiceKind::Speech => "SpeechServices",
            CognitiveServiceKind::SpellCheck => "Bing.SpellCheck.v7",
            CognitiveServiceKind::TextAnalytics => "TextAnalytics",
        }
    }

    /// Suffix appended to the farm name to build the account name.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            CognitiveServiceKind::LanguageUnderstanding => "nlp",
            CognitiveServiceKind::Speech => "speech",
            CognitiveServiceKind::SpellCheck => "spellchecker",
            CognitiveServiceKind::TextAnalytics => "textanalytics",
        }
    }

    /// Bing spell check only exists as a global resource.
    pub fn location<'a>(&self, requested: &'a str) -> &'a str {
        match self {
            CognitiveServiceKind::SpellCheck => "global",
            _ => requested,
        }
    }
}

impl std::fmt::Display for CognitiveServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_kind())
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LuisAppRequest {
    pub name: String,
    pub description: String,
    pub culture: String,
}

#[derive(Clone, PartialEq)]
pub struct BotServiceRequest {
    pub bot_id: String,
    pub display_name: String,
    pub description: String,
    pub endpoint: String,
    pub location: String,
    pub icon_url: String,
    pub luis_app_ids: Vec<String>,
    pub luis_key: String,
    pub app_id: String,
    pub app_password: String,
}

impl std::fmt::Debug for BotServiceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotServiceRequest")
            .field("bot_id", &self.bot_id)
            .field("display_name", &self.display_name)
            .field("endpoint", &self.endpoint)
            .field("location", &self.location)
            .field("luis_app_ids", &self.luis_app_ids)
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spell_check_is_always_global() {
        assert_eq!(CognitiveServiceKind::SpellCheck.location("westeurope"), "global");
        assert_eq!(CognitiveServiceKind::Speech.location("westeurope"), "westeurope");
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(CognitiveServiceKind::LanguageUnderstanding.to_string(), "LUIS");
        assert_eq!(CognitiveServiceKind::TextAnalytics.as_kind(), "TextAnalytics");
        assert_eq!(CognitiveServiceKind::SpellCheck.name_suffix(), "spellchecker");
    }
}
