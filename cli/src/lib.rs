mod terminal;
mod utils;

pub use terminal::{format_subscriptions, TerminalCredentialProvider};
pub use utils::{record_to_json, write_record};
