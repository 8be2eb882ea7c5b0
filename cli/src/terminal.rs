use env_defs::{CredentialProvider, Subscription};
use inquire::{CustomType, Password, Text};

/// Asks the operator on the terminal for values missing from the environment.
pub struct TerminalCredentialProvider;

impl CredentialProvider for TerminalCredentialProvider {
    fn read_value(&self, key: &str, secret: bool) -> Result<Option<String>, anyhow::Error> {
        let prompt = format!("{}:", key);
        let value = if secret {
            Password::new(&prompt).without_confirmation().prompt()?
        } else {
            Text::new(&prompt).prompt()?
        };
        Ok(Some(value))
    }

    fn select_subscription(
        &self,
        subscriptions: &[Subscription],
    ) -> Result<Option<usize>, anyhow::Error> {
        println!("{}", format_subscriptions(subscriptions));
        let choice = CustomType::<usize>::new("CLOUD_SUBSCRIPTIONID (type a number):")
            .with_error_message("Please type a number")
            .prompt()?;
        // Listed from 1
        Ok(choice.checked_sub(1))
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

pub fn format_subscriptions(subscriptions: &[Subscription]) -> String {
    subscriptions
        .iter()
        .enumerate()
        .map(|(index, subscription)| {
            format!(
                "{}: {} ({})",
                index + 1,
                subscription.display_name,
                subscription.subscription_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
