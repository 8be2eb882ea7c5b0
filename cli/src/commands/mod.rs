mod deploy;
mod schema;
mod subscriptions;
mod teardown;

pub use deploy::handle_deploy;
pub use schema::handle_search_schema;
pub use subscriptions::handle_subscriptions;
pub use teardown::handle_teardown;
