pub mod interface;
pub mod logic;

#[cfg(test)]
mod testing;

pub use interface::{
    ensure_context, ensure_subscription, read_until_supplied, FIRST_RUN_NOTICE,
};
pub use logic::{Deployer, AUTHORING_KEY_NOTICE};
