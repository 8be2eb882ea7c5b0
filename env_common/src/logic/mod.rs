mod deployer;

pub use deployer::{Deployer, AUTHORING_KEY_NOTICE};
