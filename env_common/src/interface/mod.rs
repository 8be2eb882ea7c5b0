mod context;

pub use context::{ensure_context, ensure_subscription, read_until_supplied, FIRST_RUN_NOTICE};
