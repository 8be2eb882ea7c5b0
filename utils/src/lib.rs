mod logging;
mod password;

pub use logging::setup_logging;
pub use password::{
    generate_password, get_rnd_admin_account, get_rnd_bot_id, get_rnd_password, PasswordOptions,
};
