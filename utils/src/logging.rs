use std::env;

use chrono::Local;
use log::LevelFilter;

fn level_from_name(name: Option<&str>) -> LevelFilter {
    match name {
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => LevelFilter::Warn,
    }
}

/// `LOG_LEVEL` decides the level; `show_progress` raises anything quieter to `Info`.
fn resolve_level(log_level: Option<&str>, show_progress: bool) -> LevelFilter {
    let level = level_from_name(log_level);
    if show_progress && level < LevelFilter::Info {
        LevelFilter::Info
    } else {
        level
    }
}

/// Installs the stderr logger. `show_progress` raises the level to at least
/// `Info` so step-by-step deployment progress is visible.
pub fn setup_logging(show_progress: bool) -> Result<(), fern::InitError> {
    let log_level = env::var("LOG_LEVEL").ok();
    let level = resolve_level(log_level.as_deref(), show_progress);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        // Transport noise drowns out the deployment steps
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(resolve_level(None, false), LevelFilter::Warn);
        assert_eq!(resolve_level(Some("verbose"), false), LevelFilter::Warn);
    }

    #[test]
    fn test_progress_raises_quiet_levels_to_info() {
        assert_eq!(resolve_level(None, true), LevelFilter::Info);
        assert_eq!(resolve_level(Some("error"), true), LevelFilter::Info);
    }

    #[test]
    fn test_progress_keeps_debug() {
        assert_eq!(resolve_level(Some("debug"), true), LevelFilter::Debug);
        assert_eq!(resolve_level(Some("debug"), false), LevelFilter::Debug);
    }
}
