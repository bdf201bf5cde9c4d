use crate::config::Config;
use crate::error::Result;

/// Set a config value and persist it
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;
    println!("Set {key}");
    Ok(())
}

/// Print a single config value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    let value = config.get_value(key)?;
    println!("{value}");
    Ok(())
}

/// Print the full configuration, with secrets elided
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("Configuration:");
    println!(
        "  server.url: {}",
        config.server.url.as_deref().unwrap_or("(not configured)")
    );
    println!(
        "  auth.token: {}",
        if config.auth.token.is_some() {
            "(set)"
        } else {
            "(not configured)"
        }
    );
    println!(
        "  auth.user_id: {}",
        config.auth.user_id.as_deref().unwrap_or("(not configured)")
    );
    println!(
        "  notifications.interval_secs: {}",
        config.notifications.interval_secs
    );
    Ok(())
}
