//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "endpoint" => config.endpoint = Some(value.to_string()),
        "duration" => config.duration = Some(value.to_string()),
        "retries" => config.retries = value.parse().ok(),
        _ => unreachable!("key validated above"),
    }

    store.save(&config).await?;
    presenter.success(&format!("Set {} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "endpoint" => config.endpoint,
        "duration" => config.duration,
        "retries" => config.retries.map(|r| r.to_string()),
        _ => unreachable!("key validated above"),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.warn(&format!("{} is not set", key)),
    }
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "endpoint",
        config.endpoint.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "duration",
        config.duration.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "retries",
        &config
            .retries
            .map(|r| r.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

/// Validate a config value for its key before saving
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "endpoint" => {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(())
            } else {
                Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Endpoint must start with http:// or https://".to_string(),
                })
            }
        }
        "duration" => value
            .parse::<Duration>()
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError {
                key: key.to_string(),
                message: e.to_string(),
            }),
        "retries" => match value.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(()),
            _ => Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: "Retries must be a whole number of at least 1".to_string(),
            }),
        },
        _ => Ok(()),
    }
}
