//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, LOCAL_CONFIG_FILE};
use crate::error::{AltrootError, AltrootResult};
use crate::ui::{self, UiContext};
use tokio::fs;

const VALID_KEYS: [&str; 4] = [
    "general.verbose",
    "general.log_format",
    "prefix.root",
    "prefix.max_symlinks",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> AltrootResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&key, &value).await?
            } else {
                set_value(manager, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> AltrootResult<()> {
    let toml = toml::to_string_pretty(config)?;
    println!("{}", toml);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> AltrootResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());

    Ok(())
}

/// Set a key in the global config file only.
///
/// Starts from the file on disk rather than the merged view, so values
/// from a project-local file never leak into the global one.
async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> AltrootResult<()> {
    let ctx = UiContext::detect();
    if !VALID_KEYS.contains(&key) {
        ui::step_error_detail(&ctx, "Unknown config key", key);
        ui::remark(&ctx, "Valid keys:");
        print_valid_keys();
        return Err(AltrootError::User(format!("Unknown config key: {}", key)));
    }

    let mut config = manager.load().await?;
    apply_value(&mut config, key, value)?;

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a dot-separated key to a config value
fn apply_value(config: &mut Config, key: &str, value: &str) -> AltrootResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,
        ["prefix", "root"] => {
            config.prefix.root = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
        ["prefix", "max_symlinks"] => config.prefix.max_symlinks = parse_bound(value)?,
        _ => return Err(AltrootError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

async fn set_local_value(key: &str, value: &str) -> AltrootResult<()> {
    let ctx = UiContext::detect();

    let cwd =
        std::env::current_dir().map_err(|e| AltrootError::io("getting current directory", e))?;
    let local_path = cwd.join(LOCAL_CONFIG_FILE);

    // Validate key and value before touching the file
    apply_value(&mut Config::default(), key, value)?;

    // Load existing local config or start with an empty TOML table
    let mut doc: toml::Value = if local_path.exists() {
        let content = fs::read_to_string(&local_path)
            .await
            .map_err(|e| AltrootError::io(format!("reading {}", local_path.display()), e))?;
        content
            .parse()
            .map_err(|e: toml::de::Error| AltrootError::ConfigInvalid {
                path: local_path.clone(),
                reason: e.to_string(),
            })?
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    set_toml_value(&mut doc, key, value)?;

    // Write back only the keys the user has explicitly set
    let content = toml::to_string_pretty(&doc)?;
    fs::write(&local_path, content)
        .await
        .map_err(|e| AltrootError::io(format!("writing {}", local_path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Set {} = {} in {}", key, value, local_path.display()),
    );

    Ok(())
}

/// Set a dot-separated key in a TOML value tree, creating intermediate tables as needed.
fn set_toml_value(doc: &mut toml::Value, key: &str, value: &str) -> AltrootResult<()> {
    let Some((tables, leaf)) = key.rsplit_once('.') else {
        return Err(AltrootError::User(format!("Unknown config key: {}", key)));
    };

    let mut current = doc;
    for part in tables.split('.') {
        current = current
            .as_table_mut()
            .ok_or_else(|| AltrootError::User(format!("Expected table at key: {}", part)))?
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| AltrootError::User(format!("Expected table for key: {}", key)))?;

    let toml_value = match key {
        "general.verbose" => toml::Value::Boolean(parse_bool(value)?),
        "prefix.max_symlinks" => toml::Value::Integer(i64::from(parse_bound(value)?)),
        _ => toml::Value::String(value.to_string()),
    };

    table.insert(leaf.to_string(), toml_value);
    Ok(())
}

fn parse_bool(value: &str) -> AltrootResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AltrootError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_log_format(value: &str) -> AltrootResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(AltrootError::User(format!(
            "Invalid log format: {}. Use text or json",
            value
        ))),
    }
}

fn parse_bound(value: &str) -> AltrootResult<u32> {
    match value.parse::<u32>() {
        Ok(0) | Err(_) => Err(AltrootError::User(format!(
            "Invalid symlink bound: {}. Use a positive number",
            value
        ))),
        Ok(n) => Ok(n),
    }
}

fn print_valid_keys() {
    for key in VALID_KEYS {
        eprintln!("  {}", key);
    }
}
