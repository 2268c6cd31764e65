use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Layering, lowest to highest precedence: `config/default.*`,
/// `config/{RUN_ENV}.*`, then environment variables with the `AGENDA`
/// prefix and `__` separator (e.g. `AGENDA_SERVER__PORT=8080`).
/// Values left as the `secret_from_env` marker are resolved from the
/// environment afterwards.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "AGENDA".to_string());

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2) // go from crates/agenda_config to workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_str().unwrap_or("config/default")).required(false))
        .add_source(File::with_name(env_path.to_str().unwrap_or("config/debug")).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_env_overrides_from_marker(raw_config))
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == "secret_from_env" => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = std::env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    eprintln!("Warning: env var {} not found for secret_from_env", env_key);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> AppConfig {
    let mut json = serde_json::to_value(&config).expect("AppConfig must be serializable");
    inject_env_secrets(&mut json);
    serde_json::from_value(json).expect("AppConfig must remain deserializable")
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the `.env` file is loaded into the process environment exactly once.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}
