use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use personapath_bedrock::client::{BedrockSettings, CredentialSource, redact_access_key};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Where the report store lives. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// HS256 secret shared with the identity provider.
    #[serde(default)]
    pub session_secret: String,
    #[serde(default)]
    pub bedrock: BedrockSettings,
    #[serde(default)]
    pub generation_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind: default_bind(),
            data_dir: None,
            session_secret: String::new(),
            bedrock: BedrockSettings::default(),
            generation_timeout_secs: None,
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Redacted config info safe to log.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub bind: String,
    pub data_dir: String,
    pub region: String,
    pub model_id: String,
    pub credential_type: String,
    pub profile_name: Option<String>,
    pub access_key_hint: Option<String>,
    pub generation_timeout_secs: Option<u64>,
}

/// `$PERSONAPATH_CONFIG`, else `<config dir>/personapath/config.json`.
pub fn config_path() -> eyre::Result<PathBuf> {
    if let Ok(path) = std::env::var("PERSONAPATH_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("personapath").join("config.json"))
}

/// Load the config file, or defaults when it does not exist.
pub fn load_config(path: &Path) -> eyre::Result<ServerConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(ServerConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ServerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update PersonaPath."
        ));
    }

    // v0 → v1: top-level `region`/`model_id` move under `bedrock`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

        let mut bedrock = serde_json::Map::new();
        if let Some(region) = obj.remove("region") {
            bedrock.insert("region".to_string(), region);
        }
        if let Some(model_id) = obj.remove("model_id") {
            bedrock.insert("model_id".to_string(), model_id);
        }
        if !bedrock.is_empty() && !obj.contains_key("bedrock") {
            let defaults = serde_json::to_value(BedrockSettings::default())?;
            if let serde_json::Value::Object(defaults) = defaults {
                for (k, v) in defaults {
                    bedrock.entry(k).or_insert(v);
                }
            }
            obj.insert("bedrock".to_string(), serde_json::Value::Object(bedrock));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (nested bedrock settings)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

impl ServerConfig {
    /// Apply environment overrides. `lookup` is `std::env::var` in
    /// production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<()> {
        if let Some(bind) = lookup("PERSONAPATH_BIND") {
            self.bind = bind;
        }
        if let Some(dir) = lookup("PERSONAPATH_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(region) = lookup("AWS_REGION") {
            self.bedrock.region = region;
        }
        if let Some(model_id) = lookup("PERSONAPATH_MODEL_ID") {
            self.bedrock.model_id = model_id;
        }
        if let Some(secret) = lookup("PERSONAPATH_SESSION_SECRET") {
            self.session_secret = secret;
        }
        if let Some(profile_name) = lookup("PERSONAPATH_AWS_PROFILE") {
            self.bedrock.credentials = Some(CredentialSource::Profile { profile_name });
        }
        if let Some(secs) = lookup("PERSONAPATH_GENERATION_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|e| eyre::eyre!("PERSONAPATH_GENERATION_TIMEOUT_SECS: {e}"))?;
            self.generation_timeout_secs = (secs > 0).then_some(secs);
        }
        Ok(())
    }

    /// Reject configs the server cannot start with.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.session_secret.trim().is_empty() {
            return Err(eyre::eyre!(
                "session secret is empty; set PERSONAPATH_SESSION_SECRET or `session_secret`"
            ));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> eyre::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let base =
                    dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
                Ok(base.join("personapath"))
            }
        }
    }

    pub fn generation_timeout(&self) -> Option<Duration> {
        self.generation_timeout_secs.map(Duration::from_secs)
    }

    pub fn summary(&self) -> ConfigSummary {
        let (credential_type, profile_name, access_key_hint) = match &self.bedrock.credentials {
            Some(CredentialSource::Inline {
                access_key_id,
                session_token,
                ..
            }) => {
                let cred_type = if session_token.is_some() {
                    "temporary"
                } else {
                    "inline"
                };
                (cred_type.to_string(), None, Some(redact_access_key(access_key_id)))
            }
            Some(CredentialSource::Profile { profile_name }) => {
                ("profile".to_string(), Some(profile_name.clone()), None)
            }
            Some(CredentialSource::DefaultChain) => ("default_chain".to_string(), None, None),
            None => ("none".to_string(), None, None),
        };

        ConfigSummary {
            bind: self.bind.clone(),
            data_dir: self
                .data_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "<platform default>".to_string()),
            region: self.bedrock.region.clone(),
            model_id: self.bedrock.model_id.clone(),
            credential_type,
            profile_name,
            access_key_hint,
            generation_timeout_secs: self.generation_timeout_secs,
        }
    }
}
