use crate::log_internal;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/lorebot/config.toml";
const KNOWLEDGE_PATH_REL_HOME: &str = ".config/lorebot/knowledge";

/// Bot configuration
///
/// Everything has a default, so the bot starts with no config file at all.
/// Secrets are taken from the environment, never from the file.
#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub knowledge: Knowledge,
    pub llm: Llm,
    #[serde(skip)]
    pub secrets: Secrets,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Knowledge {
    /// Folder of `.txt` sources, or a single file.  Defaults to
    /// `~/.config/lorebot/knowledge`.
    pub folder: Option<PathBuf>,
    /// Chunk window, in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in characters
    pub chunk_overlap: usize,
    /// How many chunks a similarity query returns
    pub top_k: usize,
    /// Batch embedding endpoint (Ollama wire format)
    pub embed_url: String,
    pub embed_model: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Llm {
    /// OpenAI-compatible chat completion endpoint
    pub chat_url: String,
    pub model_name: String,
    /// System persona.  `{{bot}}` expands to the bot's username.
    pub system: String,
    pub temperature: f32,
}

#[derive(Default)]
pub struct Secrets {
    pub discord_token: String,
    pub api_key: Option<String>,
}

impl Default for Knowledge {
    fn default() -> Self {
        Self {
            folder: None,
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
            embed_url: "http://localhost:11434/api/embed".to_string(),
            embed_model: "nomic-embed-text".to_string(),
        }
    }
}

impl Default for Llm {
    fn default() -> Self {
        Self {
            chat_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model_name: "llama3-70b-8192".to_string(),
            system: "You are {{bot}}, a helpful and intelligent Discord assistant.".to_string(),
            temperature: 0.7,
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = match tokio::fs::File::open(&path).await {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents).await.map_err(|e| {
                    anyhow!(
                        "Could not read configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?;

                toml::from_str(&contents).map_err(|e| {
                    anyhow!(
                        "Could not parse configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?
            }
            Err(_) => {
                log_internal!(
                    "No configuration at `{}`; using defaults",
                    path.to_string_lossy()
                );
                Config::default()
            }
        };

        config.secrets = Secrets::from_env()?;
        Ok(config)
    }
}

impl Knowledge {
    pub fn folder_path(&self) -> Result<PathBuf> {
        match &self.folder {
            Some(folder) => Ok(folder.clone()),
            None => dirs::home_dir()
                .map(|p| p.join(KNOWLEDGE_PATH_REL_HOME))
                .ok_or(anyhow!("Could not find home directory")),
        }
    }
}

impl Secrets {
    fn from_env() -> Result<Self> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN environment variable is not set"))?;

        let api_key = std::env::var("LLM_API_KEY").ok();
        if api_key.is_none() {
            // Not fatal: the bot can still index and connect.  The first
            // inference request will fail and surface as a per-message error.
            log_internal!("LLM_API_KEY is not set; inference requests will fail until it is");
        }

        Ok(Self {
            discord_token,
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.knowledge.chunk_size, 1000);
        assert_eq!(config.knowledge.chunk_overlap, 200);
        assert_eq!(config.knowledge.top_k, 3);
        assert_eq!(config.llm.model_name, "llama3-70b-8192");
        assert!(config.knowledge.folder.is_none());
        assert!(config.secrets.api_key.is_none());
    }

    #[test]
    fn partial_config_file_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [knowledge]
            folder = "/srv/lore"
            chunk_size = 500

            [llm]
            model_name = "llama-3.1-8b-instant"
            "#,
        )
        .unwrap();

        assert_eq!(config.knowledge.folder_path().unwrap(), PathBuf::from("/srv/lore"));
        assert_eq!(config.knowledge.chunk_size, 500);
        // Untouched fields keep their defaults
        assert_eq!(config.knowledge.chunk_overlap, 200);
        assert_eq!(config.llm.model_name, "llama-3.1-8b-instant");
        assert_eq!(config.llm.temperature, 0.7);
    }
}
