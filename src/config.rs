use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub neo4j: Neo4jConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            username: default_username(),
            password: String::new(),
            database: default_database(),
        }
    }
}

fn default_port() -> String {
    "3001".to_string()
}

fn default_uri() -> String {
    "127.0.0.1:7687".to_string()
}

fn default_username() -> String {
    "neo4j".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Load the config file if it exists, then let the environment win.
    /// Deployments of the original service were configured purely through
    /// NEO4J_* variables, so both sources have to keep working.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = if std::path::Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.overlay_env();
        Ok(config)
    }

    fn overlay_env(&mut self) {
        if let Ok(uri) = std::env::var("NEO4J_URI") {
            self.neo4j.uri = uri;
        }
        if let Ok(user) = std::env::var("NEO4J_USERNAME").or_else(|_| std::env::var("NEO4J_USER")) {
            self.neo4j.username = user;
        }
        if let Ok(password) = std::env::var("NEO4J_PASSWORD") {
            self.neo4j.password = password;
        }
        if let Ok(database) = std::env::var("NEO4J_DATABASE") {
            self.neo4j.database = database;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.listen.port = port;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
