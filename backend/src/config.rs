use serde::Deserialize;

/// Runtime settings, read from `PERMISSION_SERVICE_*` environment variables
/// with development defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Comma-separated list of origins allowed by CORS.
    pub allowed_origins: String,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8081)?
            .set_default("database_path", "permissions.db")?
            .set_default(
                "allowed_origins",
                "http://localhost,http://localhost:5173,http://localhost:3000",
            )?
            .add_source(config::Environment::with_prefix("PERMISSION_SERVICE"))
            .build()?
            .try_deserialize()
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_split_and_trim() {
        let settings = Settings {
            host: "0.0.0.0".to_string(),
            port: 8081,
            database_path: "permissions.db".to_string(),
            allowed_origins: "http://localhost, http://localhost:3000,".to_string(),
        };

        assert_eq!(
            settings.origins(),
            vec!["http://localhost", "http://localhost:3000"]
        );
    }
}
