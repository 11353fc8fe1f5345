use serde::Deserialize;

const ENV_PREFIX: &str = "TRIVIA";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    // allow any origin when unset
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl Settings {
    /// Reads `TRIVIA_*` variables, after loading `.env` if one is present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source<S>(source: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
