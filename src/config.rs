use crate::*;
use confique::Config as _;
use std::{io, path::Path, sync::OnceLock};

/// Runtime settings of the batch tools.
///
/// Environment variables win over the optional TOML file, which wins over the
/// defaults; command-line flags override all of them.
#[derive(Debug, confique::Config)]
pub struct Config {
    /// `generic` or `typed`.
    #[config(env = "CANONSQL_MODE", default = "typed")]
    pub mode: String,
    /// Record field holding the SQL text.
    #[config(env = "CANONSQL_SQL_FIELD", default = "SQL")]
    pub sql_field: String,
    /// Consulted when `sql_field` is absent.
    #[config(env = "CANONSQL_SQL_FALLBACK_FIELD", default = "sql")]
    pub sql_fallback_field: String,
    #[config(env = "CANONSQL_DB_FIELD", default = "db_id")]
    pub db_field: String,
    /// Record field the template is written to.
    #[config(env = "CANONSQL_OUTPUT_FIELD", default = "canonical_sql")]
    pub output_field: String,
}

impl Config {
    /// Load the settings; a named `file` must exist.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().env();
        if let Some(file) = file {
            if !file.is_file() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("config file {} not found", file.display()),
                )
                .into());
            }
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse()
    }

    pub fn record_fields(&self) -> RecordFields {
        RecordFields {
            sql: self.sql_field.clone(),
            sql_fallback: self.sql_fallback_field.clone(),
            db: self.db_field.clone(),
            output: self.output_field.clone(),
        }
    }
}

/// Process-wide settings, loaded on first use; `file` only matters then.
pub fn config(file: Option<&Path>) -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::load(file)?;
    Ok(CONFIG.get_or_init(|| config))
}
