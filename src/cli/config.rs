use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::cli::{FieldsArgs, SearchArgs, ServeArgs};
use crate::models::{default_display_fields, DisplayField, FieldNames};

/// Top-level representation of `.natlas/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub data: Option<DataSection>,

    #[serde(default)]
    pub serve: Option<ServeSection>,

    #[serde(default)]
    pub http: Option<HttpSection>,

    /// Schema keys of the short and official long name columns.
    #[serde(default)]
    pub fields: Option<FieldNames>,

    /// Headline fields for the detail page, in display order.
    #[serde(default)]
    pub display: Vec<DisplayField>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DataSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServeSection {
    #[serde(default)]
    pub addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HttpSection {
    #[serde(default)]
    pub server_url: Option<String>,
}

impl CliConfig {
    /// Configured field names, or the country dataset defaults.
    pub fn field_names(&self) -> FieldNames {
        self.fields.clone().unwrap_or_default()
    }

    /// Configured display table, or the country dataset defaults when
    /// none is given.
    pub fn display_fields(&self) -> Vec<DisplayField> {
        if self.display.is_empty() {
            default_display_fields()
        } else {
            self.display.clone()
        }
    }

    fn data_path(&self) -> Option<&PathBuf> {
        self.data.as_ref().and_then(|data| data.path.as_ref())
    }
}

/// Discover and load a project-local `.natlas/config.toml` (or
/// `.natlas/natlas.toml`) starting from the current working directory
/// and walking up parent directories.
pub fn load_cli_config() -> Result<Option<CliConfig>> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let config_path = find_project_config(&cwd);

    let Some(path) = config_path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: CliConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse TOML config at {}", path.display()))?;

    debug!(path = %path.display(), "loaded project config");

    Ok(Some(config))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);

    while let Some(current) = dir {
        let natlas_dir = current.join(".natlas");
        let config_toml = natlas_dir.join("config.toml");
        if config_toml.is_file() {
            return Some(config_toml);
        }

        let natlas_toml = natlas_dir.join("natlas.toml");
        if natlas_toml.is_file() {
            return Some(natlas_toml);
        }

        dir = current.parent();
    }

    None
}

pub fn apply_serve_config_defaults(config: &CliConfig, args: &mut ServeArgs) {
    if args.data.is_none() {
        if let Some(path) = config.data_path() {
            args.data = Some(path.clone());
        }
    }

    // A platform-provided port outranks the project file; only an
    // unconfigured invocation picks up `[serve] addr`.
    if args.addr.is_none() && args.port.is_none() {
        if let Some(serve) = &config.serve {
            if let Some(addr) = &serve.addr {
                args.addr = Some(addr.clone());
            }
        }
    }
}

pub fn apply_search_config_defaults(config: &CliConfig, args: &mut SearchArgs) {
    if args.data.is_none() {
        if let Some(path) = config.data_path() {
            args.data = Some(path.clone());
        }
    }

    if args.server.is_none() {
        if let Some(http) = &config.http {
            if let Some(url) = &http.server_url {
                args.server = Some(url.clone());
            }
        }
    }
}

pub fn apply_fields_config_defaults(config: &CliConfig, args: &mut FieldsArgs) {
    if args.data.is_none() {
        if let Some(path) = config.data_path() {
            args.data = Some(path.clone());
        }
    }
}
