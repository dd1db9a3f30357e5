//! Environment validation at process start.
//!
//! | Variable  | Rule |
//! |-----------|------|
//! | `API_URL` | absolute URL; defaults to [`DEFAULT_API_URL`] unless `APP_ENV=production` |
//! | `PORT`    | optional; numeric port |
//!
//! Every problem is collected before failing, so one run reports all of
//! them.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

pub const API_URL: &str = "API_URL";
pub const PORT: &str = "PORT";
pub const APP_ENV: &str = "APP_ENV";

/// Validated process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Url,
    pub port: Option<u16>,
}

/// A single rejected variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub variable: &'static str,
    pub message: String,
}

/// Every variable that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid environment variables{}", summarize(.issues))]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("; {}: {}", issue.variable, issue.message))
        .collect()
}

impl ConfigError {
    /// Per-variable diagnostic, e.g. `{"API_URL": {"_errors": ["..."]}}`.
    pub fn diagnostic(&self) -> serde_json::Value {
        #[derive(Serialize, Default)]
        struct Field<'a> {
            #[serde(rename = "_errors")]
            errors: Vec<&'a str>,
        }

        let mut fields: BTreeMap<&str, Field<'_>> = BTreeMap::new();
        for issue in &self.issues {
            fields.entry(issue.variable).or_default().errors.push(&issue.message);
        }
        serde_json::to_value(fields).unwrap_or(serde_json::Value::Null)
    }
}

impl Config {
    /// Load `.env` if present, then validate the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Validate variables read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup(APP_ENV).is_some_and(|v| v == "production");
        let mut issues = Vec::new();

        let api_url = match lookup(API_URL) {
            Some(raw) => parse_url(&raw)
                .map_err(|message| issues.push(ConfigIssue { variable: API_URL, message }))
                .ok(),
            None if production => {
                issues.push(ConfigIssue {
                    variable: API_URL,
                    message: "required in production".to_string(),
                });
                None
            }
            None => parse_url(DEFAULT_API_URL).ok(),
        };

        let port = match lookup(PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| {
                    issues.push(ConfigIssue {
                        variable: PORT,
                        message: format!("expected a numeric port, got {raw:?}"),
                    })
                })
                .ok(),
            None => None,
        };

        match api_url {
            Some(api_url) if issues.is_empty() => Ok(Self { api_url, port }),
            _ => Err(ConfigError { issues }),
        }
    }

    /// Validate the environment or terminate the process.
    ///
    /// Prints the diagnostic to stderr and exits with status 1 on failure.
    pub fn load_or_exit() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(err) => {
                let diagnostic = serde_json::to_string_pretty(&err.diagnostic()).unwrap_or_else(|_| err.to_string());
                eprintln!("Invalid environment variables: {diagnostic}");
                std::process::exit(1);
            }
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, String> {
    Url::parse(raw).map_err(|e| format!("invalid url {raw:?}: {e}"))
}
