use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Process environment snapshot, optionally overlaid with a `.env` file.
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Load variables from a .env file; keys in the file replace process values.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)
    }

    pub fn all(&self) -> &HashMap<String, String> {
        &self.vars
    }

    /// `KEY=value` pairs with the prefix, values masked when the key looks secret.
    pub fn describe(&self, prefix: &str) -> Vec<String> {
        let mut lines: Vec<String> = self
            .vars
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| {
                if Self::is_sensitive(key) {
                    format!("{key}=***")
                } else {
                    format!("{key}={value}")
                }
            })
            .collect();
        lines.sort();
        lines
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Config(format!(
                    "Invalid env file: empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars.insert(key.to_string(), Self::unquote_value(value));
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }

    fn is_sensitive(key: &str) -> bool {
        const PATTERNS: &[&str] = &["password", "passwd", "secret", "token", "credential"];
        let key = key.to_lowercase();
        PATTERNS.iter().any(|p| key.contains(p))
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}
