//! Environment configuration for the `etym` binary.
//!
//! Reads:
//! - `ETYM_LOG`: tracing filter directive (default: "warn")
//! - `ETYM_FORM`: default output shape, `graph` or `dict` (default: "graph")
//!
//! Command-line flags take precedence over both.

use etym_storage::DocumentForm;

/// Default tracing filter when `ETYM_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_filter: String,
    pub default_form: DocumentForm,
}

impl CliConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let log_filter = lookup("ETYM_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let default_form = match lookup("ETYM_FORM") {
            Some(value) => value
                .parse::<DocumentForm>()
                .map_err(|e| format!("ETYM_FORM: {}", e))?,
            None => DocumentForm::default(),
        };
        Ok(CliConfig {
            log_filter,
            default_form,
        })
    }

    /// Picks the output shape: the flag if given, otherwise the default.
    pub fn form(&self, flag: Option<DocumentForm>) -> DocumentForm {
        flag.unwrap_or(self.default_form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = CliConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.default_form, DocumentForm::Graph);
    }

    #[test]
    fn reads_variables() {
        let config = CliConfig::from_lookup(|name| match name {
            "ETYM_LOG" => Some("etym_storage=debug".into()),
            "ETYM_FORM" => Some("dict".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.log_filter, "etym_storage=debug");
        assert_eq!(config.form(None), DocumentForm::Dict);
        assert_eq!(config.form(Some(DocumentForm::Graph)), DocumentForm::Graph);
    }

    #[test]
    fn invalid_form_is_an_error() {
        let result = CliConfig::from_lookup(|name| (name == "ETYM_FORM").then(|| "xml".into()));
        assert!(result.unwrap_err().starts_with("ETYM_FORM:"));
    }
}
