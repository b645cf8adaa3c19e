//! Optional TOML configuration for the command line.
//!
//! ```toml
//! [format]
//! true_label = "Ja"
//! false_label = "Nein"
//! separator = "; "
//!
//! [format.choices]
//! opt_1 = "First option"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use cellform_core::DefaultFormatter;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: FormatConfig,
}

/// Overrides for the placeholder formatter. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    pub true_label: Option<String>,
    pub false_label: Option<String>,
    pub separator: Option<String>,
    pub choices: BTreeMap<String, String>,
}

impl Config {
    /// Load the config at `path`, or the defaults when no path is given.
    ///
    /// Returns a human-readable error string on failure.
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
    }

    pub fn formatter(&self) -> DefaultFormatter {
        let defaults = DefaultFormatter::default();
        let f = &self.format;
        DefaultFormatter {
            true_label: f.true_label.clone().unwrap_or(defaults.true_label),
            false_label: f.false_label.clone().unwrap_or(defaults.false_label),
            separator: f.separator.clone().unwrap_or(defaults.separator),
            choices: f.choices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellform_core::{TypedValue, ValueFormatter};

    #[test]
    fn empty_config_uses_formatter_defaults() {
        let config: Config = toml::from_str("").unwrap();
        let f = config.formatter();
        assert_eq!(f.format(&TypedValue::Boolean(true)), "Yes");
        assert_eq!(f.separator, ", ");
    }

    #[test]
    fn overrides_apply() {
        let config: Config = toml::from_str(
            r#"
            [format]
            true_label = "Ja"
            separator = " | "

            [format.choices]
            c1 = "Rot"
            "#,
        )
        .unwrap();
        let f = config.formatter();
        assert_eq!(f.format(&TypedValue::Boolean(true)), "Ja");
        assert_eq!(f.format(&TypedValue::Boolean(false)), "No");
        assert_eq!(
            f.format(&TypedValue::ChoiceList(vec!["c1".into(), "c2".into()])),
            "Rot | c2"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[format]\ncolour = 1\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/cellform.toml"))).unwrap_err();
        assert!(err.contains("could not read"));
    }
}
