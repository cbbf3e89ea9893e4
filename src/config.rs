use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct KondateConfig {
    /// Ingredient line parser settings
    #[serde(default)]
    pub parser: ParserConfig,
    /// Length limits used by ingredient validation
    #[serde(default)]
    pub limits: IngredientLimits,
}

/// Settings for the ingredient line parser
#[derive(Debug, Deserialize, Clone)]
pub struct ParserConfig {
    /// Separator placed between collected note fragments
    #[serde(default = "default_note_separator")]
    pub note_separator: String,
    /// Qualitative quantity words recognized on top of the built-in set
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            note_separator: default_note_separator(),
            extra_keywords: Vec::new(),
        }
    }
}

/// Maximum field lengths, counted in characters
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct IngredientLimits {
    #[serde(default = "default_max_unit_chars")]
    pub max_unit_chars: usize,
    #[serde(default = "default_max_note_chars")]
    pub max_note_chars: usize,
}

impl Default for IngredientLimits {
    fn default() -> Self {
        Self {
            max_unit_chars: default_max_unit_chars(),
            max_note_chars: default_max_note_chars(),
        }
    }
}

// Default value functions
fn default_note_separator() -> String {
    " / ".to_string()
}

fn default_max_unit_chars() -> usize {
    20
}

fn default_max_note_chars() -> usize {
    120
}

impl KondateConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with KONDATE__ prefix
    /// 2. kondate.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: KONDATE__PARSER__NOTE_SEPARATOR
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration, see [`KondateConfig::load`]
pub fn load_config() -> Result<KondateConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("kondate").required(false))
        .add_source(
            Environment::with_prefix("KONDATE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("parser.extra_keywords"),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_note_separator(), " / ");
        assert_eq!(default_max_unit_chars(), 20);
        assert_eq!(default_max_note_chars(), 120);
    }

    #[test]
    fn test_parser_config_default() {
        let parser = ParserConfig::default();
        assert_eq!(parser.note_separator, " / ");
        assert!(parser.extra_keywords.is_empty());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "[parser]\nextra_keywords = [\"ひとつまみ\"]\n\n[limits]\nmax_note_chars = 60\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: KondateConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.parser.note_separator, " / ");
        assert_eq!(config.parser.extra_keywords, vec!["ひとつまみ".to_string()]);
        assert_eq!(config.limits.max_unit_chars, 20);
        assert_eq!(config.limits.max_note_chars, 60);
    }

    #[test]
    fn test_load_config_without_file() {
        // No kondate.toml in the test working directory; defaults apply
        let config = load_config().unwrap();
        assert_eq!(config.limits, IngredientLimits::default());
    }
}
