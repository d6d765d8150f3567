use core::fmt::{Debug, Display};
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use section_matcher_optimizer::cost::CostFunction;
use section_matcher_optimizer::section::SectionDefaults;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "section-matcher.toml";
pub const ENV_PREFIX: &str = "SM_";
pub const DEFAULT_LOG_FILTER: &str = "info,section_matcher_optimizer=debug";

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MatcherConfig {
    pub cost: CostFunction,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub matcher: MatcherConfig,
    pub section: SectionDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            matcher: MatcherConfig::default(),
            section: SectionDefaults::default(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(Box::new(value))
    }
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Defaults, then the TOML file, then `SM_` environment variables. Nested keys
/// are separated by `__`, e.g. `SM_SECTION__CAPACITY=6`.
#[must_use]
pub fn layered(file: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn get_config(file: Option<&Path>) -> Result<Config, ConfigError> {
    Ok(layered(file.unwrap_or_else(|| Path::new(CONFIG_FILE))).extract()?)
}

#[cfg(test)]
#[allow(
    clippy::result_large_err,
    reason = "figment::Jail closures return figment::Error"
)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = get_config(None).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    log_filter = "warn"

                    [matcher.cost]
                    kind = "linear"
                    ceiling = 5

                    [section]
                    capacity = 4
                    description = "from file"
                "#,
            )?;
            jail.set_env("SM_SECTION__CAPACITY", "7");

            let config = get_config(None).unwrap();
            assert_eq!(config.log_filter, "warn");
            assert_eq!(config.matcher.cost, CostFunction::Linear { ceiling: 5 });
            assert_eq!(config.section.capacity, 7);
            assert_eq!(config.section.description, "from file");
            Ok(())
        });
    }

    #[test]
    fn reports_bad_values() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[section]\ncapacity = \"many\"")?;
            let error = get_config(Some(Path::new("custom.toml"))).unwrap_err();
            assert!(error.to_string().starts_with("config error:"));
            Ok(())
        });
    }
}
