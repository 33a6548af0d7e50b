//! configuration validation stuff
use crate::{config::options::*, validator};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// log levels `logging.level` accepts
const VALID_LOG_LEVELS: &[&str] = &[
    "t", "trace", "trc", "d", "debug", "dbg", "i", "info", "inf", "w", "warn", "wrn", "e",
    "error", "err",
];

/// whether a value looks like an http(s) url
fn is_http_url(v: &str) -> bool {
    v.starts_with("http://") || v.starts_with("https://")
}

validator! { ApiCfg,
    base_url => |v: &String| is_http_url(v),
        "must be an http(s) url";
    feeds_url => |v: &String| is_http_url(v),
        "must be an http(s) url";
    user_agent => |v: &String| !v.trim().is_empty(),
        "must not be empty";
}

validator! { LoginCfg,
    username => |v: &String| !v.chars().any(char::is_whitespace),
        "must not contain whitespace";
}

validator! { LoggingConfig,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of trace, debug, info, warn or error";
}

impl Validate for DeliciousCfg {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = Vec::new();

        macro_rules! validate_nested {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(ref nested) = self.$field {
                        if let Err(nested_errors) = nested.validate() {
                            for err in nested_errors {
                                errors.push(format!("{}.{}", stringify!($field), err));
                            }
                        }
                    }
                )*
            };
        }

        validate_nested!(api, login, logging);

        if self.version == Some(0) {
            errors.push("version: must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// format validation errors for display
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, err) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DeliciousCfg::default().is_valid());
    }

    #[test]
    fn test_nested_errors_are_prefixed() {
        let cfg = DeliciousCfg {
            api: Some(ApiCfg {
                base_url: Some("ftp://nope".into()),
                ..Default::default()
            }),
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = cfg.validate().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("api.base_url"));
        assert!(errors[1].starts_with("logging.level"));
    }

    #[test]
    fn test_format_errors() {
        let out = format_validation_errors(&["a: bad".into(), "b: worse".into()]);
        assert!(out.contains("  1. a: bad\n"));
        assert!(out.contains("  2. b: worse\n"));
    }
}
