//! Configuration text loading
//!
//! Parses TOML into a [`RobotConfig`] and checks it. Reading the text from
//! storage is up to the integrator.

use tandem_core::config::{RobotConfig, ValidationError};

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The text is not valid TOML for a robot configuration
    Parse,
    /// The configuration parsed but is not usable
    Invalid(ValidationError),
}

impl From<ValidationError> for ConfigError {
    fn from(e: ValidationError) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Parse and validate a TOML robot configuration
///
/// Missing tables and keys take their defaults.
pub fn parse_config(text: &str) -> Result<RobotConfig, ConfigError> {
    let config: RobotConfig = toml::from_str(text).map_err(|_e| {
        warn!("config parse failed");
        ConfigError::Parse
    })?;
    config.validate()?;
    info!(
        "config loaded: tick {} ms, {} routines",
        config.control.tick_ms,
        config.routines.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::config::ArgValue;
    use tandem_core::Tag;

    #[test]
    fn test_empty_text_gives_defaults() {
        assert_eq!(parse_config(""), Ok(RobotConfig::default()));
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(
            r#"
            [control]
            tick_ms = 10

            [drive]
            invert_right = true
            deadband = 0.05

            [autonomous]
            feed_ms = 250

            [autonomous.drive_pid]
            kp = 0.2

            [[routine]]
            name = "drive-and-shoot"
            steps = [
                { tag = "sequential", call = "driveToSetpoint", args = [48] },
                { tag = "concurrent", call = "log", args = ["spinning"] },
                { tag = "concurrent", call = "autoShoot" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.control.tick_ms, 10);
        assert!(config.drive.invert_right);
        assert!(!config.drive.invert_left);
        assert_eq!(config.autonomous.feed_ms, 250);
        assert_eq!(config.autonomous.drive_pid.kp, 0.2);
        assert_eq!(config.autonomous.drive_timeout_ms, 5000);

        let routine = config.routine("drive-and-shoot").unwrap();
        assert_eq!(routine.steps.len(), 3);
        assert_eq!(routine.steps[0].args[0], ArgValue::Number(48.0));
        assert_eq!(routine.steps[1].tag, Tag::Concurrent);
        assert_eq!(routine.steps[1].args[0].to_string(), "spinning");
        assert!(routine.steps[2].args.is_empty());
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(parse_config("[control"), Err(ConfigError::Parse));
    }

    #[test]
    fn test_unknown_tag() {
        let text = r#"
            [[routine]]
            name = "x"
            steps = [{ tag = "parallel", call = "stop" }]
        "#;
        assert_eq!(parse_config(text), Err(ConfigError::Parse));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[control]\ntick_ms = 0"),
            Err(ConfigError::Invalid(ValidationError::InvalidTickPeriod))
        );
    }
}
