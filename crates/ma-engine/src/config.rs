//! Configuration for assertion runs

use std::env;

/// Environment variable enabling verbose output
pub const VERBOSE_ENV: &str = "MULTI_ASSERT_VERBOSE";

/// Settings of one assertion builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertConfig {
    /// Report every successful check and the run summary, not only failures
    pub verbose: bool,
}

impl AssertConfig {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Load configuration from environment variables
    ///
    /// `MULTI_ASSERT_VERBOSE` accepts `1`, `true`, `yes` or `on`.
    pub fn from_env() -> Self {
        Self {
            verbose: env::var(VERBOSE_ENV)
                .map(|value| is_truthy(&value))
                .unwrap_or(false),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
