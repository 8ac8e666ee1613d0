//! Declarative generator configuration that callers can serialize/deserialize.
//!
//! This is pure data; `enumgen-registry` turns it into a `Generator`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Increment policy of a sequential generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// +1 for numbers, alphabetic odometer for text.
    #[default]
    Step,
    /// Left shift by one bit (integers only; other kinds repeat).
    BitFlag,
    /// `(current + 1) mod modulus`, integers only. `modulus <= 0` is coerced to 1.
    Cyclic { modulus: i64 },
    /// `prefix + n`, text only.
    Prefixed { prefix: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Textual form of the first value. `None` means the zero value.
    /// For `Prefixed` this is the numeric suffix of the first value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default)]
    pub policy: Policy,
}

impl GeneratorConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables (with `prefix = "STATUS"`):
    /// - `STATUS_POLICY`: `step`, `bit_flag`, `cyclic`, or `prefixed`
    /// - `STATUS_START`: textual start value
    /// - `STATUS_MODULUS`: modulus for `cyclic` (default 1)
    /// - `STATUS_PREFIX`: prefix for `prefixed` (default empty)
    pub fn from_env(prefix: &str) -> Self {
        let var = |name: &str| std::env::var(format!("{prefix}_{name}")).ok();

        let policy = match var("POLICY").as_deref() {
            Some("bit_flag") => Policy::BitFlag,
            Some("cyclic") => Policy::Cyclic {
                modulus: var("MODULUS").and_then(|s| s.parse().ok()).unwrap_or(1),
            },
            Some("prefixed") => Policy::Prefixed {
                prefix: var("PREFIX").unwrap_or_default(),
            },
            _ => Policy::Step,
        };

        Self {
            start: var("START"),
            policy,
        }
    }
}
