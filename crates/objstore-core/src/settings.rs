//! # Settings
//!
//! Typed configuration for the schema-validation feature. String-valued
//! configuration (environment variables, `.ini`-style maps) is parsed once
//! through the permissive [`as_bool`] parser; everything downstream sees a
//! plain `bool`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Setting name of the schema validation feature flag.
pub const SCHEMA_VALIDATION_SETTING: &str = "experimental_collection_schema_validation";

/// Prefix applied to setting names when read from the environment.
pub const ENV_PREFIX: &str = "OBJSTORE_";

/// Permissive boolean parser.
///
/// `true`, `yes`, `on`, `y`, `t` and `1` (case-insensitive, surrounding
/// whitespace ignored) are true. Everything else, including the empty
/// string, is false.
pub fn as_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "y" | "t" | "1"
    )
}

/// Backend settings consulted while handling a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Validate written objects against schemas found on their parents.
    #[serde(default)]
    pub experimental_collection_schema_validation: bool,
}

impl Settings {
    /// Settings with schema validation switched on.
    pub fn with_schema_validation() -> Self {
        Self {
            experimental_collection_schema_validation: true,
        }
    }

    /// Build settings from a string map. Absent keys keep their default.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            experimental_collection_schema_validation: map
                .get(SCHEMA_VALIDATION_SETTING)
                .is_some_and(|v| as_bool(v)),
        }
    }

    /// Build settings from `OBJSTORE_*` environment variables.
    pub fn from_env() -> Self {
        let key = format!("{ENV_PREFIX}{}", SCHEMA_VALIDATION_SETTING.to_ascii_uppercase());
        let map: HashMap<String, String> = std::env::var(&key)
            .ok()
            .map(|v| (SCHEMA_VALIDATION_SETTING.to_string(), v))
            .into_iter()
            .collect();
        Self::from_map(&map)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Case and padding never change the parsed value.
        #[test]
        fn case_and_padding_insensitive(
            word in prop_oneof![Just("true"), Just("yes"), Just("on"), Just("false"), Just("off")],
            upper in any::<bool>(),
            pad in " {0,3}",
        ) {
            let raw = if upper { word.to_ascii_uppercase() } else { word.to_string() };
            let padded = format!("{pad}{raw}{pad}");
            prop_assert_eq!(as_bool(&padded), as_bool(word));
        }
    }
}
