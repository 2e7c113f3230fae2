//! Controls configuration

use arcade_physics::CharacterControllerConfig;
use serde::{Deserialize, Serialize};

use crate::ControllerError;

/// Options recognized by the arcade controls. Field names serialize in
/// camelCase (`movementSpeed`, `jumpKey`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsConfig {
    /// Horizontal speed in units per second
    pub movement_speed: f32,
    /// Body height in units
    pub height: f32,
    /// Body width in units
    pub width: f32,
    /// Jump launch speed in units per second
    pub jump_start_speed: f32,
    pub forward_key: String,
    pub backward_key: String,
    pub left_key: String,
    pub right_key: String,
    pub jump_key: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            movement_speed: 2.0,
            height: 2.0,
            width: 0.5,
            jump_start_speed: 5.0,
            forward_key: "w".to_string(),
            backward_key: "s".to_string(),
            left_key: "a".to_string(),
            right_key: "d".to_string(),
            jump_key: " ".to_string(),
        }
    }
}

impl ControlsConfig {
    /// Check the values a controller cannot run with.
    ///
    /// Height and width must be finite and positive; speeds must be finite and
    /// non-negative; key identifiers must not be empty.
    pub fn validate(&self) -> Result<(), ControllerError> {
        let positive = [("height", self.height), ("width", self.width)];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ControllerError::InvalidConfig { field, value });
            }
        }

        let non_negative = [
            ("movementSpeed", self.movement_speed),
            ("jumpStartSpeed", self.jump_start_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ControllerError::InvalidConfig { field, value });
            }
        }

        let keys = [
            ("forwardKey", &self.forward_key),
            ("backwardKey", &self.backward_key),
            ("leftKey", &self.left_key),
            ("rightKey", &self.right_key),
            ("jumpKey", &self.jump_key),
        ];
        for (field, key) in keys {
            if key.is_empty() {
                return Err(ControllerError::EmptyKey(field));
            }
        }

        Ok(())
    }

    /// Body and movement parameters for the physics controller
    pub fn body(&self) -> CharacterControllerConfig {
        CharacterControllerConfig {
            movement_speed: self.movement_speed,
            height: self.height,
            width: self.width,
            jump_start_speed: self.jump_start_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControlsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.body(), CharacterControllerConfig::default());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = ControlsConfig {
            height: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ControllerError::InvalidConfig {
                field: "height",
                value: 0.0
            })
        );

        let config = ControlsConfig {
            movement_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ControllerError::InvalidConfig {
                field: "movementSpeed",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_empty_key() {
        let config = ControlsConfig {
            jump_key: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ControllerError::EmptyKey("jumpKey")));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ControlsConfig = toml::from_str(
            r#"
            movementSpeed = 4.5
            jumpKey = "j"
            "#,
        )
        .unwrap();
        assert_eq!(config.movement_speed, 4.5);
        assert_eq!(config.jump_key, "j");
        assert_eq!(config.height, 2.0);
        assert_eq!(config.forward_key, "w");
    }
}
