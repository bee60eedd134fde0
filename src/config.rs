use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::animation::{Interpolator, Transition, DEFAULT_DURATION};
use crate::error::Result;
use crate::layout::{ExpandDirection, Gravity};

/// Construction-time settings of an [`ExpandableLayout`](crate::widgets::ExpandableLayout).
///
/// Field names follow the declarative attribute names, so a TOML table like
///
/// ```toml
/// expanded = true
/// expandDirection = "horizontal"
/// duration = 500
/// interpolator = "overshoot"
/// gravity = "center_vertical|right"
/// ```
///
/// maps onto it directly. Missing keys keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpandableConfig {
    pub expanded: bool,
    pub expand_direction: ExpandDirection,
    /// Duration of a full expand or collapse, in milliseconds.
    pub duration: u64,
    pub interpolator: Interpolator,
    #[serde(alias = "contentGravity", deserialize_with = "gravity_from_str")]
    pub gravity: Gravity,
}

impl Default for ExpandableConfig {
    fn default() -> Self {
        Self {
            expanded: false,
            expand_direction: ExpandDirection::Vertical,
            duration: DEFAULT_DURATION.as_millis() as u64,
            interpolator: Interpolator::default(),
            gravity: Gravity::default(),
        }
    }
}

impl ExpandableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config = toml::from_str(source)?;
        log::debug!("loaded config {:?}", config);
        Ok(config)
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn expand_direction(mut self, direction: ExpandDirection) -> Self {
        self.expand_direction = direction;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration.as_millis() as u64;
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn transition(&self) -> Transition {
        Transition::new(
            Duration::from_millis(self.duration),
            self.interpolator.clone(),
        )
    }
}

fn gravity_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Gravity, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}
