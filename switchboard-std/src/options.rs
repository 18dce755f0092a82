//! Pipeline configuration.
//!
//! [`PipelineOptions`] switches whole pipeline stages on or off for a
//! [`Sender`](crate::Sender). Disabled stages resolve as empty, so a sender
//! with every stage disabled always takes the direct handler path.

use bitflags::bitflags;

bitflags! {
    /// The optional stages of a request pipeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PipelineStages: u8 {
        /// Pipeline behaviors.
        const BEHAVIORS = 1 << 0;
        /// Pre-hooks.
        const PRE_HOOKS = 1 << 1;
        /// Full (pre + post) hooks.
        const HOOKS = 1 << 2;
        /// Post-hooks.
        const POST_HOOKS = 1 << 3;
        /// Every kind of request hook.
        const REQUEST_HOOKS = Self::PRE_HOOKS.bits() | Self::HOOKS.bits() | Self::POST_HOOKS.bits();
    }
}

impl Default for PipelineStages {
    fn default() -> Self {
        Self::all()
    }
}

/// Options for a [`Sender`](crate::Sender).
///
/// # Example
///
/// ```rust,ignore
/// let options = PipelineOptions::default().without_request_hooks();
/// let sender = Sender::with_options(registry, options);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    stages: PipelineStages,
}

impl PipelineOptions {
    /// Options with exactly the given stages enabled.
    pub const fn with_stages(stages: PipelineStages) -> Self {
        Self { stages }
    }

    /// Disable pre-hooks, full hooks and post-hooks.
    pub fn without_request_hooks(mut self) -> Self {
        self.stages.remove(PipelineStages::REQUEST_HOOKS);
        self
    }

    /// Disable pipeline behaviors.
    pub fn without_behaviors(mut self) -> Self {
        self.stages.remove(PipelineStages::BEHAVIORS);
        self
    }

    /// The enabled stages.
    pub const fn stages(&self) -> PipelineStages {
        self.stages
    }

    /// Whether `stage` is enabled.
    pub fn enabled(&self, stage: PipelineStages) -> bool {
        self.stages.contains(stage)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{PipelineOptions, PipelineStages};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct Raw {
        behaviors: bool,
        request_hooks: bool,
    }

    impl Default for Raw {
        fn default() -> Self {
            Self {
                behaviors: true,
                request_hooks: true,
            }
        }
    }

    impl<'de> Deserialize<'de> for PipelineOptions {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = Raw::deserialize(deserializer)?;
            let mut stages = PipelineStages::empty();
            stages.set(PipelineStages::BEHAVIORS, raw.behaviors);
            stages.set(PipelineStages::REQUEST_HOOKS, raw.request_hooks);
            Ok(PipelineOptions::with_stages(stages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_is_enabled_by_default() {
        let options = PipelineOptions::default();
        assert!(options.enabled(PipelineStages::BEHAVIORS));
        assert!(options.enabled(PipelineStages::REQUEST_HOOKS));
    }

    #[test]
    fn stages_can_be_switched_off() {
        let options = PipelineOptions::default().without_request_hooks();
        assert!(options.enabled(PipelineStages::BEHAVIORS));
        assert!(!options.enabled(PipelineStages::PRE_HOOKS));
        assert!(!options.enabled(PipelineStages::POST_HOOKS));

        let options = options.without_behaviors();
        assert!(options.stages().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_flags() {
        let options: PipelineOptions =
            serde_json::from_str(r#"{ "request_hooks": false }"#).unwrap();
        assert_eq!(options, PipelineOptions::default().without_request_hooks());
    }
}
