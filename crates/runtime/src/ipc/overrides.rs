//! Lease overrides laid over the user's policy.

use combat_content::PolicyConfig;

use crate::lease::PresetOverrides;

/// The policy as the decision path should see it.
#[derive(Clone, Copy, Debug)]
pub struct PolicyView<'a> {
    base: &'a PolicyConfig,
    overrides: &'a PresetOverrides,
}

impl<'a> PolicyView<'a> {
    pub fn new(base: &'a PolicyConfig, overrides: &'a PresetOverrides) -> Self {
        Self { base, overrides }
    }

    pub fn is_overridden(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// The user's policy with every override applied. Thresholds are untouched.
    pub fn effective(&self) -> PolicyConfig {
        let mut policy = self.base.clone();
        for (&preset, &on) in &self.overrides.enabled {
            if on {
                policy.enabled.insert(preset);
            } else {
                policy.enabled.remove(&preset);
            }
        }
        for (&preset, &on) in &self.overrides.auto_mode {
            if on {
                policy.auto_mode.insert(preset);
            } else {
                policy.auto_mode.remove(&preset);
            }
        }
        policy
    }
}
