// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Builder pattern for configuring a [`MipGenerator`].

use crate::image::sample::EdgePolicy;
use crate::mip::MipGenerator;

/// Name used when a generator is not given one.
pub const DEFAULT_DEBUG_NAME: &str = "mip_chain";

/// Builder for [`MipGenerator`].
///
/// Every setting is optional:
///
/// | Setting        | Default              |
/// |----------------|----------------------|
/// | `edge_policy`  | [`EdgePolicy::Clamp`] |
/// | `debug_name`   | `"mip_chain"`        |
#[derive(Debug, Clone, Default)]
pub struct MipGeneratorBuilder {
    edge_policy: Option<EdgePolicy>,
    debug_name: Option<String>,
}

impl MipGeneratorBuilder {
    /// Create a new builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how neighbor lookups behave at the last row and column.
    pub fn edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = Some(edge_policy);
        self
    }

    /// Set the name attached to the generator's log lines.
    pub fn debug_name(mut self, debug_name: impl Into<String>) -> Self {
        self.debug_name = Some(debug_name.into());
        self
    }

    /// Get the edge policy if set.
    pub fn edge_policy_setting(&self) -> Option<EdgePolicy> {
        self.edge_policy
    }

    /// Get the debug name if set.
    pub fn debug_name_setting(&self) -> Option<&str> {
        self.debug_name.as_deref()
    }

    /// Finish configuring.
    pub fn build(self) -> MipGenerator {
        MipGenerator::from_parts(
            self.edge_policy.unwrap_or_default(),
            self.debug_name
                .unwrap_or_else(|| DEFAULT_DEBUG_NAME.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let generator = MipGeneratorBuilder::new().build();
        assert_eq!(generator.edge_policy(), EdgePolicy::Clamp);
        assert_eq!(generator.debug_name(), DEFAULT_DEBUG_NAME);
        assert_eq!(generator, MipGenerator::default());
    }

    #[test]
    fn settings_are_kept() {
        let builder = MipGeneratorBuilder::new()
            .edge_policy(EdgePolicy::RowSpill)
            .debug_name("terrain");
        assert_eq!(builder.edge_policy_setting(), Some(EdgePolicy::RowSpill));
        assert_eq!(builder.debug_name_setting(), Some("terrain"));
        let generator = builder.build();
        assert_eq!(generator.edge_policy(), EdgePolicy::RowSpill);
        assert_eq!(generator.debug_name(), "terrain");
    }
}
