//! Conversion options
//!
//! Options are plain data: the CLI fills them from flags, or they can be
//! deserialized from a TOML options file.

use serde::Deserialize;

/// Fixed squared threshold for normal deltas. A delta whose squared normal
/// displacement is at or below this value does not qualify on its own.
pub const NORMAL_DELTA_SQUARED_THRESHOLD: f32 = 0.01;

/// Default position-delta threshold (the engine's "points are near"
/// epsilon). Deltas at or below the threshold are dropped.
pub const DEFAULT_POSITION_DELTA_THRESHOLD: f32 = 0.015;

/// Default position scale: source meters to engine centimeters.
pub const DEFAULT_SCALE: f32 = 100.0;

/// Read-only options for one conversion run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Uniform scale applied to position deltas after axis conversion.
    pub scale: f32,
    /// Emit normal deltas alongside position deltas.
    pub include_normal_deltas: bool,
    /// Use raw variant names unchanged (no sanitizing, no dedup suffixes).
    pub use_original_names: bool,
    /// Negate the first two output axes for the alternate model revision.
    pub alternate_revision_flip: bool,
    /// Position deltas with magnitude at or below this value are dropped
    /// (strict greater-than semantics).
    pub position_delta_threshold: f32,
    /// Skip morph-target conversion entirely; the run is a no-op success.
    pub skip_morph_targets: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            include_normal_deltas: false,
            use_original_names: false,
            alternate_revision_flip: false,
            position_delta_threshold: DEFAULT_POSITION_DELTA_THRESHOLD,
            skip_morph_targets: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.scale, DEFAULT_SCALE);
        assert!(!options.include_normal_deltas);
        assert!(!options.use_original_names);
        assert!(!options.alternate_revision_flip);
        assert_eq!(
            options.position_delta_threshold,
            DEFAULT_POSITION_DELTA_THRESHOLD
        );
        assert!(!options.skip_morph_targets);
    }
}
