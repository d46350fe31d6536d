//! Configuration types deserialized from `fixgen.toml`.

use serde::Deserialize;

/// The top-level generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Defaults for fixed-point signal factories.
    #[serde(default)]
    pub fixed: FixedDefaults,
}

/// The `[fixed]` section: defaults applied when a factory call leaves a
/// parameter unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FixedDefaults {
    /// Default signal width in bits.
    pub width: u32,
    /// Default binary point (number of fractional bits).
    pub point: u32,
    /// Whether signals are signed by default.
    pub signed: bool,
}

impl Default for FixedDefaults {
    fn default() -> Self {
        Self {
            width: 32,
            point: 0,
            signed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_factory_defaults() {
        let d = FixedDefaults::default();
        assert_eq!(d.width, 32);
        assert_eq!(d.point, 0);
        assert!(d.signed);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: GeneratorConfig = toml::from_str("[fixed]\npoint = 8\n").unwrap();
        assert_eq!(cfg.fixed.point, 8);
        assert_eq!(cfg.fixed.width, 32);
        assert!(cfg.fixed.signed);
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: GeneratorConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, GeneratorConfig::default());
    }
}
