//! Generator configuration.

use zendgen_emitter::EmitOptions;

pub use zendgen_registry::ValidationMode;

/// Options for one [`Generator`](crate::Generator) run.
///
/// # Example
///
/// ```
/// use zendgen::{GeneratorConfig, ValidationMode};
///
/// let config = GeneratorConfig::new()
///     .validation_mode(ValidationMode::ClosedWorld)
///     .share_arginfo(false);
/// assert!(!config.emit_options().share_arginfo);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// How references to classes the extension does not declare are treated.
    pub validation_mode: ValidationMode,
    /// Alias identical argument-info blocks instead of repeating them.
    pub share_arginfo: bool,
    /// Emit twice and fail if the outputs differ.
    pub verify_determinism: bool,
    /// Start the output with the generated-file banner.
    pub header_comment: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::Lenient,
            share_arginfo: true,
            verify_determinism: false,
            header_comment: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn share_arginfo(mut self, share: bool) -> Self {
        self.share_arginfo = share;
        self
    }

    pub fn verify_determinism(mut self, verify: bool) -> Self {
        self.verify_determinism = verify;
        self
    }

    pub fn header_comment(mut self, enabled: bool) -> Self {
        self.header_comment = enabled;
        self
    }

    /// The subset of options the emitter needs.
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            share_arginfo: self.share_arginfo,
            header_comment: self.header_comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.validation_mode, ValidationMode::Lenient);
        assert!(config.share_arginfo);
        assert!(!config.verify_determinism);
        assert!(config.header_comment);
        assert_eq!(config.emit_options(), EmitOptions::default());
    }

    #[test]
    fn setters_chain() {
        let config = GeneratorConfig::new()
            .verify_determinism(true)
            .header_comment(false);
        assert!(config.verify_determinism);
        assert!(!config.emit_options().header_comment);
    }
}
