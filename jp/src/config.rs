// SPDX-License-Identifier: Apache-2.0

/// Default limit on nested objects/arrays.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Hard ceiling on `max_depth`. The parser recurses once per level, so larger
/// values would trade a clean error for a stack overflow.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Runtime knobs for [`crate::Parser`].
///
/// The defaults ignore tokens that follow a complete top-level value and
/// reject trailing commas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed nesting of objects and arrays, capped at
    /// [`MAX_DEPTH_LIMIT`]
    pub max_depth: usize,
    /// Fail instead of ignoring tokens after the top-level value
    pub reject_trailing_tokens: bool,
    /// Accept a `,` right before `}` or `]`
    pub allow_trailing_commas: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing_tokens: false,
            allow_trailing_commas: false,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    /// The depth the parser enforces, even if `max_depth` was set directly.
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }

    pub fn reject_trailing_tokens(mut self, reject: bool) -> Self {
        self.reject_trailing_tokens = reject;
        self
    }

    pub fn allow_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let config = ParserConfig::new();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.reject_trailing_tokens);
        assert!(!config.allow_trailing_commas);
    }

    #[test]
    fn test_setters_chain() {
        let config = ParserConfig::new()
            .max_depth(3)
            .reject_trailing_tokens(true)
            .allow_trailing_commas(true);
        assert_eq!(
            config,
            ParserConfig {
                max_depth: 3,
                reject_trailing_tokens: true,
                allow_trailing_commas: true,
            }
        );
    }

    #[test]
    fn test_max_depth_is_capped() {
        let config = ParserConfig::new().max_depth(1_000_000);
        assert_eq!(config.max_depth, MAX_DEPTH_LIMIT);

        let direct = ParserConfig {
            max_depth: usize::MAX,
            ..ParserConfig::default()
        };
        assert_eq!(direct.depth_limit(), MAX_DEPTH_LIMIT);
        assert_eq!(ParserConfig::new().depth_limit(), DEFAULT_MAX_DEPTH);
    }
}
