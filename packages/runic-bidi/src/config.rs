//! Resolver configuration

use crate::types::Direction;

/// Configuration for resolvers handed out by [`crate::ResolverPool`]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BidiConfig {
    /// Paragraph direction used when a caller does not pass one
    pub default_direction: Direction,
    /// Code points to pre-reserve in freshly created resolvers
    pub initial_capacity: usize,
}

impl Default for BidiConfig {
    fn default() -> Self {
        Self {
            default_direction: Direction::Auto,
            initial_capacity: 256,
        }
    }
}
