//! ID prefixes and formatting.
//!
//! Every persisted entity gets a `{prefix}-{8 hex}` identifier, e.g. `dsh-a3f8b2c1`.

pub const PREFIX_SNAPSHOT: &str = "dsh";
pub const PREFIX_TIMELINE: &str = "tle";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_SNAPSHOT, PREFIX_TIMELINE];

/// Format four random bytes as a prefixed ID.
#[must_use]
pub fn format_id(prefix: &str, bytes: [u8; 4]) -> String {
    format!(
        "{prefix}-{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Check that `id` has the `{prefix}-{8 hex}` shape.
#[must_use]
pub fn has_prefix_shape(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
