//! Package version, sourced from the crate manifest.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn get_version() -> &'static str {
    VERSION
}

/// Version as `(major, minor, patch, suffix)`; the suffix is the pre-release
/// tag (`"dev.1"`, `"rc.1"`, ...) or empty on release builds.
pub fn get_version_tuple() -> (u32, u32, u32, &'static str) {
    (
        parse_component(env!("CARGO_PKG_VERSION_MAJOR")),
        parse_component(env!("CARGO_PKG_VERSION_MINOR")),
        parse_component(env!("CARGO_PKG_VERSION_PATCH")),
        env!("CARGO_PKG_VERSION_PRE"),
    )
}

fn parse_component(raw: &str) -> u32 {
    raw.parse().unwrap_or(0)
}
