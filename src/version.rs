// Build-time name and version from Cargo.toml

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// "name version", used for the root banner and the startup log line.
pub fn banner() -> String {
    format!("{} {}", NAME, VERSION)
}
