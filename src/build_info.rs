//! Build information module
//!
//! Package metadata baked in at compile time.

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Human-readable service name
pub const SERVICE_TITLE: &str = "Calorie Service";

/// Compilation profile of the running binary
pub const PROFILE: &str = if cfg!(debug_assertions) { "debug" } else { "release" };

/// Start-up banner text
pub fn startup_banner() -> String {
    let rule = "=".repeat(47);
    format!(
        "{rule}\n  {SERVICE_TITLE}\n  {NAME} v{VERSION} ({PROFILE})\n{rule}"
    )
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("{}", startup_banner());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_names_package_and_version() {
        let banner = startup_banner();
        assert!(banner.contains(SERVICE_TITLE));
        assert!(banner.contains(&format!("calorie_service v{}", VERSION)));
        assert_eq!(banner.lines().count(), 4);
    }
}
