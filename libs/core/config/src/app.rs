//! Application identity used by health endpoints and startup logs.

/// Static application metadata (name and version from the calling crate).
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl AppInfo {
    pub const fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }
}

/// Capture the calling crate's name and version from Cargo metadata.
///
/// # Example
/// ```ignore
/// use core_config::app_info;
///
/// let info = app_info!();
/// assert!(!info.name.is_empty());
/// ```
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_app_info_macro_captures_package_metadata() {
        let info = crate::app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
