//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `--version`.
pub fn version_string() -> String {
    format!(
        "gestureflap {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7-char short hash or the fallback
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_contains_metadata() {
        let version = version_string();
        assert!(version.starts_with("gestureflap "));
        assert!(version.contains(BUILD_DATE));
        assert!(version.contains(BUILD_COMMIT));
    }
}
