//! Commit and date stamped in by the build script.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!("{} {} ({})", env!("CARGO_PKG_NAME"), BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamps_present() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line() {
        let line = version_line();
        assert!(line.starts_with("webcam-invaders "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.ends_with(')'));
    }
}
