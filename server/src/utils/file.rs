//! File path helpers

use std::path::{Path, PathBuf};

/// Resolve a user-supplied path (e.g. `--config`) to an absolute path.
///
/// `~` and `~/...` expand to the home directory; relative paths resolve
/// against the current directory. Surrounding whitespace is ignored.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = match path {
        "" => PathBuf::from("."),
        "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        },
    };

    absolutize(&expanded)
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(
            expand_path("/etc/citrus-console.json"),
            PathBuf::from("/etc/citrus-console.json")
        );
    }

    #[test]
    fn test_expand_path_relative_is_joined_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            expand_path("citrus-console.json"),
            cwd.join("citrus-console.json")
        );
        assert_eq!(expand_path("./conf/a.json"), cwd.join("./conf/a.json"));
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(
                expand_path("~/.citrus-console/citrus-console.json"),
                home.join(".citrus-console/citrus-console.json")
            );
        }
    }

    #[test]
    fn test_expand_path_trims_and_handles_empty() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("  a.json  "), cwd.join("a.json"));
        assert_eq!(expand_path("   "), cwd.join("."));
        assert!(expand_path("").is_absolute());
    }
}
