//! XDG-style path utilities for configuration and cache directories.
//!
//! Locations follow the XDG Base Directory conventions on every platform
//! instead of OS-specific application folders.

use std::path::PathBuf;

const APP_DIR: &str = "pivot-relay";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/pivot-relay` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/pivot-relay` otherwise
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Returns the default configuration file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the cache directory.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/pivot-relay` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/pivot-relay` otherwise
pub fn cache_dir() -> PathBuf {
    std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| home_dir().join(".cache").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Returns the user's home directory, or the working directory when unknown
/// (e.g. a service account without `$HOME`).
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(key: &str, value: Option<&str>, f: F) {
        let original = std::env::var(key).ok();
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }

        f();

        // Restore
        match original {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        with_env("XDG_CONFIG_HOME", None, || {
            assert!(config_dir().ends_with(".config/pivot-relay"));
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        with_env("XDG_CONFIG_HOME", Some("/custom/config"), || {
            assert_eq!(config_dir(), PathBuf::from("/custom/config/pivot-relay"));
            assert_eq!(
                config_file(),
                PathBuf::from("/custom/config/pivot-relay/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn test_cache_dir_default() {
        with_env("XDG_CACHE_HOME", None, || {
            assert!(cache_dir().ends_with(".cache/pivot-relay"));
        });
    }

    #[test]
    #[serial]
    fn test_cache_dir_xdg_override() {
        with_env("XDG_CACHE_HOME", Some("/custom/cache"), || {
            assert_eq!(cache_dir(), PathBuf::from("/custom/cache/pivot-relay"));
        });
    }
}
