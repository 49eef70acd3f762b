//! Path utilities for hkipo.
//!
//! Configuration lives under `~/.hkipo/`:
//! - `~/.hkipo/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the hkipo home directory (`~/.hkipo/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hkipo")
}

/// Returns the default config file path (`~/.hkipo/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_hkipo_home() {
        let config = default_config();

        assert!(home_dir().to_string_lossy().contains(".hkipo"));
        assert!(config.starts_with(home_dir()));
        assert_eq!(config.file_name().and_then(|n| n.to_str()), Some("config.toml"));
    }
}
