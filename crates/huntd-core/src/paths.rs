//! Standard paths used by huntd

use std::path::PathBuf;

/// Standard huntd paths
pub struct Paths {
    /// Config directory (~/.config/huntd)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("huntd");

        Self { config }
    }

    /// Location of the JSON config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_config_dir() {
        let paths = Paths::new();
        let file = paths.config_file();
        assert!(file.starts_with(&paths.config));
        assert_eq!(file.file_name().unwrap(), "config.json");
    }
}
