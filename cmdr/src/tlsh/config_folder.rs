// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Where `tlsh` looks for its config file when `--config` is not given:
//! `<config dir>/tlsh/config.json`, eg: `~/.config/tlsh/config.json` on Linux.

use std::{fmt::{Display, Formatter, Result},
          path::PathBuf};

use dirs::config_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPaths {
    TlshFolderName,
    ConfigFile,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::TlshFolderName => "tlsh",
            ConfigPaths::ConfigFile => "config.json",
        };
        write!(f, "{path}")
    }
}

/// This is where the config folder is.
#[must_use]
pub fn try_get_config_folder_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(home_config_folder_path.join(ConfigPaths::TlshFolderName.to_string()))
}

/// This is where the config file is, if it exists.
#[must_use]
pub fn try_get_default_config_file_path() -> Option<PathBuf> {
    let config_file_path =
        try_get_config_folder_path()?.join(ConfigPaths::ConfigFile.to_string());
    config_file_path.exists().then_some(config_file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_paths_display() {
        assert_eq!(ConfigPaths::TlshFolderName.to_string(), "tlsh");
        assert_eq!(ConfigPaths::ConfigFile.to_string(), "config.json");
    }

    #[test]
    fn test_config_folder_ends_with_tlsh() {
        if let Some(path) = try_get_config_folder_path() {
            assert!(path.ends_with("tlsh"));
        }
    }
}
