// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

pub(crate) const CONFIG_NAME: &str = "musicpanel";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub locale: Locale,
    pub volume: u32,
    /// Restart a track when it reaches the end instead of stopping.
    pub loop_playback: bool,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            locale: Locale::default(),
            volume: 60,
            loop_playback: false,
            log_dir: None,
        }
    }
}

/// Loads the configuration, falling back to defaults if the file is missing
/// or cannot be parsed.
///
/// The error is returned alongside so it can be logged once logging is up.
pub fn load_config() -> (AppConfig, Option<confy::ConfyError>) {
    match confy::load(CONFIG_NAME, None) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

/// Directory for log files, next to the configuration file unless configured.
pub fn log_dir(cfg: &AppConfig) -> PathBuf {
    if let Some(dir) = &cfg.log_dir {
        return dir.clone();
    }

    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(|p| p.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
