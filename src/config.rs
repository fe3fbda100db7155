//! Parses config file

use std::{
    env,
    fs::OpenOptions,
    io::Read,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;

use crate::{
    err,
    modules::{
        apply_frame_map::DEFAULT_PLACEHOLDER,
        batch_crop::{DEFAULT_EXTENSION, DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH, OnError},
    },
    utils::misc::{normalize_extension, relative_to_less_relative},
};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub frame_map: FrameMapConfig,
    pub batch_crop: BatchCropConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FrameMapConfig {
    pub placeholder: String,
}

impl Default for FrameMapConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchCropConfig {
    /// Relative to the config file. `None` keeps the built-in default.
    pub input_folder: Option<PathBuf>,
    pub output_folder: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub extension: String,
    pub on_error: OnError,
}

impl Default for BatchCropConfig {
    fn default() -> Self {
        Self {
            input_folder: None,
            output_folder: None,
            width: DEFAULT_TARGET_WIDTH,
            height: DEFAULT_TARGET_HEIGHT,
            extension: DEFAULT_EXTENSION.to_string(),
            on_error: OnError::default(),
        }
    }
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parse `config.toml` in the same folder as the binary
///
/// A missing file is not an error, every value has a default.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => match path.parent() {
            Some(parent) => parent.join(CONFIG_FILE_NAME),
            None => PathBuf::from(CONFIG_FILE_NAME),
        },
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        debug!("No {} at {}. Using defaults", CONFIG_FILE_NAME, path.display());
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    let mut config: Config = toml::from_str(&buffer)?;

    if config.frame_map.placeholder.is_empty() {
        return err!("frame_map.placeholder in {} cannot be empty", path.display());
    }

    let root = path.parent().unwrap_or(Path::new("."));

    let BatchCropConfig {
        input_folder,
        output_folder,
        extension,
        ..
    } = &mut config.batch_crop;

    *input_folder = input_folder
        .as_ref()
        .map(|folder| relative_to_less_relative(root, folder));
    *output_folder = output_folder
        .as_ref()
        .map(|folder| relative_to_less_relative(root, folder));
    *extension = normalize_extension(extension).to_string();

    debug!("Loaded config from {}", path.display());

    Ok(config)
}
