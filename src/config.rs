//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Fixed name of the persisted record table inside the data folder
pub const DATA_FILE_NAME: &str = "karaoke_data.csv";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5780;

/// Environment variable overriding the data folder
pub const ENV_DATA_FOLDER: &str = "OHAKO_DATA_FOLDER";

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. OHAKO_DATA_FOLDER environment variable
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent compiled default (fallback)
///
/// Missing config never aborts startup; the weakest source that resolves
/// wins through to the compiled default.
pub fn resolve_data_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ENV_DATA_FOLDER) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_data_folder()
}

/// Get the platform config file path, erring when it does not exist
fn locate_config_file() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("ohako").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("ohako"))
        .unwrap_or_else(|| PathBuf::from("./ohako_data"))
}

/// Create the data folder when absent; returns the record file path inside it
pub fn ensure_data_folder(folder: &Path) -> Result<PathBuf> {
    if !folder.exists() {
        std::fs::create_dir_all(folder)?;
    }
    Ok(folder.join(DATA_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_folder_non_empty() {
        let folder = default_data_folder();
        assert!(!folder.as_os_str().is_empty());
    }

    #[test]
    fn test_cli_arg_takes_priority() {
        let folder = resolve_data_folder(Some(Path::new("/tmp/ohako-cli-folder")));
        assert_eq!(folder, PathBuf::from("/tmp/ohako-cli-folder"));
    }

    #[test]
    fn test_ensure_data_folder_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested").join("data");

        let file = ensure_data_folder(&folder).unwrap();

        assert!(folder.is_dir());
        assert_eq!(file, folder.join(DATA_FILE_NAME));
    }
}
