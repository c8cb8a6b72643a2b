use std::path::PathBuf;

const LOCAL_CONFIG_FILE: &str = ".bugtrack.toml";

/// Load config file content from CWD first, then the config directory
///
/// Searches for:
/// 1. `.bugtrack.toml` in the current working directory
/// 2. `config.toml` in the bugtrack config directory
///
/// Returns the path and content of the first file found.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE))
        .chain(crate::paths::app_config_path().ok());

    for path in candidates {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some((path, content));
        }
    }

    None
}
