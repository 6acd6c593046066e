use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

/// Overrides the base directory returned by [`ConfigManager::default_location`].
pub const HOME_ENV: &str = "SPENDGRID_HOME";
const APP_DIR: &str = "spendgrid";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Loads and saves [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `<base>/config/config.json`. Nothing is created until `save`.
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// `$SPENDGRID_HOME`, else the platform config dir plus `spendgrid`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let base = match env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(ConfigError::NoConfigDir)?,
        };
        Ok(Self::with_base_dir(base))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config, or returns the defaults when the file does not exist.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Writes to a sibling temp file, then renames it over the config.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/x/config.json"));
        assert_eq!(tmp, PathBuf::from("/x/config.json.tmp"));
    }
}
