//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["midi.toml", ".midi.toml"];

/// Prefix for nested environment overrides (`MIDI_GEMINI__MODEL`)
const ENV_PREFIX: &str = "MIDI_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./midi.toml` or `./.midi.toml`
    /// 4. Global: `~/.config/midi/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Explicit config path (highest priority for files)
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file_exact(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Defaults plus environment, skipping every file (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["API_KEY"]).map(|_| "gemini.api_key".into()))
            .merge(Env::raw().only(&["MAPS_API_KEY"]).map(|_| "maps.api_key".into()))
    }

    /// Get the global config file path
    ///
    /// Returns `<config dir>/midi/config.toml`, e.g. `~/.config/midi/config.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("midi").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] API_KEY, MAPS_API_KEY, {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./midi.toml or ./.midi.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("midi"));
    }

    // Tests that read the environment run inside a Jail so they never see
    // variables set by another test.

    #[test]
    fn test_load_explicit_file() {
        Jail::expect_with(|_jail| {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(
                file,
                r#"
[gemini]
model = "gemini-2.5-pro"

[search]
suggestion_count = 7
"#
            )
            .unwrap();

            let config = ConfigLoader::load(Some(file.path())).map_err(|e| *e)?;

            assert_eq!(config.gemini.model, "gemini-2.5-pro");
            assert_eq!(config.search.suggestion_count, 7);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("midi.toml", "[search]\nsuggestion_count = 2\n")?;
            let explicit = tempfile::tempdir().unwrap();
            let path = explicit.path().join("custom.toml");
            std::fs::write(&path, "[search]\nsuggestion_count = 4\n").unwrap();

            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;

            assert_eq!(config.search.suggestion_count, 4);
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        Jail::expect_with(|_jail| {
            let dir = tempfile::tempdir().unwrap();
            let missing = dir.path().join("nope.toml");

            assert!(ConfigLoader::load(Some(&missing)).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "midi.toml",
                r#"
[gemini]
api_key = "from-file"
model = "from-file-model"
"#,
            )?;
            jail.set_env("API_KEY", "from-env");
            jail.set_env("MIDI_GEMINI__MODEL", "from-env-model");
            jail.set_env("MIDI_SEARCH__SUGGESTION_COUNT", "3");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;

            assert_eq!(config.gemini.api_key(), Some("from-env"));
            assert_eq!(config.gemini.model, "from-env-model");
            assert_eq!(config.search.suggestion_count, 3);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_found() {
        Jail::expect_with(|jail| {
            jail.create_file(".midi.toml", "[output]\ncolor = false\n")?;

            assert!(ConfigLoader::project_config_path().is_some());
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(!config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_load_defaults_skips_files_but_reads_env() {
        Jail::expect_with(|jail| {
            jail.create_file("midi.toml", "[search]\nsuggestion_count = 9\n")?;
            jail.set_env("MAPS_API_KEY", "maps-from-env");

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;

            assert_eq!(config.search.suggestion_count, 5);
            assert_eq!(config.maps_api_key(), Some("maps-from-env"));
            Ok(())
        });
    }
}
