//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_output_color_deserialize() {
        let toml_str = r#"
[output]
color = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.output.color);
    }
}
