//! JSON configuration file: plugin options plus the generator command

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use webfont::{CommandGenerator, WebfontPlugin};
use webfont_core::Options;

/// External program that turns icons into fonts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Everything in `webfont.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub options: Options,
    pub generator: GeneratorConfig,
}

impl CliConfig {
    /// Read `path`; relative `files` and `dest` entries resolve against
    /// the directory holding the file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: CliConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_relative_to(base);
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        if base.as_os_str().is_empty() {
            return;
        }
        if let Some(files) = &mut self.options.files {
            if Path::new(files.as_str()).is_relative() {
                *files = base.join(files.as_str()).display().to_string();
            }
        }
        if let Some(dest) = &mut self.options.dest {
            dest.fonts_dir = resolve(base, &dest.fonts_dir);
            dest.styles_dir = resolve(base, &dest.styles_dir);
        }
    }

    pub fn generator(&self) -> CommandGenerator {
        CommandGenerator::new(self.generator.command.clone(), self.generator.args.clone())
    }

    pub fn plugin(&self) -> Result<WebfontPlugin> {
        WebfontPlugin::new(self.options.clone(), Arc::new(self.generator()))
            .context("Invalid webfont configuration")
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webfont_core::StyleTemplate;

    #[test]
    fn test_load_resolves_relative_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("webfont.json");
        fs::write(
            &path,
            r#"{
                "files": "icons/*.svg",
                "dest": { "fontsDir": "dist/fonts", "stylesDir": "/abs/styles" },
                "template": "less",
                "generator": { "command": "fontgen", "args": ["{files}"] }
            }"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        let dest = config.options.dest.as_ref().unwrap();

        assert_eq!(
            config.options.files.as_deref(),
            Some(tmp.path().join("icons/*.svg").display().to_string().as_str())
        );
        assert_eq!(dest.fonts_dir, tmp.path().join("dist/fonts"));
        assert_eq!(dest.styles_dir, PathBuf::from("/abs/styles"));
        assert_eq!(config.options.template, StyleTemplate::Less);
        assert_eq!(config.generator().program(), "fontgen");
    }

    #[test]
    fn test_missing_generator_section_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("webfont.json");
        fs::write(&path, r#"{ "files": "*.svg" }"#).unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_plugin_rejects_missing_dest() {
        let config = CliConfig {
            options: Options {
                files: Some("*.svg".into()),
                ..Options::default()
            },
            generator: GeneratorConfig {
                command: "fontgen".into(),
                args: vec![],
            },
        };

        let err = config.plugin().unwrap_err();
        assert!(format!("{err:#}").contains("Require `dest` option"));
    }
}
