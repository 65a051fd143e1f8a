//! Export module for the webfont plugin
//!
//! Takes what a generator produced and puts it where the configuration says:
//! font binaries into `dest.fontsDir`, the stylesheet into `dest.stylesDir`.

use std::fs;
use std::path::{Path, PathBuf};

use webfont_core::{
    config::ValidOptions,
    error::{Result, WebfontError},
    types::{FontFormat, StyleTemplate},
};

pub mod manifest;
pub mod stylesheet;

pub use manifest::InputManifest;
pub use stylesheet::{font_url, render_stylesheet, StyleContext};

/// Files written by one regeneration cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub fonts: Vec<PathBuf>,
    pub stylesheet: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

impl WrittenArtifacts {
    /// Fonts plus stylesheet; the manifest is bookkeeping and not counted
    pub fn len(&self) -> usize {
        self.fonts.len() + usize::from(self.stylesheet.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Writes artifacts under the configured destination directories
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    fonts_dir: PathBuf,
    styles_dir: PathBuf,
    manifest_path: PathBuf,
    font_name: String,
    template: StyleTemplate,
}

impl ArtifactWriter {
    pub fn new(options: &ValidOptions<'_>) -> Self {
        let dest = options.dest();
        Self {
            fonts_dir: dest.fonts_dir.clone(),
            styles_dir: dest.styles_dir.clone(),
            manifest_path: options.manifest_path(),
            font_name: options.options().font_name.clone(),
            template: options.options().template,
        }
    }

    pub fn font_path(&self, format: FontFormat) -> PathBuf {
        self.fonts_dir
            .join(format!("{}.{}", self.font_name, format.extension()))
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.styles_dir
            .join(format!("{}.{}", self.font_name, self.template.extension()))
    }

    /// Write one font binary, creating `fontsDir` if needed
    pub fn write_font(&self, format: FontFormat, data: &[u8]) -> Result<PathBuf> {
        let path = self.font_path(format);
        write_file(&path, data)?;
        log::debug!("wrote {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Write the stylesheet, creating `stylesDir` if needed
    pub fn write_stylesheet(&self, stylesheet: &str) -> Result<PathBuf> {
        let path = self.stylesheet_path();
        write_file(&path, stylesheet.as_bytes())?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Record the inputs behind the artifacts just written
    pub fn write_manifest(&self, manifest: &InputManifest) -> Result<PathBuf> {
        let data = manifest.to_json(&self.manifest_path)?;
        write_file(&self.manifest_path, &data)?;
        log::trace!("recorded {} inputs", manifest.inputs.len());
        Ok(self.manifest_path.clone())
    }

    /// Write every font, then the stylesheet, then the manifest
    ///
    /// Stops at the first failure. Files written before it stay on disk.
    /// The stylesheet follows the fonts so its timestamp never predates
    /// them. The manifest goes last: an interrupted cycle leaves the old
    /// one behind and the next check sees the input set as changed.
    pub fn write_all<'a>(
        &self,
        fonts: impl IntoIterator<Item = (FontFormat, &'a [u8])>,
        stylesheet: &str,
        manifest: &InputManifest,
    ) -> Result<WrittenArtifacts> {
        let mut written = WrittenArtifacts::default();

        for (format, data) in fonts {
            written.fonts.push(self.write_font(format, data)?);
        }
        written.stylesheet = Some(self.write_stylesheet(stylesheet)?);
        written.manifest = Some(self.write_manifest(manifest)?);

        Ok(written)
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| WebfontError::write(parent, e))?;
        }
    }
    fs::write(path, data).map_err(|e| WebfontError::write(path, e))
}
