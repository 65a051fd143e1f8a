//! Plugin options: what to read, where to write, how to name it
//!
//! [`Options`] is a plain value. The plugin validates it once and keeps a
//! frozen copy, so one value can be reused for many plugins without two of
//! them ever sharing mutable state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    types::{FontFormat, StyleTemplate},
};

/// First code point handed out to glyphs (start of a private use block)
pub const DEFAULT_START_UNICODE: u32 = 0xEA01;

/// Base name of every generated artifact unless `fontName` says otherwise
pub const DEFAULT_FONT_NAME: &str = "webfont";

/// Formats every generation has to produce
pub const REQUIRED_FORMATS: [FontFormat; 4] = [
    FontFormat::Eot,
    FontFormat::Svg,
    FontFormat::Woff,
    FontFormat::Woff2,
];

/// Where generated files land
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dest {
    /// Directory receiving `<fontName>.<ext>` font binaries
    pub fonts_dir: PathBuf,
    /// Directory receiving `<fontName>.<template>`
    pub styles_dir: PathBuf,
}

impl Dest {
    pub fn new(fonts_dir: impl Into<PathBuf>, styles_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            styles_dir: styles_dir.into(),
        }
    }
}

/// What to do when a trigger arrives while a regeneration is still running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Wait for the running cycle, then re-check staleness
    #[default]
    Serialize,
    /// Return immediately without doing anything
    Skip,
}

/// Plugin configuration
///
/// `files` and `dest` are optional at the type level so that a partially
/// filled config (from JSON, say) reaches [`Options::validate`] and fails
/// there with a proper [`ConfigError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Glob locating the input SVG icons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Output directories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Dest>,

    /// Prefix of font URLs written into the stylesheet
    #[serde(default = "default_font_path")]
    pub css_template_font_path: String,

    /// Stylesheet flavour, also its file extension
    #[serde(default)]
    pub template: StyleTemplate,

    /// Base name of the generated files and the CSS font family
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Font formats to request from the generator
    #[serde(default = "default_formats")]
    pub formats: Vec<FontFormat>,

    /// First code point assigned to glyphs
    #[serde(default = "default_start_unicode")]
    pub start_unicode: u32,

    #[serde(default)]
    pub overlap: OverlapPolicy,
}

fn default_font_path() -> String {
    "./".to_string()
}

fn default_font_name() -> String {
    DEFAULT_FONT_NAME.to_string()
}

fn default_formats() -> Vec<FontFormat> {
    REQUIRED_FORMATS.to_vec()
}

fn default_start_unicode() -> u32 {
    DEFAULT_START_UNICODE
}

impl Default for Options {
    fn default() -> Self {
        Self {
            files: None,
            dest: None,
            css_template_font_path: default_font_path(),
            template: StyleTemplate::default(),
            font_name: default_font_name(),
            formats: default_formats(),
            start_unicode: default_start_unicode(),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl Options {
    /// Options with the two required fields filled in
    pub fn new(files: impl Into<String>, dest: Dest) -> Self {
        Self {
            files: Some(files.into()),
            dest: Some(dest),
            ..Self::default()
        }
    }

    pub fn with_css_template_font_path(mut self, path: impl Into<String>) -> Self {
        self.css_template_font_path = path.into();
        self
    }

    pub fn with_template(mut self, template: StyleTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    pub fn with_formats(mut self, formats: Vec<FontFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Check everything that can be checked without touching the disk
    ///
    /// Returns the validated view with the required fields unwrapped.
    pub fn validate(&self) -> Result<ValidOptions<'_>, ConfigError> {
        let files = self.files.as_deref().ok_or(ConfigError::MissingFiles)?;
        let dest = self.dest.as_ref().ok_or(ConfigError::MissingDest)?;

        if files.trim().is_empty() {
            return Err(ConfigError::MissingFiles);
        }

        if self.font_name.is_empty() || self.font_name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidFontName(self.font_name.clone()));
        }

        for required in REQUIRED_FORMATS {
            if !self.formats.contains(&required) {
                return Err(ConfigError::MissingFormat(required.to_string()));
            }
        }

        if char::from_u32(self.start_unicode).is_none() {
            return Err(ConfigError::InvalidStartUnicode(self.start_unicode));
        }

        Ok(ValidOptions {
            files,
            dest,
            options: self,
        })
    }
}

/// Borrowed view of options that passed [`Options::validate`]
#[derive(Debug, Clone, Copy)]
pub struct ValidOptions<'a> {
    files: &'a str,
    dest: &'a Dest,
    options: &'a Options,
}

impl<'a> ValidOptions<'a> {
    pub fn files(&self) -> &'a str {
        self.files
    }

    pub fn dest(&self) -> &'a Dest {
        self.dest
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Requested formats without duplicates, in configuration order
    pub fn formats(&self) -> Vec<FontFormat> {
        let mut formats = Vec::with_capacity(self.options.formats.len());
        for format in &self.options.formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        formats
    }

    /// `<fontsDir>/<fontName>.<ext>`
    pub fn font_path(&self, format: FontFormat) -> PathBuf {
        self.dest.fonts_dir.join(format!(
            "{}.{}",
            self.options.font_name,
            format.extension()
        ))
    }

    /// `<stylesDir>/<fontName>.<template>`
    pub fn stylesheet_path(&self) -> PathBuf {
        self.dest.styles_dir.join(format!(
            "{}.{}",
            self.options.font_name,
            self.options.template.extension()
        ))
    }

    /// `<fontsDir>/<fontName>.inputs.json`, the icons behind the current outputs
    pub fn manifest_path(&self) -> PathBuf {
        self.dest
            .fonts_dir
            .join(format!("{}.inputs.json", self.options.font_name))
    }

    /// Every path a complete cycle writes, stylesheet last
    pub fn output_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .formats()
            .into_iter()
            .map(|format| self.font_path(format))
            .collect();
        paths.push(self.stylesheet_path());
        paths
    }
}
