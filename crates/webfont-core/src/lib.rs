//! Webfont Core: the vocabulary shared by every webfont crate
//!
//! The plugin sits between a host build system and a font-generation
//! service. This crate holds what both sides agree on:
//!
//! - [`Options`] - what to read, where to write, how to name it
//! - [`CompilerHooks`] - how a host exposes its `run`, `watch-run` and
//!   `after-emit` lifecycle events
//! - [`FontGenerator`] - how a generation service turns icons into fonts
//! - [`Compilation`] and [`CancellationToken`] - what a host hands to each hook
//! - [`WebfontError`] - everything that can go wrong along the way
//!
//! ```rust
//! use webfont_core::{Dest, Options};
//!
//! let options = Options::new("icons/**/*.svg", Dest::new("css/fonts", "css"))
//!     .with_css_template_font_path("./fonts/");
//!
//! let valid = options.validate()?;
//! assert_eq!(valid.stylesheet_path(), std::path::Path::new("css/webfont.css"));
//! # Ok::<(), webfont_core::ConfigError>(())
//! ```

pub mod cancel;
pub mod config;
pub mod context;
pub mod error;
pub mod traits;

pub use cancel::CancellationToken;
pub use config::{Dest, Options, OverlapPolicy, ValidOptions, REQUIRED_FORMATS};
pub use context::Compilation;
pub use error::{ConfigError, GenerationError, Result, WebfontError};
pub use traits::{CompilerHooks, FontGenerator, HookHandler};
pub use types::{FontFormat, GenerationRequest, GenerationResult, Glyph, StyleTemplate};

/// The data structures passed between host, plugin and generator
pub mod types {
    use std::collections::BTreeMap;
    use std::fmt;
    use std::path::{Path, PathBuf};
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};

    use crate::config::Dest;
    use crate::error::ConfigError;

    /// A font binary format the generator can be asked for
    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(rename_all = "lowercase")]
    pub enum FontFormat {
        Eot,
        Woff2,
        Woff,
        Ttf,
        Svg,
    }

    impl FontFormat {
        /// Every format, in the order browsers should try them
        pub const ALL: [FontFormat; 5] = [
            FontFormat::Eot,
            FontFormat::Woff2,
            FontFormat::Woff,
            FontFormat::Ttf,
            FontFormat::Svg,
        ];

        /// File extension, also the config spelling
        pub fn extension(self) -> &'static str {
            match self {
                FontFormat::Eot => "eot",
                FontFormat::Woff2 => "woff2",
                FontFormat::Woff => "woff",
                FontFormat::Ttf => "ttf",
                FontFormat::Svg => "svg",
            }
        }

        /// Value of the CSS `format()` hint
        pub fn css_format(self) -> &'static str {
            match self {
                FontFormat::Eot => "embedded-opentype",
                FontFormat::Woff2 => "woff2",
                FontFormat::Woff => "woff",
                FontFormat::Ttf => "truetype",
                FontFormat::Svg => "svg",
            }
        }
    }

    impl fmt::Display for FontFormat {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.extension())
        }
    }

    impl FromStr for FontFormat {
        type Err = ConfigError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            FontFormat::ALL
                .into_iter()
                .find(|format| format.extension().eq_ignore_ascii_case(s))
                .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
        }
    }

    /// Stylesheet flavour
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum StyleTemplate {
        #[default]
        Css,
        Scss,
        Less,
    }

    impl StyleTemplate {
        pub fn extension(self) -> &'static str {
            match self {
                StyleTemplate::Css => "css",
                StyleTemplate::Scss => "scss",
                StyleTemplate::Less => "less",
            }
        }
    }

    impl fmt::Display for StyleTemplate {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.extension())
        }
    }

    impl FromStr for StyleTemplate {
        type Err = ConfigError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "css" => Ok(StyleTemplate::Css),
                "scss" => Ok(StyleTemplate::Scss),
                "less" => Ok(StyleTemplate::Less),
                _ => Err(ConfigError::UnknownTemplate(s.to_string())),
            }
        }
    }

    /// One icon, one code point
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Glyph {
        /// Icon name, taken from the file stem
        pub name: String,
        pub codepoint: char,
        /// The SVG this glyph was drawn from
        pub source: PathBuf,
    }

    impl Glyph {
        /// Hand out consecutive code points to `files`, in the order given
        ///
        /// Values that are not valid scalar values (surrogates) are skipped.
        pub fn assign(files: &[PathBuf], start: u32) -> Vec<Glyph> {
            let mut next = start;
            let mut glyphs = Vec::with_capacity(files.len());

            for source in files {
                let codepoint = loop {
                    if next > u32::from(char::MAX) {
                        break char::REPLACEMENT_CHARACTER;
                    }
                    let candidate = char::from_u32(next);
                    next += 1;
                    if let Some(ch) = candidate {
                        break ch;
                    }
                };

                glyphs.push(Glyph {
                    name: glyph_name(source),
                    codepoint,
                    source: source.clone(),
                });
            }

            glyphs
        }

        /// `\ea01` style escape for use inside CSS strings
        pub fn css_escape(&self) -> String {
            format!("\\{:x}", u32::from(self.codepoint))
        }
    }

    fn glyph_name(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Everything the generation service needs to know
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GenerationRequest {
        /// Input icons, sorted
        pub files: Vec<PathBuf>,
        /// Code point assignment for `files`
        pub glyphs: Vec<Glyph>,
        pub font_name: String,
        pub formats: Vec<FontFormat>,
        pub template: StyleTemplate,
        pub css_template_font_path: String,
        /// Final destination of the artifacts
        pub dest: Dest,
        /// Code point of the first glyph
        pub start_unicode: u32,
    }

    /// What comes back from the generation service
    #[derive(Debug, Clone, Default)]
    pub struct GenerationResult {
        fonts: BTreeMap<FontFormat, Vec<u8>>,
        /// Rendered stylesheet, when the service renders its own
        pub stylesheet: Option<String>,
        /// Glyph metadata; an empty list means "as requested"
        pub glyphs: Vec<Glyph>,
    }

    impl GenerationResult {
        pub fn new() -> Self {
            Self::default()
        }

        /// Attach the binary for one format, replacing any earlier one
        pub fn with_font(mut self, format: FontFormat, data: Vec<u8>) -> Self {
            self.fonts.insert(format, data);
            self
        }

        pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
            self.stylesheet = Some(stylesheet.into());
            self
        }

        pub fn with_glyphs(mut self, glyphs: Vec<Glyph>) -> Self {
            self.glyphs = glyphs;
            self
        }

        pub fn insert_font(&mut self, format: FontFormat, data: Vec<u8>) {
            self.fonts.insert(format, data);
        }

        pub fn font(&self, format: FontFormat) -> Option<&[u8]> {
            self.fonts.get(&format).map(Vec::as_slice)
        }

        pub fn fonts(&self) -> impl Iterator<Item = (FontFormat, &[u8])> {
            self.fonts.iter().map(|(format, data)| (*format, data.as_slice()))
        }
    }
}
