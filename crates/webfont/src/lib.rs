//! Webfont: keep an icon font in step with its SVG sources
//!
//! Plug [`WebfontPlugin`] into any host that implements
//! [`CompilerHooks`](webfont_core::CompilerHooks). On every `run` and
//! `watch-run` the plugin globs the icons, compares their timestamps with
//! the existing outputs, and only when something is newer asks its
//! [`FontGenerator`](webfont_core::FontGenerator) for fresh fonts. On
//! `after-emit` it tells the host which icons to watch.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webfont::{CommandGenerator, HookRegistry, WebfontPlugin};
//! use webfont_core::{Compilation, Dest, Options};
//!
//! let options = Options::new("icons/**/*.svg", Dest::new("css/fonts", "css"))
//!     .with_css_template_font_path("./fonts/");
//! let generator = CommandGenerator::new(
//!     "fontgen",
//!     vec!["--out".into(), "{output}".into(), "{files}".into()],
//! );
//!
//! let plugin = WebfontPlugin::new(options, Arc::new(generator))?;
//! let mut host = HookRegistry::new();
//! plugin.apply(&mut host);
//!
//! host.build(&mut Compilation::new())?;
//! # Ok::<(), webfont_core::WebfontError>(())
//! ```

pub mod command;
pub mod discovery;
pub mod host;
pub mod plugin;
pub mod watch;

pub use command::CommandGenerator;
pub use discovery::{discover, StaleReason, Staleness};
pub use host::HookRegistry;
pub use plugin::{Outcome, WebfontPlugin};
pub use watch::InputWatcher;

pub use webfont_core::{Compilation, Options, Result, WebfontError};
pub use webfont_export::WrittenArtifacts;
