// this_file: crates/webfont/src/plugin.rs

//! The lifecycle adapter: hooks in, fonts out

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use webfont_core::{
    cancel::CancellationToken,
    config::{Options, OverlapPolicy, ValidOptions},
    error::{GenerationError, Result},
    traits::{CompilerHooks, FontGenerator},
    types::{GenerationRequest, Glyph},
    Compilation,
};
use webfont_export::{
    render_stylesheet, ArtifactWriter, InputManifest, StyleContext, WrittenArtifacts,
};

use crate::discovery::{self, Staleness};

/// What a regeneration cycle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Outputs were newer than every input; nothing was touched
    UpToDate,
    /// Another cycle was running and the overlap policy is `skip`
    Busy,
    /// Fonts and stylesheet were regenerated
    Generated(WrittenArtifacts),
}

/// Regenerates a webfont whenever the host starts a build
///
/// ```ignore
/// let plugin = WebfontPlugin::new(options, Arc::new(MyGenerator))?;
///
/// let mut host = HookRegistry::new();
/// plugin.apply(&mut host);
///
/// host.build(&mut Compilation::new())?;
/// ```
pub struct WebfontPlugin {
    state: Arc<PluginState>,
}

struct PluginState {
    options: Options,
    generator: Arc<dyn FontGenerator>,
    // One cycle at a time
    cycle: Mutex<()>,
    // Icons behind the current outputs, handed to the host after emit
    sources: Mutex<Vec<PathBuf>>,
    last_outcome: Mutex<Option<Outcome>>,
}

impl WebfontPlugin {
    /// Validate `options` and keep a private copy of them
    pub fn new(options: Options, generator: Arc<dyn FontGenerator>) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            state: Arc::new(PluginState {
                options,
                generator,
                cycle: Mutex::new(()),
                sources: Mutex::new(Vec::new()),
                last_outcome: Mutex::new(None),
            }),
        })
    }

    /// The options this plugin was built with
    pub fn options(&self) -> &Options {
        &self.state.options
    }

    /// Name of the generation backend
    pub fn generator_name(&self) -> &'static str {
        self.state.generator.name()
    }

    /// Register on `run`, `watch-run` and `after-emit`
    pub fn apply<H: CompilerHooks + ?Sized>(&self, compiler: &mut H) {
        let state = Arc::clone(&self.state);
        compiler.on_run(Box::new(move |compilation: &mut Compilation| {
            state
                .regenerate(compilation.cancellation())
                .map(|outcome| log_outcome("run", &outcome))
        }));

        let state = Arc::clone(&self.state);
        compiler.on_watch_run(Box::new(move |compilation: &mut Compilation| {
            state
                .regenerate(compilation.cancellation())
                .map(|outcome| log_outcome("watch-run", &outcome))
        }));

        let state = Arc::clone(&self.state);
        compiler.on_after_emit(Box::new(move |compilation: &mut Compilation| {
            state.record_dependencies(compilation);
            Ok(())
        }));
    }

    /// Run one regeneration cycle outside of any host
    pub fn regenerate(&self, cancel: &CancellationToken) -> Result<Outcome> {
        self.state.regenerate(cancel)
    }

    /// Icons the current outputs were generated from
    pub fn file_dependencies(&self) -> Vec<PathBuf> {
        self.state.sources.lock().clone()
    }

    /// How the most recent successful cycle ended, if one ran
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.state.last_outcome.lock().clone()
    }
}

impl std::fmt::Debug for WebfontPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebfontPlugin")
            .field("options", &self.state.options)
            .field("generator", &self.state.generator.name())
            .finish()
    }
}

impl PluginState {
    fn regenerate(&self, cancel: &CancellationToken) -> Result<Outcome> {
        let outcome = self.cycle(cancel)?;
        *self.last_outcome.lock() = Some(outcome.clone());
        Ok(outcome)
    }

    fn cycle(&self, cancel: &CancellationToken) -> Result<Outcome> {
        let _cycle = match self.options.overlap {
            OverlapPolicy::Serialize => self.cycle.lock(),
            OverlapPolicy::Skip => match self.cycle.try_lock() {
                Some(guard) => guard,
                None => {
                    log::info!("regeneration already in flight, skipping trigger");
                    return Ok(Outcome::Busy);
                },
            },
        };

        let options = self.options.validate()?;

        // Checking
        let inputs = discovery::discover(options.files())?;
        let staleness = Staleness::evaluate(&options, &inputs)?;
        log::debug!("{} inputs, {:?}", inputs.len(), staleness);

        if !staleness.is_stale() {
            *self.sources.lock() = inputs;
            return Ok(Outcome::UpToDate);
        }

        // Generating
        cancel.check()?;
        let request = build_request(&options, inputs);
        log::info!(
            "generating {} from {} icons with {}",
            request.font_name,
            request.files.len(),
            self.generator.name()
        );
        let mut result = self.generator.generate(&request, cancel)?;

        for &format in &request.formats {
            if result.font(format).is_none() {
                return Err(GenerationError::MissingFormat {
                    generator: self.generator.name().to_string(),
                    format: format.to_string(),
                }
                .into());
            }
        }
        cancel.check()?;

        // Writing
        let glyphs = if result.glyphs.is_empty() {
            request.glyphs
        } else {
            std::mem::take(&mut result.glyphs)
        };
        let stylesheet = match result.stylesheet.take() {
            Some(stylesheet) => stylesheet,
            None => render_stylesheet(
                request.template,
                &StyleContext {
                    font_name: &request.font_name,
                    font_path: &request.css_template_font_path,
                    formats: &request.formats,
                    glyphs: &glyphs,
                },
            ),
        };

        let fonts = request
            .formats
            .iter()
            .filter_map(|&format| result.font(format).map(|data| (format, data)));
        let manifest = InputManifest::new(request.files.clone());
        let written = ArtifactWriter::new(&options).write_all(fonts, &stylesheet, &manifest)?;

        *self.sources.lock() = glyphs.into_iter().map(|glyph| glyph.source).collect();
        Ok(Outcome::Generated(written))
    }

    fn record_dependencies(&self, compilation: &mut Compilation) {
        let sources = self.sources.lock();
        for source in sources.iter() {
            compilation.add_file_dependency(source.clone());
        }
        log::debug!("after-emit: {} icon dependencies", sources.len());
    }
}

fn build_request(options: &ValidOptions<'_>, files: Vec<PathBuf>) -> GenerationRequest {
    let config = options.options();
    GenerationRequest {
        glyphs: Glyph::assign(&files, config.start_unicode),
        files,
        font_name: config.font_name.clone(),
        formats: options.formats(),
        template: config.template,
        css_template_font_path: config.css_template_font_path.clone(),
        dest: options.dest().clone(),
        start_unicode: config.start_unicode,
    }
}

fn log_outcome(event: &str, outcome: &Outcome) {
    match outcome {
        Outcome::UpToDate => log::debug!("{event}: webfont up to date"),
        Outcome::Busy => log::debug!("{event}: skipped, cycle in flight"),
        Outcome::Generated(written) => {
            log::info!("{event}: wrote {} webfont artifacts", written.len());
        },
    }
}
