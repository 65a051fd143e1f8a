//! The two seams of the plugin
//!
//! - [`CompilerHooks`] - the host build system, seen from the plugin
//! - [`FontGenerator`] - the font-generation service, seen from the plugin
//!
//! Neither side knows about the other; the plugin wires them together.

use crate::{
    cancel::CancellationToken,
    context::Compilation,
    error::Result,
    types::{GenerationRequest, GenerationResult},
};

/// A registered lifecycle callback
///
/// The returned `Result` is the completion signal: the host must not move
/// on to the next lifecycle phase before the handler returns, and an `Err`
/// fails the build step.
pub type HookHandler = Box<dyn Fn(&mut Compilation) -> Result<()> + Send + Sync>;

/// Lifecycle events a host build system exposes to plugins
///
/// ```ignore
/// struct MyHost { run: Vec<HookHandler>, /* ... */ }
///
/// impl CompilerHooks for MyHost {
///     fn on_run(&mut self, handler: HookHandler) {
///         self.run.push(handler);
///     }
///     // ...
/// }
/// ```
pub trait CompilerHooks {
    /// A one-shot build is starting
    fn on_run(&mut self, handler: HookHandler);

    /// A watch-mode rebuild is starting
    fn on_watch_run(&mut self, handler: HookHandler);

    /// Bundle assets have been emitted
    fn on_after_emit(&mut self, handler: HookHandler);
}

/// Where icons become fonts
///
/// Implementations receive the sorted input list together with the glyph
/// code points already assigned, and must return one binary per requested
/// format. Rendering the stylesheet is optional; the plugin falls back to
/// its own when [`GenerationResult::stylesheet`] is `None`.
pub trait FontGenerator: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    /// Produce the fonts for `request`
    ///
    /// Long-running implementations should poll `cancel` and bail out with
    /// [`WebfontError::Cancelled`](crate::WebfontError::Cancelled).
    fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult>;
}
