//! A minimal in-process host for driving plugins without a bundler

use webfont_core::{
    error::Result,
    traits::{CompilerHooks, HookHandler},
    Compilation,
};

/// Stores hook handlers and fires them in registration order
///
/// Each event runs its handlers one after another and stops at the first
/// error, the same way an async-series hook in a bundler would.
#[derive(Default)]
pub struct HookRegistry {
    run: Vec<HookHandler>,
    watch_run: Vec<HookHandler>,
    after_emit: Vec<HookHandler>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `run`
    pub fn run(&self, compilation: &mut Compilation) -> Result<()> {
        fire("run", &self.run, compilation)
    }

    /// Fire `watch-run`
    pub fn watch_run(&self, compilation: &mut Compilation) -> Result<()> {
        fire("watch-run", &self.watch_run, compilation)
    }

    /// Fire `after-emit`
    pub fn after_emit(&self, compilation: &mut Compilation) -> Result<()> {
        fire("after-emit", &self.after_emit, compilation)
    }

    /// One-shot build: `run`, then `after-emit`
    pub fn build(&self, compilation: &mut Compilation) -> Result<()> {
        self.run(compilation)?;
        self.after_emit(compilation)
    }

    /// Watch-mode rebuild: `watch-run`, then `after-emit`
    pub fn rebuild(&self, compilation: &mut Compilation) -> Result<()> {
        self.watch_run(compilation)?;
        self.after_emit(compilation)
    }

    /// Handlers registered for (`run`, `watch-run`, `after-emit`)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.run.len(), self.watch_run.len(), self.after_emit.len())
    }
}

impl CompilerHooks for HookRegistry {
    fn on_run(&mut self, handler: HookHandler) {
        self.run.push(handler);
    }

    fn on_watch_run(&mut self, handler: HookHandler) {
        self.watch_run.push(handler);
    }

    fn on_after_emit(&mut self, handler: HookHandler) {
        self.after_emit.push(handler);
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (run, watch_run, after_emit) = self.counts();
        f.debug_struct("HookRegistry")
            .field("run", &run)
            .field("watch_run", &watch_run)
            .field("after_emit", &after_emit)
            .finish()
    }
}

fn fire(event: &str, handlers: &[HookHandler], compilation: &mut Compilation) -> Result<()> {
    log::debug!("{event}: {} handlers", handlers.len());
    for handler in handlers {
        handler(compilation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use webfont_core::WebfontError;

    fn counter(calls: &Arc<AtomicUsize>) -> HookHandler {
        let calls = Arc::clone(calls);
        Box::new(move |_: &mut Compilation| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_build_fires_run_then_after_emit() {
        let run = Arc::new(AtomicUsize::new(0));
        let watch = Arc::new(AtomicUsize::new(0));
        let emit = Arc::new(AtomicUsize::new(0));

        let mut host = HookRegistry::new();
        host.on_run(counter(&run));
        host.on_watch_run(counter(&watch));
        host.on_after_emit(counter(&emit));

        host.build(&mut Compilation::new()).unwrap();
        host.rebuild(&mut Compilation::new()).unwrap();

        assert_eq!(run.load(Ordering::SeqCst), 1);
        assert_eq!(watch.load(Ordering::SeqCst), 1);
        assert_eq!(emit.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failure_stops_the_series() {
        let later = Arc::new(AtomicUsize::new(0));
        let emit = Arc::new(AtomicUsize::new(0));

        let mut host = HookRegistry::new();
        host.on_run(Box::new(|_: &mut Compilation| Err(WebfontError::Cancelled)));
        host.on_run(counter(&later));
        host.on_after_emit(counter(&emit));

        assert!(host.build(&mut Compilation::new()).is_err());
        assert_eq!(later.load(Ordering::SeqCst), 0);
        assert_eq!(emit.load(Ordering::SeqCst), 0);
    }
}
