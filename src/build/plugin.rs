//! Fallback bundler plugin for hosts without the post-compile hook

use crate::build::host::{BundlerPlugin, Compiler};
use crate::build::run_once::RunOnce;

/// Name the plugin registers its `done` tap under
pub const PLUGIN_NAME: &str = "AutoglotPlugin";

/// Taps the compiler's `done` hook with the guarded translation step
#[derive(Debug, Clone)]
pub struct AutoglotBundlerPlugin {
    run: RunOnce,
}

impl AutoglotBundlerPlugin {
    pub fn new(run: RunOnce) -> Self {
        Self { run }
    }
}

impl BundlerPlugin for AutoglotBundlerPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn apply(&self, compiler: &mut Compiler) {
        compiler.hooks.done.tap_promise(PLUGIN_NAME, self.run.hook());
    }
}
