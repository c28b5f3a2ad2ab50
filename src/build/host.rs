//! Typed model of the host build system
//!
//! The host exposes two ways to run code after compilation:
//!
//! 1. `compiler.run_after_production_compile`, a single async callback fired
//!    once the production build has compiled. Bundler-agnostic.
//! 2. The legacy bundler pipeline: the host calls the `bundler` config hook
//!    once per build target, applies every plugin in the returned config to a
//!    fresh [`Compiler`], and fires the compiler's `done` hook.
//!
//! Hosts that predate the first mechanism simply never read the field.
//! [`ProductionBuild`] drives both mechanisms the way a host does, so the
//! adapter can be exercised without a real bundler.

use crate::error::Result;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

/// Future returned by an async hook
pub type HookFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// Zero-argument async callback registered with the host
pub type AsyncHook = Arc<dyn Fn() -> HookFuture + Send + Sync>;

/// User or plugin customization of the bundler config for one build target
pub type BundlerConfigHook =
    Arc<dyn Fn(BundlerConfig, &BuildContext) -> BundlerConfig + Send + Sync>;

/// Describes the build target a bundler pass is compiling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub build_id: String,
    pub is_server: bool,
    pub dev: bool,
}

impl BuildContext {
    pub fn client(build_id: &str) -> Self {
        Self {
            build_id: build_id.to_string(),
            is_server: false,
            dev: false,
        }
    }

    pub fn server(build_id: &str) -> Self {
        Self {
            build_id: build_id.to_string(),
            is_server: true,
            dev: false,
        }
    }
}

/// A plugin in the legacy bundler pipeline
pub trait BundlerPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Register the plugin's taps on a compiler
    fn apply(&self, compiler: &mut Compiler);
}

/// Async hook whose taps run one after another, stopping at the first error
#[derive(Default)]
pub struct AsyncSeriesHook {
    taps: Vec<(String, AsyncHook)>,
}

impl AsyncSeriesHook {
    pub fn tap_promise(&mut self, name: &str, hook: AsyncHook) {
        self.taps.push((name.to_string(), hook));
    }

    pub fn tap_names(&self) -> Vec<&str> {
        self.taps.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Fire every tap in registration order
    pub async fn promise(&self) -> Result<()> {
        for (name, hook) in &self.taps {
            debug!(target: "autoglot", tap = %name, "firing bundler hook tap");
            hook().await?;
        }
        Ok(())
    }
}

impl fmt::Debug for AsyncSeriesHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSeriesHook")
            .field("taps", &self.tap_names())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CompilerHooks {
    /// Fired once the compilation of a target has finished
    pub done: AsyncSeriesHook,
}

/// The bundler's compiler for one build target
#[derive(Debug, Default)]
pub struct Compiler {
    pub hooks: CompilerHooks,
}

/// Bundler configuration for one build target
#[derive(Default)]
pub struct BundlerConfig {
    pub plugins: Vec<Box<dyn BundlerPlugin>>,
    /// Everything else in the bundler config, passed through untouched
    pub settings: Map<String, Value>,
}

impl BundlerConfig {
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

impl fmt::Debug for BundlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundlerConfig")
            .field("plugins", &self.plugin_names())
            .field("settings", &self.settings)
            .finish()
    }
}

/// The `compiler` section of the host configuration
#[derive(Clone, Default)]
pub struct CompilerOptions {
    pub run_after_production_compile: Option<AsyncHook>,
    pub settings: Map<String, Value>,
}

impl fmt::Debug for CompilerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerOptions")
            .field(
                "run_after_production_compile",
                &self.run_after_production_compile.is_some(),
            )
            .field("settings", &self.settings)
            .finish()
    }
}

/// Host build configuration
#[derive(Clone, Default)]
pub struct HostConfig {
    pub compiler: Option<CompilerOptions>,
    pub bundler: Option<BundlerConfigHook>,
    /// Every other top-level field, passed through untouched
    pub settings: Map<String, Value>,
}

impl HostConfig {
    pub fn post_compile_hook(&self) -> Option<AsyncHook> {
        self.compiler
            .as_ref()
            .and_then(|c| c.run_after_production_compile.clone())
    }

    /// Run the bundler config hook for one target, starting from an empty config
    pub fn bundler_config(&self, ctx: &BuildContext) -> BundlerConfig {
        match &self.bundler {
            Some(hook) => hook(BundlerConfig::default(), ctx),
            None => BundlerConfig::default(),
        }
    }
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("compiler", &self.compiler)
            .field("bundler", &self.bundler.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Which compilation pipeline a host build uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Plugin-based bundler: the `bundler` hook is called for every target
    Legacy,
    /// Bundler without plugin support: the `bundler` hook is never called
    Standalone,
}

/// What a [`ProductionBuild`] run did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Targets compiled through the legacy pipeline
    pub targets_compiled: usize,
    /// `done` taps fired across all targets
    pub done_taps_fired: usize,
    pub post_compile_hook_fired: bool,
}

/// One production build as the host would run it
#[derive(Debug, Clone)]
pub struct ProductionBuild {
    pub pipeline: Pipeline,
    /// Whether this host knows about `run_after_production_compile`
    pub supports_post_compile_hook: bool,
    pub targets: Vec<BuildContext>,
}

impl ProductionBuild {
    /// A current host on the legacy pipeline: both mechanisms fire
    pub fn current(build_id: &str) -> Self {
        Self {
            pipeline: Pipeline::Legacy,
            supports_post_compile_hook: true,
            targets: vec![BuildContext::server(build_id), BuildContext::client(build_id)],
        }
    }

    /// An older host without the post-compile hook
    pub fn legacy(build_id: &str) -> Self {
        Self {
            supports_post_compile_hook: false,
            ..Self::current(build_id)
        }
    }

    /// A host whose bundler has no plugin pipeline
    pub fn standalone(build_id: &str) -> Self {
        Self {
            pipeline: Pipeline::Standalone,
            ..Self::current(build_id)
        }
    }

    /// Compile every target, then fire the post-compile hook if supported
    ///
    /// Stops at the first hook error, which fails the build.
    pub async fn run(&self, config: &HostConfig) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        if self.pipeline == Pipeline::Legacy {
            for ctx in &self.targets {
                let bundler_config = config.bundler_config(ctx);
                let mut compiler = Compiler::default();
                for plugin in &bundler_config.plugins {
                    plugin.apply(&mut compiler);
                }

                debug!(
                    target: "autoglot",
                    build_id = %ctx.build_id,
                    is_server = ctx.is_server,
                    plugins = ?bundler_config.plugin_names(),
                    "compiled target"
                );
                report.targets_compiled += 1;
                report.done_taps_fired += compiler.hooks.done.tap_names().len();
                compiler.hooks.done.promise().await?;
            }
        }

        if self.supports_post_compile_hook {
            if let Some(hook) = config.post_compile_hook() {
                report.post_compile_hook_fired = true;
                hook().await?;
            }
        }

        Ok(report)
    }
}
