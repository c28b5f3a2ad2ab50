/// Build Integration Module
///
/// Hooks the translation step into a host build so that it runs exactly once
/// per build, whichever hook mechanism the host fires.
///
/// # Overview
///
/// 1. **Host model** - typed shape of the host configuration and its hooks
/// 2. **Run-once guard** - idempotency latch shared by every hook path
/// 3. **Bundler plugin** - fallback that taps the legacy bundler's `done` hook
/// 4. **Adapter** - installs the guarded step into a host configuration
///
/// # Example
///
/// ```ignore
/// use autoglot_build::{AutoglotOptions, with_autoglot};
/// use autoglot_build::build::{HostConfig, ProductionBuild};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let autoglot = with_autoglot(AutoglotOptions::new("src/locales/en.json", &["es", "fr"]));
///     let config = autoglot.apply(HostConfig::default());
///
///     // Fires both hook paths; translation still runs once
///     ProductionBuild::current("build-1").run(&config).await?;
///     Ok(())
/// }
/// ```
pub mod adapter;
pub mod host;
pub mod plugin;
pub mod run_once;

#[cfg(test)]
mod integration_tests;

pub use adapter::{WithAutoglot, with_autoglot};
pub use host::{
    AsyncHook, AsyncSeriesHook, BuildContext, BuildReport, BundlerConfig, BundlerConfigHook,
    BundlerPlugin, Compiler, CompilerHooks, CompilerOptions, HookFuture, HostConfig, Pipeline,
    ProductionBuild,
};
pub use plugin::{AutoglotBundlerPlugin, PLUGIN_NAME};
pub use run_once::RunOnce;
