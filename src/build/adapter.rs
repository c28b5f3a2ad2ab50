//! Host configuration adapter
//!
//! [`with_autoglot`] is called once when the build configuration is put
//! together. The returned [`WithAutoglot`] owns the run-once flag for that
//! build and augments the host config with both integration points:
//!
//! - `compiler.run_after_production_compile` for hosts that have it
//! - an [`AutoglotBundlerPlugin`] on client targets of the legacy bundler
//!
//! Both call the same guarded operation, so the step runs once per build.

use crate::build::host::{
    AsyncHook, BuildContext, BundlerConfig, BundlerConfigHook, HookFuture, HostConfig,
};
use crate::build::plugin::AutoglotBundlerPlugin;
use crate::build::run_once::RunOnce;
use crate::config::AutoglotOptions;
use crate::translate::{AutoglotClient, Orchestrator};
use std::sync::Arc;
use tracing::error;

/// Augments a host configuration with the guarded translation step
#[derive(Debug, Clone)]
pub struct WithAutoglot {
    run: RunOnce,
}

impl WithAutoglot {
    /// Guard `orchestrator` for one build
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self::from_run_once(RunOnce::new(move || {
            let orchestrator = orchestrator.clone();
            async move { orchestrator.run().await.into_hook_result() }
        }))
    }

    pub fn from_run_once(run: RunOnce) -> Self {
        Self { run }
    }

    pub fn run_once(&self) -> &RunOnce {
        &self.run
    }

    /// Return `config` with both integration points installed
    ///
    /// User-supplied post-compile and bundler hooks are kept and chained;
    /// every other field passes through unchanged.
    pub fn apply(&self, config: HostConfig) -> HostConfig {
        let HostConfig {
            compiler,
            bundler: user_bundler,
            settings,
        } = config;

        let mut compiler = compiler.unwrap_or_default();
        let guarded = self.run.hook();
        compiler.run_after_production_compile = Some(match compiler.run_after_production_compile.take() {
            Some(user_hook) => chain_hooks(user_hook, guarded),
            None => guarded,
        });

        let plugin = AutoglotBundlerPlugin::new(self.run.clone());
        let bundler: BundlerConfigHook =
            Arc::new(move |mut bundler_config: BundlerConfig, ctx: &BuildContext| {
                // Server and client passes both run in the legacy pipeline; the
                // plugin only rides along with the client one.
                if !ctx.is_server {
                    bundler_config.plugins.push(Box::new(plugin.clone()));
                }
                match &user_bundler {
                    Some(user_hook) => user_hook(bundler_config, ctx),
                    None => bundler_config,
                }
            });

        HostConfig {
            compiler: Some(compiler),
            bundler: Some(bundler),
            settings,
        }
    }
}

/// Run `first`, then `second` if `first` succeeded
fn chain_hooks(first: AsyncHook, second: AsyncHook) -> AsyncHook {
    Arc::new(move || -> HookFuture {
        let (first, second) = (first.clone(), second.clone());
        Box::pin(async move {
            first().await?;
            second().await
        })
    })
}

/// Set up the translation step for one build, backed by the Autoglot API
///
/// Never fails: if the HTTP client cannot be created the error is logged when
/// the hook fires and the build carries on without translations.
pub fn with_autoglot(options: AutoglotOptions) -> WithAutoglot {
    match AutoglotClient::new() {
        Ok(client) => WithAutoglot::new(Orchestrator::new(options, Arc::new(client))),
        Err(err) => {
            let message = err.to_string();
            WithAutoglot::from_run_once(RunOnce::new(move || {
                let message = message.clone();
                async move {
                    error!(target: "autoglot", "[autoglot] Translation failed: {}", message);
                    Ok(())
                }
            }))
        }
    }
}
