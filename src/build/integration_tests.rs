//! End-to-End Tests for the build integration
//!
//! These tests drive simulated production builds through the adapter with a
//! mock translation service and real files in a temporary directory.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::config::AutoglotOptions;
    use crate::translate::{MockMode, MockService, Orchestrator, TranslationFile};
    use serde_json::json;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        source: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let locales = dir.path().join("locales");
            std::fs::create_dir_all(&locales).unwrap();
            let source = locales.join("en.json");
            std::fs::write(&source, r#"{"greeting": "Hello", "farewell": "Goodbye"}"#).unwrap();
            Self { dir, source }
        }

        fn locales(&self) -> PathBuf {
            self.dir.path().join("locales")
        }

        fn options(&self, targets: &[&str]) -> AutoglotOptions {
            AutoglotOptions::new(&self.source, targets).with_api_key("test-key")
        }
    }

    fn adapter(options: AutoglotOptions, mock: &MockService) -> WithAutoglot {
        WithAutoglot::new(
            Orchestrator::new(options, Arc::new(mock.clone())).with_env_lookup(|_| None),
        )
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    // ============================================================================
    // Both hook paths fire: the step still runs once
    // ============================================================================

    #[tokio::test]
    async fn test_current_host_translates_once() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Suffix);
        let autoglot = adapter(fixture.options(&["es", "fr"]), &mock);
        let config = autoglot.apply(HostConfig::default());

        let report = ProductionBuild::current("build-1").run(&config).await.unwrap();

        assert_eq!(report.targets_compiled, 2);
        assert_eq!(report.done_taps_fired, 1);
        assert!(report.post_compile_hook_fired);
        assert_eq!(mock.calls(), 1);
        assert_eq!(
            read(&fixture.locales().join("es.json")),
            "{\n  \"farewell\": \"Goodbye_es\",\n  \"greeting\": \"Hello_es\"\n}"
        );
        assert!(fixture.locales().join("fr.json").is_file());
    }

    #[tokio::test]
    async fn test_legacy_host_translates_through_plugin() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Suffix);
        let config = adapter(fixture.options(&["de"]), &mock).apply(HostConfig::default());

        let report = ProductionBuild::legacy("build-1").run(&config).await.unwrap();

        assert!(!report.post_compile_hook_fired);
        assert_eq!(report.done_taps_fired, 1);
        assert_eq!(mock.calls(), 1);
        assert!(fixture.locales().join("de.json").is_file());
    }

    #[tokio::test]
    async fn test_standalone_host_translates_through_post_compile_hook() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Suffix);
        let config = adapter(fixture.options(&["ja"]), &mock).apply(HostConfig::default());

        let report = ProductionBuild::standalone("build-1").run(&config).await.unwrap();

        assert_eq!(report.targets_compiled, 0);
        assert!(report.post_compile_hook_fired);
        assert_eq!(mock.calls(), 1);
        assert!(fixture.locales().join("ja.json").is_file());
    }

    #[tokio::test]
    async fn test_concurrent_hooks_translate_once() {
        let fixture = Fixture::new();
        let mock = MockService::with_delay(MockMode::Suffix, 30);
        let config = adapter(fixture.options(&["es"]), &mock).apply(HostConfig::default());

        let mut compiler = Compiler::default();
        for plugin in &config.bundler_config(&BuildContext::client("b1")).plugins {
            plugin.apply(&mut compiler);
        }
        let post_compile = config.post_compile_hook().unwrap();

        let (done, post) = tokio::join!(compiler.hooks.done.promise(), post_compile());

        assert!(done.is_ok() && post.is_ok());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_each_build_instance_runs_once() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Suffix);

        for build_id in ["build-1", "build-2"] {
            let config = adapter(fixture.options(&["es"]), &mock).apply(HostConfig::default());
            ProductionBuild::current(build_id).run(&config).await.unwrap();
        }

        assert_eq!(mock.calls(), 2);
    }

    // ============================================================================
    // Failures: contained, except output writes
    // ============================================================================

    #[tokio::test]
    async fn test_missing_api_key_build_still_succeeds() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Suffix);
        let options = AutoglotOptions::new(&fixture.source, &["es"]);
        let autoglot = adapter(options, &mock);
        let config = autoglot.apply(HostConfig::default());

        let result = ProductionBuild::current("build-1").run(&config).await;

        assert!(result.is_ok());
        assert!(autoglot.run_once().has_run());
        assert_eq!(mock.calls(), 0);
        assert!(!fixture.locales().join("es.json").exists());
    }

    #[tokio::test]
    async fn test_service_failure_build_still_succeeds() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Error("service unavailable".to_string()));
        let config = adapter(fixture.options(&["es"]), &mock).apply(HostConfig::default());

        let result = ProductionBuild::current("build-1").run(&config).await;

        assert!(result.is_ok());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_fails_the_build() {
        let fixture = Fixture::new();
        std::fs::write(fixture.locales().join("blocked"), "").unwrap();
        let mock = MockService::new(MockMode::Files(vec![TranslationFile::new(
            "blocked/es.json",
            json!({"greeting": "Hola"}),
        )]));
        let config = adapter(fixture.options(&["es"]), &mock).apply(HostConfig::default());

        let result = ProductionBuild::current("build-1").run(&config).await;

        assert!(result.is_err());
        assert_eq!(mock.calls(), 1);
    }

    // ============================================================================
    // User customization survives the adapter
    // ============================================================================

    #[tokio::test]
    async fn test_user_hooks_still_run() {
        let fixture = Fixture::new();
        let mock = MockService::new(MockMode::Suffix);
        let user_calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let hook_calls = user_calls.clone();
        let user_post_compile: AsyncHook = Arc::new(move || -> HookFuture {
            let calls = hook_calls.clone();
            Box::pin(async move {
                calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Ok(())
            })
        });
        let user_bundler: BundlerConfigHook = Arc::new(|mut cfg: BundlerConfig, _: &BuildContext| {
            cfg.settings.insert("devtool".to_string(), json!("source-map"));
            cfg
        });

        let config = adapter(fixture.options(&["es"]), &mock).apply(HostConfig {
            compiler: Some(CompilerOptions {
                run_after_production_compile: Some(user_post_compile),
                ..Default::default()
            }),
            bundler: Some(user_bundler),
            ..Default::default()
        });

        let client = config.bundler_config(&BuildContext::client("b1"));
        assert_eq!(client.settings.get("devtool"), Some(&json!("source-map")));

        ProductionBuild::current("build-1").run(&config).await.unwrap();

        assert_eq!(user_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(mock.calls(), 1);
    }
}
