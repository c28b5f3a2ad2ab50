use autoglot_build::build::{HostConfig, ProductionBuild};
use autoglot_build::translate::{MockMode, MockService};
use autoglot_build::{AutoglotClient, AutoglotOptions, Orchestrator, TranslationService, WithAutoglot};
use clap::{Arg, ArgAction, Command};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

fn cli() -> Command {
    Command::new("autoglot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate a source locale file once per build")
        .arg(
            Arg::new("source")
                .help("Source locale file, e.g. src/locales/en.json")
                .index(1)
                .required_unless_present("config"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .short('l')
                .help("Target languages, comma separated (e.g. es,fr,de)")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .required_unless_present("config"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON options file (camelCase keys); flags override its values"),
        )
        .arg(
            Arg::new("source-language")
                .long("source-language")
                .short('s')
                .help("Source language (default: detected from the file name)"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("API key (default: AUTOGLOT_API_KEY)"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("API base URL (default: AUTOGLOT_API_URL or production)"),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .short('p')
                .help("Project for glossary and style guide (owner/repo)"),
        )
        .arg(
            Arg::new("skip-cache")
                .long("skip-cache")
                .help("Skip the translation cache")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock service instead of the Autoglot API")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("simulate")
                .long("simulate")
                .help("Run inside a simulated production build")
                .value_parser(["current", "legacy", "standalone"]),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn options_from_matches(
    matches: &clap::ArgMatches,
) -> Result<AutoglotOptions, Box<dyn std::error::Error>> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => AutoglotOptions::from_file(Path::new(path))?,
        None => AutoglotOptions::new("", &[]),
    };

    if let Some(source) = matches.get_one::<String>("source") {
        options.source = source.into();
    }
    if let Some(lang) = matches.get_many::<String>("lang") {
        options.lang = lang.cloned().collect();
    }
    if let Some(language) = matches.get_one::<String>("source-language") {
        options = options.with_source_language(language);
    }
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        options = options.with_api_key(api_key);
    }
    if let Some(api_url) = matches.get_one::<String>("api-url") {
        options = options.with_api_url(api_url);
    }
    if let Some(project) = matches.get_one::<String>("project") {
        options = options.with_project(project);
    }
    if matches.get_flag("skip-cache") {
        options = options.with_skip_cache(true);
    }

    Ok(options)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let default_level = if matches.get_flag("verbose") {
        "autoglot=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.parse()?),
        )
        .with_target(false)
        .init();

    let options = options_from_matches(&matches)?;

    let service: Arc<dyn TranslationService> = if matches.get_flag("mock") {
        Arc::new(MockService::new(MockMode::Suffix))
    } else {
        Arc::new(AutoglotClient::new()?)
    };
    let orchestrator = Orchestrator::new(options, service);

    let Some(mode) = matches.get_one::<String>("simulate") else {
        orchestrator.run().await.into_hook_result()?;
        return Ok(());
    };

    let build = match mode.as_str() {
        "legacy" => ProductionBuild::legacy("cli"),
        "standalone" => ProductionBuild::standalone("cli"),
        _ => ProductionBuild::current("cli"),
    };
    let autoglot = WithAutoglot::new(orchestrator);
    let config = autoglot.apply(HostConfig::default());
    let report = build.run(&config).await?;

    info!(
        "Build finished: {} target(s) compiled, {} done tap(s), post-compile hook {}",
        report.targets_compiled,
        report.done_taps_fired,
        if report.post_compile_hook_fired { "fired" } else { "not fired" }
    );

    Ok(())
}
