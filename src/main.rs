// src/main.rs

use aimixer::{
    AppError, ChatCompletionsClient, Collaborators, CommandLineInput, DirectoryArtifactStore,
    FileRecordStore, HttpClientSettings, HttpContentFetcher, MixEvent, MixOutcome, MixRequest,
    Mixer, MixerConfig, PromptComposer, RecordStore, StatusChannel, TokenFileValidator,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("aimixer.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Status events go to stdout; logs go to stderr so they never interleave with them.
    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the production adapters for every collaborator.
async fn build_collaborators(
    config: &MixerConfig,
) -> Result<(Collaborators, Arc<FileRecordStore>), AppError> {
    let records = Arc::new(FileRecordStore::open(config.bowls_dir()).await?);
    let identity = TokenFileValidator::load(config.sessions_path()).await?;
    let artifacts = DirectoryArtifactStore::new(config.artifacts_dir(), config.public_url.clone());
    let fetcher = HttpContentFetcher::new(
        &HttpClientSettings::default().with_request_timeout(config.fetch_timeout),
    )?;
    let generator = ChatCompletionsClient::new(&config.api_key, &config.generation)?;

    let collaborators = Collaborators {
        identity: Arc::new(identity),
        records: records.clone(),
        artifacts: Arc::new(artifacts),
        fetcher: Arc::new(fetcher),
        generator: Arc::new(generator),
    };
    Ok((collaborators, records))
}

/// Prints each status event as it arrives, until the channel closes.
async fn print_events(mut events: UnboundedReceiver<MixEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            MixEvent::Busy(true) => println!("… mixing"),
            MixEvent::Busy(false) => {}
            MixEvent::Message(message) => println!("  {}", message),
            MixEvent::Alert(alert) => eprintln!("⚠️  {}", alert),
            MixEvent::CreationAdded { bowl_id, creation } => {
                println!("✓ New creation in bowl {}: {}", bowl_id, creation)
            }
        }
    }
}

/// Loads the bowl, runs one mix and reports how it ended.
async fn execute_mix(config: &MixerConfig) -> Result<(), AppError> {
    let (collaborators, records) = build_collaborators(config).await?;
    let composer = PromptComposer::new()?.with_publisher(config.publisher.clone());
    let mixer = Mixer::new(collaborators, composer);

    let meta = records.get_bowl_meta(&config.bowl_id).await?;
    log::info!(
        "Loaded bowl {}: {} items, {} creations",
        config.bowl_id,
        meta.contents.len(),
        meta.creations.len()
    );
    let request = MixRequest::new(config.token.clone(), meta.snapshot(&config.bowl_id));

    let (status, events) = StatusChannel::new();
    let printer = tokio::spawn(print_events(events));

    let outcome = mixer.mix(request, &status).await;
    drop(status);
    if let Err(e) = printer.await {
        log::warn!("Event printer stopped early: {}", e);
    }

    match outcome {
        MixOutcome::Created { .. } => Ok(()),
        MixOutcome::Aborted { alert } => Err(AppError::MixAborted { alert }),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = MixerConfig::resolve(cli)?;

    execute_mix(&config).await?;

    Ok(())
}
