// src/config.rs
use crate::constants::{DEFAULT_GENERATION_API_BASE, DEFAULT_GENERATION_MODEL};
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::formatting::Publisher;
use crate::types::{ApiKey, BowlId, IdentityToken, ValidatedUrl, ValidationError};
use clap::Parser;
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const API_KEY_VAR: &str = "OPENAI_API_KEY";
const TOKEN_VAR: &str = "AIMIXER_TOKEN";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// ID of the bowl to mix
    pub bowl_id: String,

    /// Session token identifying the user (falls back to AIMIXER_TOKEN)
    #[arg(short, long)]
    pub token: Option<String>,

    /// Directory holding bowls, sessions and published artifacts
    #[arg(short = 'd', long, default_value = "./aimixer-data")]
    pub data_dir: String,

    /// Base URL creations are linked under (defaults to a file:// URL of the artifacts dir)
    #[arg(long)]
    pub public_url: Option<String>,

    /// Chat model used for generation
    #[arg(long, default_value = DEFAULT_GENERATION_MODEL)]
    pub model: String,

    /// Base URL of the chat-completions API
    #[arg(long, default_value = DEFAULT_GENERATION_API_BASE)]
    pub api_base: String,

    /// Organisation named in transcript cleaning prompts
    #[arg(long)]
    pub publisher_name: Option<String>,

    /// Website of the publisher, used with --publisher-name
    #[arg(long)]
    pub publisher_site: Option<String>,

    /// Per-request timeout in seconds for fetches and generation calls
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Attempts per generation call before giving up on transient errors
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// How the generation service is reached.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub api_base: String,
    pub model: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GENERATION_API_BASE.to_string(),
            model: DEFAULT_GENERATION_MODEL.to_string(),
            request_timeout: Duration::from_secs(120),
            retry: RetryPolicy::default(),
        }
    }
}

/// Resolved configuration, validated and ready to wire a mixer.
#[derive(Debug, Clone)]
pub struct MixerConfig {
    pub bowl_id: BowlId,
    pub api_key: ApiKey,
    pub token: IdentityToken,
    pub data_dir: PathBuf,
    pub public_url: ValidatedUrl,
    pub publisher: Option<Publisher>,
    pub generation: GenerationSettings,
    pub fetch_timeout: Duration,
    pub verbose: bool,
}

impl MixerConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_VAR))
        })?;
        let env_token = std::env::var(TOKEN_VAR).ok();
        Self::from_parts(cli, api_key, env_token)
    }

    fn from_parts(
        cli: CommandLineInput,
        api_key: String,
        env_token: Option<String>,
    ) -> Result<Self, AppError> {
        let api_key = ApiKey::new(api_key)?;
        let bowl_id = BowlId::parse(&cli.bowl_id)?;

        let token = cli.token.or(env_token).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "no session token: pass --token or set {}",
                TOKEN_VAR
            ))
        })?;
        let token = IdentityToken::new(token)?;

        let data_dir = PathBuf::from(cli.data_dir);
        let public_url = match cli.public_url {
            Some(url) => ValidatedUrl::parse(&url)?,
            None => directory_url(&artifacts_dir(&data_dir))?,
        };

        let publisher = cli.publisher_name.map(|name| Publisher {
            name,
            website: cli.publisher_site,
        });

        let timeout = Duration::from_secs(cli.timeout.max(1));

        Ok(MixerConfig {
            bowl_id,
            api_key,
            token,
            data_dir,
            public_url,
            publisher,
            generation: GenerationSettings {
                api_base: cli.api_base,
                model: cli.model,
                request_timeout: timeout,
                retry: RetryPolicy::new(cli.retries),
            },
            fetch_timeout: timeout,
            verbose: cli.verbose,
        })
    }

    pub fn bowls_dir(&self) -> PathBuf {
        self.data_dir.join("bowls")
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        artifacts_dir(&self.data_dir)
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.data_dir.join("sessions.json")
    }
}

fn artifacts_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("artifacts")
}

/// A `file://` URL for `dir`, made absolute against the working directory.
fn directory_url(dir: &Path) -> Result<ValidatedUrl, AppError> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    };
    let url = Url::from_directory_path(&absolute).map_err(|_| ValidationError::InvalidUrl {
        url: absolute.display().to_string(),
        reason: "not representable as a file URL".to_string(),
    })?;
    Ok(ValidatedUrl::parse(url.as_str())?)
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            bowl_id: BowlId::parse("example-bowl").expect("Example bowl ID should be valid"),
            api_key: ApiKey::new("sk-default-key-for-testing-only")
                .expect("Default API key should be valid"),
            token: IdentityToken::new("default-session-token")
                .expect("Default session token should be valid"),
            data_dir: PathBuf::from("./aimixer-data"),
            public_url: ValidatedUrl::parse("https://creations.example.com")
                .expect("Default public URL should be valid"),
            publisher: None,
            generation: GenerationSettings::default(),
            fetch_timeout: Duration::from_secs(120),
            verbose: false,
        }
    }
}
