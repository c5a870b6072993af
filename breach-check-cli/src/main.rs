use std::time::Duration;

use breach_check::{Config, MatchMode, PasswordValidator, environment};
use breach_check_cli::{Error, Mode, Report, local_principal};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::{ExposeSecret, SecretBox};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "breach-check-cli")]
#[command(about = "Check passwords against Have I Been Pwned without sending them")]
struct Args {
    /// Passwords to check. Prefer --stdin to keep them out of shell history
    passwords: Vec<String>,

    /// Read passwords from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Entry point to report
    #[arg(short, long, value_enum, default_value_t = Mode::Count)]
    mode: Mode,

    /// Range API base URL (default: $BREACH_CHECK_ENDPOINT or the public service)
    #[arg(long)]
    endpoint: Option<String>,

    /// Attempts per lookup before giving up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Seconds to wait between attempts
    #[arg(long)]
    retry_delay_secs: Option<u64>,

    /// Maximum accepted password length in bytes
    #[arg(long)]
    max_length: Option<usize>,

    /// Match suffixes line by line instead of by substring
    #[arg(long)]
    strict_lines: bool,

    /// Request padded responses from the service
    #[arg(long)]
    add_padding: bool,

    /// Print one JSON object per password
    #[arg(long)]
    json: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn config(&self) -> Result<Config, Error> {
        let mut config = Config::default().with_env()?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if let Some(secs) = self.retry_delay_secs {
            config.retry_delay = Duration::from_secs(secs);
        }
        if let Some(len) = self.max_length {
            config.max_credential_len = len;
        }
        if self.strict_lines {
            config.match_mode = MatchMode::Line;
        }
        config.add_padding |= self.add_padding;
        config.validate()?;
        Ok(config)
    }
}

type Credential = SecretBox<[u8]>;

async fn read_stdin() -> Result<Vec<Credential>, Error> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut credentials = Vec::new();
    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        credentials.push(SecretBox::new(line.into_boxed_slice()));
    }
    Ok(credentials)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if args.stdin && !args.passwords.is_empty() {
        return Err(Error::InvalidArgs);
    }

    let config = args.config()?;

    let credentials: Vec<Credential> = if args.stdin {
        read_stdin().await?
    } else {
        args.passwords.iter().map(|p| SecretBox::new(p.clone().into_bytes().into_boxed_slice())).collect()
    };

    if credentials.is_empty() {
        return Err(Error::NoInput);
    }

    debug!(
        passwords = credentials.len(),
        endpoint = %config.endpoint,
        max_attempts = config.max_attempts,
        "starting breach check"
    );
    environment::init(&config)?;
    let validator = PasswordValidator::from_environment(config)?.with_principal(local_principal);

    let progress_bar = if args.stdin && !args.no_progress {
        let pb = ProgressBar::new(credentials.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(credentials.len());
    for (i, credential) in credentials.iter().enumerate() {
        let bytes = credential.expose_secret();
        let count = validator.breach_count(bytes).await.ok();
        reports.push(Report::new(i + 1, bytes, count));
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    environment::shutdown();

    for report in &reports {
        if args.json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            println!("{}", report.display(args.mode));
        }
    }

    let rejected = reports.iter().filter(|r| !r.acceptable).count();
    if args.mode == Mode::Validate && rejected > 0 {
        return Err(Error::Rejected { rejected, total: reports.len() });
    }

    Ok(())
}
