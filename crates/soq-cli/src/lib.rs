//! soq CLI - Stack Overflow answers in the terminal
//!
//! Parses flags, merges them with the environment and the settings file,
//! validates everything, then runs one lookup and prints the result.
use anyhow::Result;
use clap::Parser;
use soq_core::ansi::strip_sgr;
use soq_core::provider::{SearchProvider, StackExchange};
use soq_core::{
    AnswerRequest, Fetcher, GoogleSearch, OpenSerp, ProviderConfig, RenderContext,
    SelectionLimits, Settings, get_answers,
};
use std::borrow::Cow;
use std::io::{self, Write};
use tracing::{debug, warn};

pub mod cli;
pub mod error;
mod options;
mod utils;

use crate::cli::Cli;
use crate::error::{CliError, ErrorCategory};
use crate::options::Options;
use crate::utils::{initialize_logging, render_width};

/// Execute the soq CLI with the currently configured environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a provider fails or output
/// cannot be written.
pub async fn run() -> Result<()> {
    // Convert Broken pipe panics into a clean exit
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe") || msg.contains("broken pipe") {
            std::process::exit(0);
        }
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute(&cli).await
}

async fn execute(cli: &Cli) -> Result<()> {
    // Everything that can be rejected locally is checked before any request.
    let settings = Settings::load(cli.config.as_deref())?;
    let options = Options::resolve(cli, &settings);
    debug!("resolved options: {options:?}");

    let limits = SelectionLimits::new(options.questions, options.answers)?;
    let request = AnswerRequest::new(cli.query_text(), limits, options.show_question)?;
    let provider = ProviderConfig::resolve(
        cli.api_key.clone(),
        cli.engine.clone(),
        cli.openserp_host.clone(),
        cli.openserp_port.clone(),
    )?;

    let fetcher = Fetcher::new()?;
    let search = build_search(provider, fetcher.clone(), cli.google_url.as_deref());
    let mut answers = StackExchange::new(fetcher);
    if let Some(url) = cli.stackexchange_url.as_deref() {
        answers = answers.with_base_url(url);
    }

    let ctx = RenderContext::new(render_width(), &options.style, &options.lexer);
    let text = get_answers(&request, search.as_ref(), &answers, &ctx).await?;

    if text.is_empty() {
        warn!("no answered questions found for {:?}", request.query);
        return Ok(());
    }
    print_output(&text, cli.color_disabled())
}

fn build_search(
    provider: ProviderConfig,
    fetcher: Fetcher,
    google_url: Option<&str>,
) -> Box<dyn SearchProvider> {
    match provider {
        ProviderConfig::Google { api_key, engine_id } => {
            let mut google = GoogleSearch::new(fetcher, api_key, engine_id);
            if let Some(url) = google_url {
                google = google.with_base_url(url);
            }
            Box::new(google)
        },
        ProviderConfig::OpenSerp { host, port } => Box::new(OpenSerp::new(fetcher, &host, port)),
    }
}

fn print_output(text: &str, plain: bool) -> Result<()> {
    let text = if plain {
        Cow::Owned(strip_sgr(text))
    } else {
        Cow::Borrowed(text)
    };

    let mut stdout = io::stdout().lock();
    match writeln!(stdout, "{text}").and_then(|()| stdout.flush()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(CliError::new(ErrorCategory::Internal, err).into()),
    }
}
