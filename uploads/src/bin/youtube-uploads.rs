use clap::Parser;
use eyre::Context;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_uploads::{CancelSignal, ClientConfig, PlaylistPager, config};

/// Print one page of a YouTube channel's uploads as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YouTube Data API key.
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Channel ID, e.g. UC_x5XG1OV2P6uZZ5FSM9Ttw.
    #[arg(long)]
    channel: String,

    /// 1-based page number; each page holds up to 50 videos.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        default_value_t = config::DEFAULT_REQUEST_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Give up on the whole fetch after this many seconds.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    deadline: Option<u64>,

    /// Root of the YouTube Data API.
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let args = Args::parse();

    let config = ClientConfig::default()
        .with_base_url(args.base_url)
        .with_request_timeout(Duration::from_secs(args.timeout));
    let pager = PlaylistPager::with_config(args.api_key, &config)?;

    let cancel = match args.deadline {
        Some(secs) => {
            CancelSignal::deadline(tokio::time::Instant::now() + Duration::from_secs(secs))
        }
        None => CancelSignal::never(),
    };

    let page = pager
        .fetch_videos_with_cancel(&args.channel, args.page, &cancel)
        .await
        .with_context(|| format!("fetch page {} of channel {}", args.page, args.channel))?;

    tracing::info!(
        videos = page.posts.len(),
        has_more = page.has_more,
        "fetched uploads"
    );

    let json = serde_json::to_string_pretty(&page).context("serialize page as JSON")?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let base = ["youtube-uploads", "--api-key", "AIzaKey", "--channel", "UCabc"];
        Args::try_parse_from(base.iter().chain(extra))
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.page, 1);
        assert_eq!(args.timeout, config::DEFAULT_REQUEST_TIMEOUT.as_secs());
        assert_eq!(args.deadline, None);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse(&["--timeout", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(parse(&["--timeout", "1"]).is_ok());
    }

    #[test]
    fn zero_deadline_is_rejected() {
        let err = parse(&["--deadline", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn negative_page_reaches_the_pager() {
        let args = parse(&["--page", "-2"]).unwrap();
        assert_eq!(args.page, -2);
    }
}
