use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "lottery_videos_data.json";

/// Fetch metadata, transcripts and top comments for categorized YouTube videos
#[derive(Debug, Parser)]
#[command(name = "fetcher", version, about)]
pub struct Cli {
    /// JSON catalog of {category: [video id | URL | {url, title, source}]};
    /// the built-in list is used when omitted
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Where to write the aggregated JSON (overwritten on every run)
    #[arg(long, short, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_matches_plain_run() {
        let cli = Cli::try_parse_from(["fetcher"]).unwrap();
        assert!(cli.catalog.is_none());
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["fetcher", "--catalog", "news.json", "-o", "out/news.json"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("news.json")));
        assert_eq!(cli.output, PathBuf::from("out/news.json"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["fetcher", "--retry"]).is_err());
    }
}
