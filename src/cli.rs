use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Dashboard content aggregator for debugging and development
#[derive(Parser)]
#[command(name = "feedboard")]
#[command(
    about = "Fetch news, movies and social posts for a personalized dashboard",
    long_about = None
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print pretty JSON instead of one line per item
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Top headlines by category (all categories when none given)
    News {
        categories: Vec<String>,
    },
    /// Popularity-sorted articles
    Trending {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
        /// Informational time window in days
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// ISO-8601 lower bound
        #[arg(long)]
        from: Option<String>,
        /// ISO-8601 upper bound
        #[arg(long)]
        to: Option<String>,
    },
    /// Movies by genre, newest first
    Movies {
        genres: Vec<String>,
    },
    /// Generated social posts by category label
    Social {
        categories: Vec<String>,
    },
    /// Search news, movies and posts at once
    Search {
        query: String,
    },
    /// Combined feed of news, movies and social posts
    Feed {
        #[arg(long = "news")]
        news: Vec<String>,
        #[arg(long = "genre")]
        genres: Vec<String>,
        #[arg(long = "social")]
        social: Vec<String>,
    },
    /// Report which service keys are usable
    Keys,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_with_repeated_flags() {
        let args = ["--news", "sports", "--genre", "drama", "--genre", "horror"];
        let cli = Cli::parse_from(["feedboard", "--json", "feed"].into_iter().chain(args));
        assert!(cli.json);
        match cli.command {
            Commands::Feed {
                news,
                genres,
                social,
            } => {
                assert_eq!(news, ["sports"]);
                assert_eq!(genres, ["drama", "horror"]);
                assert!(social.is_empty());
            }
            _ => panic!("expected feed"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["feedboard", "trending", "--query", "rust", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Trending { days: 7, .. }));
    }
}
