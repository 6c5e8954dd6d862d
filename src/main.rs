mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use feedboard::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "feedboard=debug"
    } else {
        "feedboard=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let aggregator = Aggregator::new(&config)?;

    match cli.command {
        Commands::News { categories } => {
            let items = aggregator.news(&categories).await;
            emit(cli.json, &items, |n| {
                format!("[{}] {} ({})", n.category, n.title, n.source.name)
            })?;
        }
        Commands::Trending {
            query,
            language,
            days,
            from,
            to,
        } => {
            let options = TrendingOptions {
                query,
                language,
                from,
                to,
                time_window_days: days,
                ..Default::default()
            };
            let items = aggregator.trending(&options).await;
            emit(cli.json, &items, |n| format!("{} ({})", n.title, n.published_at))?;
        }
        Commands::Movies { genres } => {
            let movies = aggregator.movies(&genres).await;
            emit(cli.json, &movies, movie_line)?;
        }
        Commands::Social { categories } => {
            let posts = aggregator.social(&categories);
            emit(cli.json, &posts, social_line)?;
        }
        Commands::Search { query } => {
            let results = aggregator.search(&query).await;
            if cli.json {
                print_json(&results)?;
            } else {
                results.news.iter().for_each(|n| println!("news   {}", n.title));
                results.movies.iter().for_each(|m| println!("movie  {}", movie_line(m)));
                results.social.iter().for_each(|p| println!("social {}", social_line(p)));
            }
        }
        Commands::Feed {
            news,
            genres,
            social,
        } => {
            let request = FeedRequest {
                news_categories: news,
                movie_genres: genres,
                social_categories: social,
            };
            let items = aggregator.feed(&request).await.into_items();
            emit(cli.json, &items, |item| format!("{:<6} {}", item.kind(), item.title()))?;
        }
        Commands::Keys => {
            for (service, valid) in aggregator.credentials_report() {
                let state = if valid { "ok" } else { "missing or placeholder" };
                println!("{service}: {state}");
            }
        }
    }
    Ok(())
}

fn movie_line(m: &MovieItem) -> String {
    format!("{} ({}) imdb {}", m.title, m.year, m.imdb_rating)
}

fn social_line(p: &SocialPost) -> String {
    format!("{} [{}] {}", p.handle, p.category, p.body)
}

fn emit<T: Serialize>(json: bool, items: &[T], line: impl Fn(&T) -> String) -> Result<()> {
    if json {
        return print_json(&items);
    }
    for item in items {
        println!("{}", line(item));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("serializing output")?);
    Ok(())
}
