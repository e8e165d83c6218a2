use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use catalog::{CatalogClient, LikedMovie, MovieId, TmdbClient};
use profile::{FeedbackEvent, InMemoryFeedbackStore};
use server::{RecommendationOrchestrator, RecommendationRequest};

/// MovieMatch - one movie recommendation from the movies you already like
#[derive(Parser)]
#[command(name = "movie-match")]
#[command(about = "Movie recommendation engine backed by the TMDB catalog", long_about = None)]
struct Cli {
    /// TMDB API key (falls back to the TMDB_API_KEY environment variable)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend one movie from a liked-movies file
    Recommend {
        /// Path to a JSON array of liked movies (at least 4)
        #[arg(long)]
        liked: PathBuf,

        /// Optional JSON array of feedback events, newest first
        #[arg(long)]
        feedback: Option<PathBuf>,

        /// Movie ids that must not be recommended again
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<MovieId>,

        /// User key scoping the feedback history
        #[arg(long, default_value = "local")]
        user: String,

        /// Print the persistence record as JSON instead of pretty output
        #[arg(long)]
        json: bool,
    },

    /// Look up what the catalog considers similar to a movie
    Similar {
        /// Movie id to query
        #[arg(long)]
        movie_id: MovieId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let catalog = tmdb_client(cli.api_key)?;

    match cli.command {
        Commands::Recommend {
            liked,
            feedback,
            exclude,
            user,
            json,
        } => handle_recommend(catalog, liked, feedback, exclude, user, json).await?,
        Commands::Similar { movie_id } => handle_similar(catalog, movie_id).await?,
    }

    Ok(())
}

/// Build the catalog client from the flag or the environment.
fn tmdb_client(api_key: Option<String>) -> Result<TmdbClient> {
    let api_key = api_key
        .or_else(|| std::env::var("TMDB_API_KEY").ok())
        .ok_or_else(|| anyhow!("no TMDB API key: pass --api-key or set TMDB_API_KEY"))?;
    Ok(TmdbClient::new(api_key)?)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: TmdbClient,
    liked_path: PathBuf,
    feedback_path: Option<PathBuf>,
    exclude: Vec<MovieId>,
    user: String,
    json: bool,
) -> Result<()> {
    let liked_movies: Vec<LikedMovie> = read_json(&liked_path)
        .with_context(|| format!("failed to read liked movies from {}", liked_path.display()))?;

    let feedback_events: Vec<FeedbackEvent> = match &feedback_path {
        Some(path) => read_json(path)
            .with_context(|| format!("failed to read feedback from {}", path.display()))?,
        None => Vec::new(),
    };

    let orchestrator = RecommendationOrchestrator::new(
        Arc::new(catalog),
        Arc::new(InMemoryFeedbackStore::new(feedback_events)),
    );

    let recommendation = orchestrator
        .recommend(RecommendationRequest {
            user_key: user,
            liked_movies,
            excluded_ids: HashSet::from_iter(exclude),
        })
        .await
        .context("no recommendation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation.record)?);
        return Ok(());
    }

    let movie = &recommendation.candidate;
    let year = movie
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .unwrap_or("????");

    println!();
    println!("{} ({})", movie.title.bold().green(), year);
    println!(
        "{} {:.1}/10 across {} votes",
        "★".yellow(),
        movie.vote_average,
        movie.vote_count
    );
    if !recommendation.record.resolved_genres.is_empty() {
        let names: Vec<&str> = recommendation
            .record
            .resolved_genres
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        println!("{} {}", "•".cyan(), names.join(", "));
    }
    println!();
    println!("{}", movie.overview);
    if let Some(poster) = &movie.poster_path {
        println!();
        println!("{} https://image.tmdb.org/t/p/w500{}", "Poster:".dimmed(), poster);
    }

    Ok(())
}

/// Handle the 'similar' command
async fn handle_similar(catalog: TmdbClient, movie_id: MovieId) -> Result<()> {
    let similar = catalog
        .similar(movie_id)
        .await
        .with_context(|| format!("similar lookup failed for movie {}", movie_id))?;

    if similar.is_empty() {
        println!("No similar movies found for {}", movie_id);
        return Ok(());
    }

    for (i, movie) in similar.iter().take(10).enumerate() {
        println!(
            "{:2}. {} ({:.1}/10)",
            i + 1,
            movie.title.bold(),
            movie.vote_average
        );
    }

    Ok(())
}

/// Parse a JSON file into the requested shape.
fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
