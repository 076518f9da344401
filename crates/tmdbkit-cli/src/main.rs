//! tmdbkit - command line client for The Movie Database (TMDb) API.

/// Application configuration (TOML).
mod config;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use tmdbkit_api::tmdb::{
    ChangesParams, LocalTmdbApi, SearchMultiParams, TmdbClient, TmdbCreditMedia, TmdbKnownFor,
    TmdbSearchItem, TmdbTaggedMedia,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies, TV series and people in one query.
    Search(SearchArgs),
    /// Show movie details.
    Movie(MovieArgs),
    /// Show TV series details.
    Tv(TvArgs),
    /// Show a TV season with its episodes.
    Season(SeasonArgs),
    /// List a person's movie and TV credits.
    Credits(CreditsArgs),
    /// Show a single credit.
    Credit(CreditArgs),
    /// Show a movie's change log.
    Changes(ChangesArgs),
    /// List images a person is tagged in.
    Images(ImagesArgs),
    /// Show the account's favorite, watchlist and rating state for a movie.
    States(StatesArgs),
    /// Rate a movie or remove its rating.
    Rate(RateArgs),
    /// Show the API image configuration.
    Config,
    /// Write the API token and defaults to the config file.
    Init(InitArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Fight Club").
    #[arg(long, required = true)]
    query: String,
    /// Response language (default: config, else "en-US").
    #[arg(long)]
    language: Option<String>,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDb movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: config, else "en-US").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `tv` subcommand.
#[derive(clap::Args)]
struct TvArgs {
    /// TMDb series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: config, else "en-US").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `season` subcommand.
#[derive(clap::Args)]
struct SeasonArgs {
    /// TMDb series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number.
    #[arg(long, required = true)]
    season: u32,
    /// Response language (default: config, else "en-US").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `credits` subcommand.
#[derive(clap::Args)]
struct CreditsArgs {
    /// TMDb person ID.
    #[arg(long, required = true)]
    person: u64,
    /// Response language (default: config, else "en-US").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `credit` subcommand.
#[derive(clap::Args)]
struct CreditArgs {
    /// Credit ID (e.g. "52fe4250c3a36847f80149f3").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `changes` subcommand.
#[derive(clap::Args)]
struct ChangesArgs {
    /// TMDb movie ID.
    #[arg(long, required = true)]
    movie: u64,
    /// First day (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    start_date: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    end_date: Option<NaiveDate>,
}

/// Arguments for the `images` subcommand.
#[derive(clap::Args)]
struct ImagesArgs {
    /// TMDb person ID.
    #[arg(long, required = true)]
    person: u64,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `states` subcommand.
#[derive(clap::Args)]
struct StatesArgs {
    /// TMDb movie ID.
    #[arg(long, required = true)]
    movie: u64,
}

/// Arguments for the `rate` subcommand.
#[derive(clap::Args)]
struct RateArgs {
    /// TMDb movie ID.
    #[arg(long, required = true)]
    movie: u64,
    /// Rating, 0.5 to 10.0 in steps of 0.5.
    #[arg(long, required_unless_present = "delete", conflicts_with = "delete")]
    value: Option<f64>,
    /// Remove the existing rating instead.
    #[arg(long)]
    delete: bool,
}

/// Arguments for the `init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// API read access token.
    #[arg(long, required = true)]
    token: String,
    /// Default response language (e.g. "ja-JP").
    #[arg(long)]
    language: Option<String>,
}

/// Parses a `YYYY-MM-DD` argument.
fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Renders an optional value, `-` when absent.
fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Builds a `TmdbClient` from the config file and environment.
///
/// `TMDB_API_TOKEN` and `TMDB_SESSION_ID` override the file values.
///
/// # Errors
///
/// Returns an error if no API token is configured or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig, config_path: &Path) -> Result<TmdbClient> {
    let api_token = config
        .api_token(std::env::var("TMDB_API_TOKEN").ok())
        .with_context(|| {
            format!(
                "TMDB API token is required: set TMDB_API_TOKEN or [tmdb].api_token in {}",
                config_path.display()
            )
        })?;

    let mut builder = TmdbClient::builder().api_token(api_token).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(ref language) = config.tmdb.language {
        builder = builder.language(language);
    }
    if let Some(session_id) = config.session_id(std::env::var("TMDB_SESSION_ID").ok()) {
        builder = builder.session_id(session_id);
    }
    if let Some(retries) = config.tmdb.max_retries {
        builder = builder.max_retries(retries);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_search(client: &TmdbClient, args: &SearchArgs, include_adult: bool) -> Result<()> {
    let mut params = SearchMultiParams::new(&args.query)
        .page(args.page)
        .include_adult(include_adult);
    if let Some(ref language) = args.language {
        params = params.language(language);
    }

    let response = client
        .search_multi(&params)
        .await
        .context("TMDB search/multi request failed")?;

    tracing::info!(
        "Page {}/{} ({} results)",
        response.page,
        response.total_pages,
        response.total_results
    );
    tracing::info!("ID\tType\t\tName");
    for item in &response.results {
        tracing::info!(
            "{}\t{}\t\t{}",
            item.id(),
            item.media_type(),
            item.display_name()
        );
        if let TmdbSearchItem::Person(person) = item {
            let known_for: Vec<&str> = person.known_for.iter().map(TmdbKnownFor::display_name).collect();
            if !known_for.is_empty() {
                tracing::info!("\t\t\tknown for: {}", known_for.join(", "));
            }
        }
    }

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_movie(client: &TmdbClient, args: &MovieArgs) -> Result<()> {
    let movie = client
        .movie_details(args.id, args.language.as_deref())
        .await
        .context("TMDB movie details request failed")?;

    tracing::info!("ID: {}", movie.id);
    tracing::info!("Title: {}", movie.title);
    tracing::info!("Original Title: {}", movie.original_title);
    tracing::info!("Release Date: {}", or_dash(movie.release_date));
    tracing::info!("Status: {}", movie.status);
    tracing::info!("Runtime: {}min", or_dash(movie.runtime));
    let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genres.join(", "));
    tracing::info!("Vote: {:.1} ({} votes)", movie.vote_average, movie.vote_count);

    Ok(())
}

/// Runs the `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_tv(client: &TmdbClient, args: &TvArgs) -> Result<()> {
    let details = client
        .tv_details(args.id, args.language.as_deref())
        .await
        .context("TMDB tv details request failed")?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Name: {}", details.name);
    tracing::info!("Original Name: {}", details.original_name);
    tracing::info!("First Air Date: {}", or_dash(details.first_air_date));
    tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
    tracing::info!("Seasons: {}", details.number_of_seasons);
    tracing::info!("Episodes: {}", details.number_of_episodes);
    tracing::info!("---");
    for season in &details.seasons {
        tracing::info!(
            "  Season {}: {} episodes (air_date: {})",
            season.season_number,
            season.episode_count,
            or_dash(season.air_date),
        );
    }

    Ok(())
}

/// Runs the `season` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_season(client: &TmdbClient, args: &SeasonArgs) -> Result<()> {
    let season = client
        .tv_season(args.id, args.season, args.language.as_deref())
        .await
        .context("TMDB tv season request failed")?;

    tracing::info!(
        "Season {}: {}",
        season.season_number,
        season.name.as_deref().unwrap_or("-")
    );
    tracing::info!("Episodes:");
    for ep in &season.episodes {
        tracing::info!(
            "  E{:02}: {} (air_date: {}, runtime: {}min)",
            ep.episode_number,
            ep.name,
            or_dash(ep.air_date),
            or_dash(ep.runtime),
        );
    }

    Ok(())
}

/// Runs the `credits` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_credits(client: &TmdbClient, args: &CreditsArgs) -> Result<()> {
    let credits = client
        .person_combined_credits(args.person, args.language.as_deref())
        .await
        .context("TMDB combined credits request failed")?;

    tracing::info!("Cast ({}):", credits.cast.len());
    for cast in &credits.cast {
        tracing::info!(
            "  {}\t{}\tas {}",
            cast.credit_id(),
            cast.display_name(),
            cast.character().unwrap_or("-")
        );
    }
    tracing::info!("Crew ({}):", credits.crew.len());
    for crew in &credits.crew {
        tracing::info!(
            "  {}\t{}\t{}",
            crew.credit_id(),
            crew.display_name(),
            crew.job()
        );
    }

    Ok(())
}

/// Runs the `credit` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_credit(client: &TmdbClient, args: &CreditArgs) -> Result<()> {
    let credit = client
        .credit_details(&args.id)
        .await
        .context("TMDB credit details request failed")?;

    tracing::info!("Credit: {} ({})", credit.id, credit.credit_type);
    tracing::info!("Person: {}", credit.person.name);
    tracing::info!("Job: {} / {}", credit.department, credit.job);
    tracing::info!(
        "Media: {} ({})",
        credit
            .media
            .as_ref()
            .map_or("-", TmdbCreditMedia::display_name),
        credit.media_type
    );

    Ok(())
}

/// Runs the `changes` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_changes(client: &TmdbClient, args: &ChangesArgs) -> Result<()> {
    let mut params = ChangesParams::new();
    if let Some(date) = args.start_date {
        params = params.start_date(date);
    }
    if let Some(date) = args.end_date {
        params = params.end_date(date);
    }

    let changes = client
        .movie_changes(args.movie, &params)
        .await
        .context("TMDB movie changes request failed")?;

    if changes.changes.is_empty() {
        tracing::info!("No changes for movie {}", args.movie);
        return Ok(());
    }
    for change in &changes.changes {
        tracing::info!("{}:", change.key);
        for item in &change.items {
            let base = item.base();
            tracing::info!(
                "  {}\t{}\t{}",
                base.time,
                item.action(),
                base.iso_639_1.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}

/// Runs the `images` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_images(client: &TmdbClient, args: &ImagesArgs) -> Result<()> {
    let images = client
        .person_tagged_images(args.person, args.page)
        .await
        .context("TMDB tagged images request failed")?;

    tracing::info!(
        "Page {}/{} ({} images)",
        images.page,
        images.total_pages,
        images.total_results
    );
    for tagged in &images.results {
        tracing::info!(
            "  {}\t{}x{}\t{}\t{}",
            tagged.image_type,
            tagged.image.width,
            tagged.image.height,
            tagged
                .media
                .as_ref()
                .map_or("-", TmdbTaggedMedia::display_name),
            tagged.image.file_path
        );
    }

    Ok(())
}

/// Runs the `states` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_states(client: &TmdbClient, args: &StatesArgs) -> Result<()> {
    let states = client
        .movie_account_states(args.movie)
        .await
        .context("TMDB account states request failed")?;

    tracing::info!("Favorite: {}", states.favorite);
    tracing::info!("Watchlist: {}", states.watchlist);
    tracing::info!("Rating: {}", or_dash(states.rating));

    Ok(())
}

/// Runs the `rate` subcommand.
///
/// # Errors
///
/// Returns an error if the rating is invalid or the API request fails.
#[instrument(skip_all)]
async fn run_rate(client: &TmdbClient, args: &RateArgs) -> Result<()> {
    let status = if let Some(value) = args.value {
        client
            .rate_movie(args.movie, value)
            .await
            .context("TMDB rate movie request failed")?
    } else {
        client
            .delete_movie_rating(args.movie)
            .await
            .context("TMDB delete rating request failed")?
    };

    tracing::info!("{} (code {})", status.status_message, status.status_code);

    Ok(())
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_config(client: &TmdbClient) -> Result<()> {
    let config = client
        .configuration()
        .await
        .context("TMDB configuration request failed")?;

    let images = &config.images;
    tracing::info!("Base URL: {}", images.secure_base_url);
    tracing::info!("Poster sizes: {}", images.poster_sizes.join(", "));
    tracing::info!("Backdrop sizes: {}", images.backdrop_sizes.join(", "));
    tracing::info!("Profile sizes: {}", images.profile_sizes.join(", "));
    tracing::info!("Still sizes: {}", images.still_sizes.join(", "));
    tracing::info!("Logo sizes: {}", images.logo_sizes.join(", "));
    tracing::info!("Change keys: {}", config.change_keys.len());

    Ok(())
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
#[instrument(skip_all)]
fn run_init(args: &InitArgs, config_path: &Path) -> Result<()> {
    let mut config = AppConfig::load(config_path)?;
    config.tmdb.api_token = Some(args.token.clone());
    if let Some(ref language) = args.language {
        config.tmdb.language = Some(language.clone());
    }
    config.save(config_path)?;

    tracing::info!("Saved config to {}", config_path.display());

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.dir.as_ref())?;
    if let Commands::Init(ref args) = cli.command {
        return run_init(args, &config_path);
    }

    let config = AppConfig::load(&config_path)?;
    let client = build_tmdb_client(&config, &config_path)?;
    match cli.command {
        Commands::Search(args) => run_search(&client, &args, config.tmdb.include_adult).await,
        Commands::Movie(args) => run_movie(&client, &args).await,
        Commands::Tv(args) => run_tv(&client, &args).await,
        Commands::Season(args) => run_season(&client, &args).await,
        Commands::Credits(args) => run_credits(&client, &args).await,
        Commands::Credit(args) => run_credit(&client, &args).await,
        Commands::Changes(args) => run_changes(&client, &args).await,
        Commands::Images(args) => run_images(&client, &args).await,
        Commands::States(args) => run_states(&client, &args).await,
        Commands::Rate(args) => run_rate(&client, &args).await,
        Commands::Config => run_config(&client).await,
        Commands::Init(ref args) => run_init(args, &config_path),
    }
}
