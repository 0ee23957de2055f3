use anyhow::Result;
use clap::Parser;
use pick_grader::{connect_pool, run_score_update, PgGameCache, PgPickStore, ScoresApiClient, Sport};

/// Run one pick-grading pass against the live results feed. Intended as a
/// cron target; the server's /update-scores endpoint does the same thing.
#[derive(Parser)]
#[command(name = "pick-grader")]
struct Args {
    /// Sport to process; repeat the flag for several. Defaults to all
    /// supported sports.
    #[arg(long = "sport")]
    sports: Vec<Sport>,

    /// SportRadar API key
    #[arg(long, env = "RESULTS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (before clap reads them)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let sports = if args.sports.is_empty() {
        Sport::ALL.to_vec()
    } else {
        args.sports
    };

    println!("Pick Grading Run\n");
    println!(
        "Sports: {}\n",
        sports
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let pool = connect_pool(&args.database_url).await?;
    let feed = ScoresApiClient::new(args.api_key);
    let store = PgPickStore::new(pool.clone());
    let cache = PgGameCache::new(pool);

    let summary = run_score_update(&feed, &store, &cache, &sports).await?;

    println!("Processed {} game results", summary.processed);
    println!("  - {} picks graded", summary.graded);
    println!("  - {} picks skipped (retried next run)", summary.skipped);
    println!("  - {} picks marked in progress", summary.marked_live);

    Ok(())
}
