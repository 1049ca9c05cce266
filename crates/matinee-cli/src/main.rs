use clap::{ArgAction, Parser, Subcommand};
use commands::{config, convert, interactive, rate, search, show, watched};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "matinee")]
#[command(about = "Matinee - search movies, rate them, keep your watched list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie catalog
    #[command(long_about = "Search the movie catalog by free text. Queries shorter than two characters are inactive and return nothing.")]
    Search {
        /// Search text
        query: String,
    },
    /// Show full details for one movie
    Show {
        /// IMDB id, e.g. tt0372784
        id: String,
    },
    /// Rate a movie and add it to the watched list
    #[command(long_about = "Fetch a movie's details, attach your star rating, and append it to the watched list. A movie already on the list cannot be re-rated.")]
    Rate {
        /// IMDB id, e.g. tt0372784
        id: String,

        /// Star rating, 1-10
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// List watched movies with summary statistics
    Watched,
    /// Remove a movie from the watched list
    Remove {
        /// IMDB id to remove
        id: String,
    },
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: f64,

        /// Source currency code, e.g. EUR
        from: String,

        /// Target currency code, e.g. USD
        to: String,
    },
    /// Configure the catalog API key and endpoints
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the full API key instead of a masked value
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set the catalog API key
    SetKey {
        /// API key for the movie catalog
        key: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Some(Commands::Search { query }) => search::run_search(&query, &output).await,
        Some(Commands::Show { id }) => show::run_show(&id, &output).await,
        Some(Commands::Rate { id, rating }) => rate::run_rate(&id, rating, &output).await,
        Some(Commands::Watched) => watched::run_watched(&output),
        Some(Commands::Remove { id }) => watched::run_remove(&id, &output),
        Some(Commands::Convert { amount, from, to }) => {
            convert::run_convert(amount, &from, &to, &output).await
        }
        Some(Commands::Config { cmd }) => {
            config::run_config(cmd.unwrap_or(ConfigCommands::Show { full: false }), &output)
        }
        None => interactive::run_interactive(&output).await,
    }
}
