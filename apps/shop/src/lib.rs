//! # Museum Shop Shell
//!
//! Command-line storefront for the museum gift shop.
//!
//! ## Module Organization
//! ```text
//! museum_shop/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── ShopConfig (defaults < shop.toml < MUSEUM_*)
//! ├── error.rs        ◄─── AppError for every command
//! ├── prompt.rs       ◄─── Member/volume question (dialoguer)
//! ├── render.rs       ◄─── Text tables
//! └── commands/
//!     ├── catalog.rs  ◄─── Browse souvenirs
//!     ├── cart.rs     ◄─── add / set / remove / clear / show
//!     └── checkout.rs ◄─── Price the cart
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments, initialize tracing (stderr)                        │
//! │  2. Load ShopConfig and build the OrderCalculator (validated)           │
//! │  3. Open the SQLite storage, run pending migrations                     │
//! │  4. Run one command, print its output to stdout                         │
//! │  5. Close the pool                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod render;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use museum_db::Database;

use cli::{Args, Commands};
use commands::checkout::SummaryRequest;
use config::ShopConfig;
use error::AppError;
use prompt::{ChoiceResolver, NoPrompt, TerminalResolver};

/// Runs one command.
pub async fn run(args: Args) -> Result<(), AppError> {
    let config = ShopConfig::load(args.config.as_deref())?;
    let calculator = config.calculator()?;
    debug!(?config, "Configuration loaded");

    // The catalog needs no storage
    if let Commands::Catalog { collection } = &args.command {
        let entries = commands::catalog::list_catalog(*collection);
        print!("{}", render::catalog_table(&entries));
        return Ok(());
    }

    let db_config = config.db_config()?;
    info!(session_minutes = config.storage.session_minutes, "Opening cart storage");
    let db = Database::new(db_config).await?;

    let result = dispatch(&db, &calculator, args.command).await;
    db.close().await;
    result
}

async fn dispatch(
    db: &Database,
    calculator: &museum_core::OrderCalculator,
    command: Commands,
) -> Result<(), AppError> {
    match command {
        Commands::Catalog { collection } => {
            let entries = commands::catalog::list_catalog(collection);
            print!("{}", render::catalog_table(&entries));
        }
        Commands::Add { id, qty } => {
            let cart = commands::cart::add_to_cart(db, &id, qty).await?;
            print!("{}", render::cart_table(&cart));
        }
        Commands::Set { id, qty } => {
            let cart = commands::cart::update_cart_item(db, &id, qty).await?;
            print!("{}", render::cart_table(&cart));
        }
        Commands::Remove { id } => {
            let cart = commands::cart::remove_from_cart(db, &id).await?;
            print!("{}", render::cart_table(&cart));
        }
        Commands::Clear => {
            let cart = commands::cart::clear_cart(db).await?;
            print!("{}", render::cart_table(&cart));
        }
        Commands::Cart => {
            let cart = commands::cart::get_cart(db).await?;
            print!("{}", render::cart_table(&cart));
        }
        Commands::Summary {
            member,
            use_discount,
            json,
        } => {
            let request = SummaryRequest {
                member,
                use_discount,
            };
            let mut resolver: Box<dyn ChoiceResolver> = if json {
                Box::new(NoPrompt)
            } else {
                Box::new(TerminalResolver)
            };

            let response =
                commands::checkout::summarize(db, calculator, request, resolver.as_mut()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render::summary_table(&response.lines));
            }
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging on stderr.
///
/// ## Log Levels
/// - Default: INFO (`--verbose`: DEBUG)
/// - `RUST_LOG` overrides both, e.g. `RUST_LOG=museum_db=trace`
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug,sqlx=warn"
    } else {
        "info,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
