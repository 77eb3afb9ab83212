//! # Command Line
//!
//! Argument definitions for the `museum-shop` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use museum_core::catalog::Collection;
use museum_core::types::DiscountChoice;

#[derive(Debug, Parser)]
#[command(name = "museum-shop")]
#[command(about = "Museum gift shop cart: browse souvenirs, fill a cart, price the order")]
#[command(version)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List souvenirs
    Catalog {
        /// Only one collection (architecture, anthropology, history)
        #[arg(long)]
        collection: Option<Collection>,
    },
    /// Add a souvenir to the cart
    Add {
        /// Souvenir id, e.g. arch-001
        id: String,
        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        qty: i64,
    },
    /// Set the quantity of a cart line (0 removes it)
    Set {
        id: String,
        qty: i64,
    },
    /// Remove a line from the cart
    Remove {
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show the cart contents
    Cart,
    /// Price the cart
    Summary {
        /// Apply the membership discount
        #[arg(short, long)]
        member: bool,
        /// Which discount to use when both apply (member or volume)
        #[arg(long = "use", value_name = "DISCOUNT")]
        use_discount: Option<DiscountChoice>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
