//! # museum-db: Storage Layer for the Museum Shop
//!
//! The storefront keeps its state in two browser stores: the cart blob in
//! `localStorage` and the shopper's member/volume answer in
//! `sessionStorage`. This crate provides the same two areas on SQLite.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Museum Shop Data Flow                              │
//! │                                                                         │
//! │  museum-shop command (add / summary)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     museum-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ StorageRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CartRepo      │    │ 001_web_     │  │   │
//! │  │   │               │    │ ChoiceRepo    │    │   storage    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   web_storage(area, key, value, updated_at)                     │   │
//! │  │   local   / museumCartV1     → cart blob (JSON array)           │   │
//! │  │   session / museumCartChoice → "member" | "volume"              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Storage areas, cart and discount choice
//!
//! ## Usage
//!
//! ```rust,ignore
//! use museum_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("museum.db")).await?;
//!
//! let cart = db.carts().read().await?;
//! let choice = db.choices().get().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, StorageLocation};

pub use repository::cart::CartRepository;
pub use repository::choice::ChoiceRepository;
pub use repository::storage::{StorageArea, StorageEntry, StorageRepository};

// =============================================================================
// Storage Keys
// =============================================================================

/// Local-area key holding the cart blob.
pub const CART_STORAGE_KEY: &str = "museumCartV1";

/// Session-area key holding the shopper's member/volume answer.
pub const CHOICE_STORAGE_KEY: &str = "museumCartChoice";
