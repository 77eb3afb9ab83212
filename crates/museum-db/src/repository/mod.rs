//! # Repository Module
//!
//! Storage repositories for the museum shop.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartRepository            ChoiceRepository                            │
//! │  ├── read / write          ├── get / set / clear                       │
//! │  ├── add / set_quantity    │                                            │
//! │  └── remove / clear        │                                            │
//! │        │                          │                                     │
//! │        │  local/museumCartV1      │  session/museumCartChoice          │
//! │        ▼                          ▼                                     │
//! │  StorageRepository (get_item / set_item / remove_item / clear_area)    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  web_storage table                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StorageRepository`](storage::StorageRepository) - Raw key-value areas
//! - [`CartRepository`](cart::CartRepository) - The cart blob
//! - [`ChoiceRepository`](choice::ChoiceRepository) - The discount choice

pub mod cart;
pub mod choice;
pub mod storage;
