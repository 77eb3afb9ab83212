//! # Commands
//!
//! One function per subcommand. Each takes what it needs (the database,
//! the calculator) and returns a response type the renderer prints.
//!
//! - [`catalog`] - Browse souvenirs
//! - [`cart`] - Add / set / remove / clear / show
//! - [`checkout`] - Price the cart and settle the discount choice

pub mod cart;
pub mod catalog;
pub mod checkout;
