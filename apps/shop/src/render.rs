//! # Terminal Rendering
//!
//! Plain-text tables for command responses. Every function returns the
//! text so it can be tested; `lib::run` prints it.

use std::fmt::Write;

use museum_core::format::{format_money, SummaryLines};

use crate::commands::cart::CartResponse;
use crate::commands::catalog::CatalogEntry;

const LABEL_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 12;

pub fn catalog_table(entries: &[CatalogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:>10}  {}",
            entry.id, entry.name, entry.price, entry.collection
        );
    }
    out
}

pub fn cart_table(cart: &CartResponse) -> String {
    if cart.items.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for line in &cart.items {
        let total = line.line_total.map_or_else(|| "-".to_string(), format_money);
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:>4} × {:>10} = {:>10}",
            line.id,
            line.name,
            line.quantity,
            format_money(line.unit_price),
            total
        );
    }
    let _ = writeln!(out, "Cart {}", cart.count);
    out
}

pub fn summary_table(lines: &SummaryLines) -> String {
    let rows = [
        ("Item total", &lines.item_total),
        ("Volume discount", &lines.volume_discount),
        ("Member discount", &lines.member_discount),
        ("Shipping", &lines.shipping),
        ("Subtotal (taxable)", &lines.taxable),
        ("Tax rate", &lines.tax_rate),
        ("Tax", &lines.tax),
        ("Invoice total", &lines.total),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(
            out,
            "{:<label$}{:>amount$}",
            label,
            value,
            label = LABEL_WIDTH,
            amount = AMOUNT_WIDTH
        );
    }
    if !lines.note.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", lines.note);
    }
    out
}
