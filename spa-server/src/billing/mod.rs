//! Billing derivation
//!
//! Invoices are a projection of appointment price snapshots. The pricing
//! functions are pure; the materializer talks to a [`BillingStore`].

pub mod materializer;
pub mod money;
pub mod pricing;

pub use materializer::{
    BillingRecompute, BillingStore, create_for_appointment, delete_for_appointment,
    regenerate_for_appointment,
};
pub use pricing::{InvoiceTotals, aggregate_subtotal, build_line_items, compute_totals};
