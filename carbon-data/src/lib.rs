//! Embedded carbon-footprint data for product lookups.
//!
//! This crate holds the emission-factor table (kg CO2e per product unit)
//! and a fuzzy matcher that resolves free-text product names against it.
//!
//! Data source: Carbon Catalogue product extract, curated per category.
//!
//! # Example
//!
//! ```
//! use carbon_data::search;
//!
//! let result = search("Beef");
//! assert!(result.found);
//! assert_eq!(result.product, "beef");
//! assert!(!result.is_eco_friendly);
//! ```

mod lookup;

pub use lookup::{get, search, EmissionRecord, LookupResult, ECO_FRIENDLY_THRESHOLD};
