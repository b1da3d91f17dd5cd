//! # Binomial Lattice Option Pricing
//!
//! `lattice-rs` prices European and American options on a recombining
//! binomial lattice and renders the resulting price and value trees as
//! layered graphs.
//!
//! ## Modules
//!
//! | Module            | Description                                                                 |
//! |-------------------|-----------------------------------------------------------------------------|
//! | [`lattice`]       | Triangular per-node tables over a dense grid, the storage behind each tree. |
//! | [`pricing`]       | Option vocabulary and the binomial backward-induction pricer.               |
//! | [`traits`]        | Contracts between pricers and their consumers.                              |
//! | [`visualization`] | Tree-graph construction and plotly rendering of priced lattices.            |
//!
//! ## Example Usage
//!
//! ```rust
//! use lattice_rs::pricing::OptionStyle;
//! use lattice_rs::pricing::OptionType;
//! use lattice_rs::pricing::binomial::BinomialTreePricer;
//!
//! let pricer = BinomialTreePricer::new(
//!   50.0,
//!   52.0,
//!   0.05,
//!   Some(0.0),
//!   1.2,
//!   0.8,
//!   2,
//!   Some(2.0),
//!   None,
//!   None,
//!   OptionType::Put,
//!   OptionStyle::American,
//! );
//! let result = pricer.price_tree();
//! println!("root value: {}", result.value);
//! ```

pub mod lattice;
pub mod pricing;
pub mod traits;
pub mod visualization;

pub use crate::traits::PricerExt;
pub use crate::traits::TimeExt;
