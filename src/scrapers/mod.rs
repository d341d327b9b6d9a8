//! Listing page parsers.
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Central Bank of Nigeria circulars | [`cbn`] | HTML table scraping |

pub mod cbn;
