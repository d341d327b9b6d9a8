//! Output writers.
//!
//! - [`json`]: writes the record list of a run to a single JSON file
//!
//! ```text
//! ./
//! ├── cbn_circulars.json     # records of the last run
//! └── downloaded_pdfs/       # `download` only
//!     ├── Circular_One.pdf
//!     └── Circular_Two.pdf
//! ```

pub mod json;
