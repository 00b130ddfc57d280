//! Serializer for the PPD (PostScript Printer Description) file grammar.

pub mod out;

pub use out::{PpdError, PpdWriter};
