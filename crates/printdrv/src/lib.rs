#![warn(missing_docs)]
//! # Printer driver registry
//!
//! This crate models the capability set of a fixed collection of raster
//! printer drivers: which page sizes, resolutions, media types and ink
//! options each device supports, and the geometry (imageable area, custom
//! size limits) that follows from a page-size selection.
//!
//! All capability data lives in constant tables; queries allocate fresh
//! [`params::Param`] lists so callers own what they iterate.

pub mod papers;
pub mod params;
pub mod printers;
pub mod vars;

pub use papers::{papersize_by_name, PaperSize};
pub use params::{Param, ParamClass};
pub use printers::{
    find_printer, known_printers, printer_by_driver, printer_by_long_name, Printer, UnknownDriver,
};
pub use vars::{default_settings, maximum_settings, minimum_settings, OutputType, Vars};
