//! # PPD generator toolbox
#![warn(missing_docs)]

pub mod cli;
