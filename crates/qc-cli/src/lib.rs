//! CLI library components for garment measurement QC.

#![allow(missing_docs)]

pub mod export;
pub mod logging;
pub mod run;
pub mod summary;
