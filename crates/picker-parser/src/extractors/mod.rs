//! Per-language outline builders.

pub mod python;
