//! Munsell Pages
//!
//! Canonicalizes tabulated Munsell color chips and lays them out as hue
//! page images. This library exposes modules for the CLI and integration
//! testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
pub mod table;
