//! Static content: colors, spawn tables, entity templates.

pub mod colors;
pub mod tables;
pub mod templates;
