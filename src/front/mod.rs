//! Front-line model: territory control by comparative flood fill
//!
//! Each capital floods the map breadth-first; a tile belongs to whichever
//! capital reaches it in fewer hops. The front line itself is derived
//! from ownership changes between adjacent tiles and is purely cosmetic -
//! encirclement and capture logic read tile ownership directly.

pub mod control;

pub use control::{Owner, TerritoryMap};
