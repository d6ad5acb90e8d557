//! Pokepedia: browse a Pokemon's abilities, moves, stats and types, and
//! resolve each reference into its labelled details.

pub mod action;
pub mod client;
pub mod components;
pub mod decode;
pub mod detail;
pub mod effect;
pub mod extract;
pub mod pipeline;
pub mod pokemon;
pub mod reducer;
pub mod resources;
pub mod state;
