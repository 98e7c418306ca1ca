//! Voronoi diagrams of point sets via Fortune's sweep line.
//!
//! The public surface is [`FortuneVoronoiBuilder`]; the beach line, event
//! queue and segment arena are internal to one sweep.

mod beach;
mod builder;
mod circle;
mod events;
mod segments;

pub use builder::{voronoi_segments, FortuneVoronoiBuilder, VoronoiConfig};
