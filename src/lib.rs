//! Interactive trade-export globe.
//!
//! The core is pure: [`trade::Aggregator`] turns records into arcs and a
//! category tree, [`flow::layout`] places the flow diagram, and
//! [`scene::render`] composes everything into draw commands for one camera
//! state. [`interaction::InteractionRouter`] owns the camera and maps pointer
//! input to redraws. The [`braille`] module paints frames for the terminal host.

pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod flow;
pub mod geo;
pub mod interaction;
pub mod map;
pub mod scene;
pub mod trade;

pub use error::{GlobeError, Result};
