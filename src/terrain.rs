//! Audio-reactive terrain height field.

mod field;
mod mesh;

// Re-export public types
pub use field::{FlightInputs, TerrainField};
