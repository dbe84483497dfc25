pub mod grid;
pub mod meshing;
pub mod nav;
pub mod sky;

pub use grid::ElevationGrid;
