use std::fs;
use std::path::Path;

use bevy::prelude::{Resource, Vec3};
use ndarray::Array2;
use thiserror::Error;

/// Grid columns/rows per world unit.
pub const SCALE_XY: f32 = 150.0;
/// Divisor mapping a raw elevation sample to world-space height.
pub const SCALE_Z: f32 = 1500.0;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("failed to read elevation file: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing or non-positive grid dimensions")]
    MalformedHeader,
    #[error("grid declares {expected} samples but only {found} are present")]
    Truncated { expected: usize, found: usize },
    #[error("sample {index} is not an integer: {token:?}")]
    InvalidSample { index: usize, token: String },
}

/// Raw integer elevation samples in row-major order, immutable after load.
///
/// Grid node `(row, col)` sits at world point
/// `(col / SCALE_XY, row / SCALE_XY, elevation / SCALE_Z)`.
#[derive(Resource)]
pub struct ElevationGrid {
    samples: Array2<i32>,
}

impl ElevationGrid {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GridError> {
        Self::from_text(&fs::read_to_string(path)?)
    }

    /// Parses `width height` followed by `width * height` whitespace-separated
    /// integer samples.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let mut tokens = text.split_whitespace();
        let width = parse_dimension(tokens.next())?;
        let height = parse_dimension(tokens.next())?;

        let expected = width * height;
        let mut samples = Vec::with_capacity(expected);
        for (index, token) in tokens.take(expected).enumerate() {
            let elev = token.parse::<i32>().map_err(|_| GridError::InvalidSample {
                index,
                token: token.to_owned(),
            })?;
            samples.push(elev);
        }
        if samples.len() < expected {
            return Err(GridError::Truncated {
                expected,
                found: samples.len(),
            });
        }

        let samples = Array2::from_shape_vec((height, width), samples)
            .map_err(|_| GridError::Truncated { expected, found: 0 })?;
        Ok(Self { samples })
    }

    pub fn width(&self) -> usize {
        self.samples.dim().1
    }

    pub fn height(&self) -> usize {
        self.samples.dim().0
    }

    /// Raw elevation sample at a grid node.
    pub fn elevation(&self, row: usize, col: usize) -> i32 {
        self.samples[[row, col]]
    }

    /// World-space position of a grid node.
    pub fn world_point(&self, row: usize, col: usize) -> Vec3 {
        Vec3::new(
            col as f32 / SCALE_XY,
            row as f32 / SCALE_XY,
            self.samples[[row, col]] as f32 / SCALE_Z,
        )
    }

    /// World-space surface height directly beneath an `(x, y)` footprint, or
    /// `None` when the footprint falls outside the grid.
    pub fn surface_height(&self, x: f32, y: f32) -> Option<f32> {
        let row = (y * SCALE_XY).floor();
        let col = (x * SCALE_XY).floor();
        if row < 0.0 || col < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height() || col >= self.width() {
            return None;
        }
        Some(self.samples[[row, col]] as f32 / SCALE_Z)
    }
}

fn parse_dimension(token: Option<&str>) -> Result<usize, GridError> {
    token
        .and_then(|t| t.parse::<i64>().ok())
        .filter(|d| *d > 0)
        .map(|d| d as usize)
        .ok_or(GridError::MalformedHeader)
}
