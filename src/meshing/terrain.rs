use bevy::prelude::{Vec3, Vec4};

use super::MeshData;
use crate::grid::ElevationGrid;

pub const WATER: Vec4 = Vec4::new(0.0, 0.0, 207.0 / 255.0, 0.5);
pub const SAND: Vec4 = Vec4::new(210.0 / 255.0, 180.0 / 255.0, 140.0 / 255.0, 1.0);
pub const VEGETATION: Vec4 = Vec4::new(6.0 / 255.0, 112.0 / 255.0, 2.0 / 255.0, 1.0);
pub const MOUNTAIN: Vec4 = Vec4::new(98.0 / 255.0, 66.0 / 255.0, 1.0 / 255.0, 1.0);
pub const SNOW: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// Elevation band for a raw sample. Bands are half-open: the upper bound of
/// each is the lower bound of the next.
pub fn elevation_color(elev: i32) -> Vec4 {
    if elev < 1 {
        WATER
    } else if elev < 5 {
        SAND
    } else if elev < 200 {
        VEGETATION
    } else if elev < 600 {
        MOUNTAIN
    } else {
        SNOW
    }
}

/// Triangulates the grid, two triangles per cell, with a color per vertex
/// taken from that vertex's own elevation band. No index buffer; every
/// triangle carries its three corner positions.
pub fn build_terrain_mesh(grid: &ElevationGrid) -> MeshData {
    let cells = (grid.width() - 1) * (grid.height() - 1);
    let mut positions = Vec::with_capacity(cells * 6);
    let mut colors = Vec::with_capacity(cells * 6);

    for row in 0..grid.height() - 1 {
        for col in 0..grid.width() - 1 {
            let corners = [
                (row, col),
                (row, col + 1),
                (row + 1, col),
                (row + 1, col),
                (row, col + 1),
                (row + 1, col + 1),
            ];

            for (r, c) in corners {
                positions.push(grid.world_point(r, c));
                colors.push(elevation_color(grid.elevation(r, c)));
            }
        }
    }

    MeshData::with_flat_normals(positions, colors)
}
