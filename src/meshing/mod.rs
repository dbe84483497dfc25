mod terrain;

pub use terrain::{build_terrain_mesh, elevation_color};

use bevy::{
    prelude::*,
    render::render_resource::PrimitiveTopology,
};

/// Per-vertex data for a non-indexed triangle list. Positions are duplicated
/// per triangle; colors and normals run in lockstep with them.
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    pub normals: Vec<Vec3>,
}

impl MeshData {
    /// Builds from positions and colors, deriving one flat normal per
    /// triangle and assigning it to all three vertices.
    pub fn with_flat_normals(positions: Vec<Vec3>, colors: Vec<Vec4>) -> Self {
        let normals = flat_normals(&positions);
        Self {
            positions,
            colors,
            normals,
        }
    }

    pub fn into_render_mesh(self) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);

        mesh
    }
}

/// Unit normal per group of three consecutive positions, repeated three
/// times so the whole triangle shades flat.
fn flat_normals(positions: &[Vec3]) -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(positions.len());

    for tri in positions.chunks_exact(3) {
        let v = tri[1] - tri[0];
        let w = tri[2] - tri[0];
        let n = v.cross(w).normalize();

        normals.extend([n, n, n]);
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_normals_repeat_per_triangle() {
        let positions = vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 2.0),
        ];

        let normals = flat_normals(&positions);

        assert_eq!(normals.len(), 6);
        assert_eq!(normals[0], Vec3::Z);
        assert_eq!(normals[0], normals[1]);
        assert_eq!(normals[0], normals[2]);
        assert_eq!(normals[3], normals[4]);
        assert_eq!(normals[3], normals[5]);
        assert!((normals[3].length() - 1.0).abs() < 1e-6);
    }
}
