use bevy::prelude::*;
use rand::Rng;

use crate::grid::SCALE_XY;
use crate::meshing::MeshData;

/// Radians the ornament spins per tick.
pub const ORNAMENT_SPIN_STEP: f32 = 0.01;
/// Radians the sun orbits per tick.
pub const SUN_STEP: f32 = 0.001;

/// Daytime sky, also the clear color at startup.
pub const DAY_SKY: Color = Color::rgb(38.0 / 255.0, 194.0 / 255.0, 242.0 / 255.0);

/// Spin angle of the decorative diamond; the rotation matrix is rebuilt from
/// it at render time and never accumulated.
#[derive(Component, Default)]
pub struct OrnamentSpin {
    pub angle: f32,
}

/// The orbiting light. Its position compounds a small X-axis rotation every
/// tick and is never reset.
#[derive(Resource)]
pub struct Sun {
    pub position: Vec3,
}

impl Sun {
    /// Starts the sun over the middle of the terrain's width.
    pub fn new(grid_width: usize) -> Self {
        Self {
            position: Vec3::new(grid_width as f32 / (2.0 * SCALE_XY), -12.0, 0.0),
        }
    }

    /// One orbit tick.
    pub fn advance(&mut self) {
        self.position = Quat::from_rotation_x(SUN_STEP) * self.position;
    }
}

/// Sky color for the sun's current height: a step function sweeping day
/// through dusk into night as the sun sinks.
pub fn sky_color(sun_z: f32) -> Color {
    if sun_z < -7.5 {
        Color::rgb(0.0, 24.0 / 255.0, 72.0 / 255.0)
    } else if sun_z < -7.1 {
        Color::rgb(48.0 / 255.0, 24.0 / 255.0, 96.0 / 255.0)
    } else if sun_z < -6.7 {
        Color::rgb(72.0 / 255.0, 48.0 / 255.0, 120.0 / 255.0)
    } else if sun_z < -6.3 {
        Color::rgb(96.0 / 255.0, 72.0 / 255.0, 120.0 / 255.0)
    } else if sun_z < -6.0 {
        Color::rgb(144.0 / 255.0, 96.0 / 255.0, 144.0 / 255.0)
    } else if sun_z < -5.6 {
        Color::rgb(164.0 / 255.0, 53.0 / 255.0, 186.0 / 255.0)
    } else if sun_z < -5.3 {
        Color::rgb(186.0 / 255.0, 53.0 / 255.0, 133.0 / 255.0)
    } else if sun_z < -5.0 {
        Color::rgb(237.0 / 255.0, 130.0 / 255.0, 98.0 / 255.0)
    } else {
        DAY_SKY
    }
}

/// Vertex data for the diamond: two four-sided pyramids joined base-to-base,
/// floating a world unit up, with a random color per vertex.
pub fn ornament_vertices(rng: &mut impl Rng) -> (Vec<Vec3>, Vec<Vec4>) {
    let rim = [
        Vec3::new(0.0, -0.025, 1.025),
        Vec3::new(0.0, 0.025, 1.025),
        Vec3::new(0.0, 0.025, 0.975),
        Vec3::new(0.0, -0.025, 0.975),
    ];
    let front = Vec3::new(0.075, 0.0, 1.0);
    let back = Vec3::new(-0.075, 0.0, 1.0);

    let mut positions = Vec::with_capacity(24);
    for i in 0..4 {
        positions.extend([rim[i], front, rim[(i + 1) % 4]]);
    }
    for i in 0..4 {
        positions.extend([rim[i], rim[(i + 1) % 4], back]);
    }

    let colors = (0..positions.len())
        .map(|_| {
            Vec4::new(
                rng.gen_range(0..256) as f32 / 255.0,
                rng.gen_range(0..256) as f32 / 255.0,
                rng.gen_range(0..256) as f32 / 255.0,
                1.0,
            )
        })
        .collect();

    (positions, colors)
}

pub fn build_ornament_mesh(rng: &mut impl Rng) -> Mesh {
    let (positions, colors) = ornament_vertices(rng);
    MeshData::with_flat_normals(positions, colors).into_render_mesh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn ornament_has_eight_triangles_of_distinct_corners() {
        let mut rng = StepRng::new(7, 131);
        let (positions, colors) = ornament_vertices(&mut rng);

        assert_eq!(positions.len(), 24);
        assert_eq!(colors.len(), 24);

        for tri in positions.chunks_exact(3) {
            assert!(tri[0] != tri[1]);
            assert!(tri[1] != tri[2]);
            assert!(tri[0] != tri[2]);
        }
        for c in &colors {
            assert!((0.0..=1.0).contains(&c.x));
            assert_eq!(c.w, 1.0);
        }
    }

    #[test]
    fn sun_orbit_preserves_distance_from_the_x_axis() {
        let mut sun = Sun::new(512);
        assert!((sun.position.x - 512.0 / (2.0 * SCALE_XY)).abs() < 1e-6);

        let radius = (sun.position.y * sun.position.y + sun.position.z * sun.position.z).sqrt();
        for _ in 0..1000 {
            sun.advance();
        }
        let after = (sun.position.y * sun.position.y + sun.position.z * sun.position.z).sqrt();

        assert!((radius - after).abs() < 1e-3);
        assert!((sun.position.x - 512.0 / (2.0 * SCALE_XY)).abs() < 1e-5);
    }

    #[test]
    fn sky_bands_appear_in_order_as_the_sun_sinks() {
        let expected = [
            DAY_SKY,
            Color::rgb(237.0 / 255.0, 130.0 / 255.0, 98.0 / 255.0),
            Color::rgb(186.0 / 255.0, 53.0 / 255.0, 133.0 / 255.0),
            Color::rgb(164.0 / 255.0, 53.0 / 255.0, 186.0 / 255.0),
            Color::rgb(144.0 / 255.0, 96.0 / 255.0, 144.0 / 255.0),
            Color::rgb(96.0 / 255.0, 72.0 / 255.0, 120.0 / 255.0),
            Color::rgb(72.0 / 255.0, 48.0 / 255.0, 120.0 / 255.0),
            Color::rgb(48.0 / 255.0, 24.0 / 255.0, 96.0 / 255.0),
            Color::rgb(0.0, 24.0 / 255.0, 72.0 / 255.0),
        ];

        let mut seen = Vec::new();
        let mut z = -4.0;
        while z > -8.0 {
            let color = sky_color(z);
            if seen.last() != Some(&color) {
                seen.push(color);
            }
            z -= 0.01;
        }

        assert_eq!(seen, expected);
    }

    #[test]
    fn sky_color_is_deterministic_at_band_boundaries() {
        assert_eq!(sky_color(-5.0), DAY_SKY);
        assert_eq!(sky_color(-4.999), DAY_SKY);
        assert_ne!(sky_color(-5.001), DAY_SKY);
        assert_eq!(sky_color(-7.501), Color::rgb(0.0, 24.0 / 255.0, 72.0 / 255.0));
    }
}
