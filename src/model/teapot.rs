//! Procedural teapot mesh: a body of revolution generated once at startup.

use crate::utils::{Mesh, Vertex};

/// Teapot body profile: (radius, y) pairs from bottom cap to top cap.
/// First and last entries have radius 0 (cap vertices on the axis).
const PROFILE: [(f32, f32); 11] = [
    (0.00, 0.00), // bottom center (cap)
    (0.50, 0.00), // bottom rim
    (0.80, 0.15), // lower belly
    (0.95, 0.40), // widest lower
    (0.95, 0.60), // widest upper
    (0.80, 0.80), // upper belly
    (0.55, 1.00), // shoulder
    (0.40, 1.10), // neck
    (0.45, 1.15), // rim lip
    (0.50, 1.20), // rim top
    (0.00, 1.20), // top center (cap)
];

/// Generate the teapot mesh by revolving the body profile around the Y axis
/// with the given number of segments. Normals come from the profile tangent,
/// so shading is smooth around the body.
pub fn generate(segments: usize) -> Mesh {
    assert!(segments >= 3);

    let num_profile = PROFILE.len();
    let num_rings = num_profile - 2;

    let angles: Vec<(f32, f32)> = (0..segments)
        .map(|s| (s as f32 * std::f32::consts::TAU / segments as f32).sin_cos())
        .collect();

    let mut vertices = Vec::with_capacity(num_rings * segments + 2);
    let mut indices = Vec::new();

    // Bottom cap vertex
    let bottom_idx = vertices.len() as u32;
    vertices.push(Vertex {
        pos: [0.0, PROFILE[0].1, 0.0],
        normal: [0.0, -1.0, 0.0],
    });

    // Body ring vertices
    let ring_base = vertices.len() as u32;
    for p in 1..num_profile - 1 {
        let (r, y) = PROFILE[p];

        // Profile tangent, rotated 90 degrees for the outward normal
        let (prev_r, prev_y) = PROFILE[p - 1];
        let (next_r, next_y) = PROFILE[p + 1];
        let tr = next_r - prev_r;
        let ty = next_y - prev_y;
        let len = (ty * ty + tr * tr).sqrt();
        let (nr, ny) = if len > 1e-6 {
            (ty / len, -tr / len)
        } else {
            (1.0, 0.0)
        };

        for &(sin_a, cos_a) in &angles {
            vertices.push(Vertex {
                pos: [r * cos_a, y, r * sin_a],
                normal: [nr * cos_a, ny, nr * sin_a],
            });
        }
    }

    // Top cap vertex
    let top_idx = vertices.len() as u32;
    vertices.push(Vertex {
        pos: [0.0, PROFILE[num_profile - 1].1, 0.0],
        normal: [0.0, 1.0, 0.0],
    });

    let seg = segments as u32;

    // Bottom cap fan
    for s in 0..seg {
        let next_s = (s + 1) % seg;
        indices.extend_from_slice(&[bottom_idx, ring_base + s, ring_base + next_s]);
    }

    // Quad strips between adjacent rings, wound counterclockwise from outside
    for ring in 0..(num_rings as u32) - 1 {
        let base_curr = ring_base + ring * seg;
        let base_next = ring_base + (ring + 1) * seg;
        for s in 0..seg {
            let next_s = (s + 1) % seg;
            let a = base_curr + s;
            let b = base_curr + next_s;
            let c = base_next + next_s;
            let d = base_next + s;
            indices.extend_from_slice(&[a, d, c, a, c, b]);
        }
    }

    // Top cap fan
    let last_ring_base = ring_base + (num_rings as u32 - 1) * seg;
    for s in 0..seg {
        let next_s = (s + 1) % seg;
        indices.extend_from_slice(&[last_ring_base + next_s, last_ring_base + s, top_idx]);
    }

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_counts_match_profile() {
        let segments = 16;
        let mesh = generate(segments);
        let rings = PROFILE.len() - 2;
        assert_eq!(mesh.vertices.len(), rings * segments + 2);
        // Two cap fans plus two triangles per body quad.
        let triangles = 2 * segments + (rings - 1) * segments * 2;
        assert_eq!(mesh.indices.len(), triangles * 3);
    }

    #[test]
    fn indices_are_in_range() {
        let mesh = generate(20);
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.vertices.len());
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh = generate(16);
        for v in &mesh.vertices {
            let len = (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    #[test]
    fn body_sits_on_ground_plane() {
        let mesh = generate(16);
        for v in &mesh.vertices {
            assert!(v.pos[1] >= 0.0 && v.pos[1] <= 1.2001);
        }
    }
}
