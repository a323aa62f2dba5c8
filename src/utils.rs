use bytemuck::NoUninit;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Create a wire plane on y=0, centered at the origin, as a line-list mesh.
pub fn create_grid_mesh(size: f32, subdivisions: u32) -> Mesh {
    let half = size / 2.0;
    let step = size / subdivisions as f32;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=subdivisions {
        let offset = -half + i as f32 * step;

        // Line along z at x = offset
        let base = vertices.len() as u32;
        vertices.push(Vertex { pos: [offset, 0.0, -half], normal: [0.0, 1.0, 0.0] });
        vertices.push(Vertex { pos: [offset, 0.0, half], normal: [0.0, 1.0, 0.0] });
        indices.extend_from_slice(&[base, base + 1]);

        // Line along x at z = offset
        let base = vertices.len() as u32;
        vertices.push(Vertex { pos: [-half, 0.0, offset], normal: [0.0, 1.0, 0.0] });
        vertices.push(Vertex { pos: [half, 0.0, offset], normal: [0.0, 1.0, 0.0] });
        indices.extend_from_slice(&[base, base + 1]);
    }

    Mesh { vertices, indices }
}

/// Create a UV sphere centered at the origin.
pub fn create_sphere_mesh(radius: f32, rings: u32, segments: u32) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(Vertex {
                pos: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_mesh_has_expected_line_count() {
        let mesh = create_grid_mesh(10.0, 10);
        // 11 lines per direction, 2 vertices each.
        assert_eq!(mesh.vertices.len(), 2 * 2 * 11);
        assert_eq!(mesh.indices.len(), 2 * 2 * 11);
        for v in &mesh.vertices {
            assert_eq!(v.pos[1], 0.0);
            assert!(v.pos[0].abs() <= 5.0 && v.pos[2].abs() <= 5.0);
        }
    }

    #[test]
    fn sphere_mesh_vertices_lie_on_sphere() {
        let radius = 0.03;
        let mesh = create_sphere_mesh(radius, 8, 16);
        for v in &mesh.vertices {
            let len = (v.pos[0].powi(2) + v.pos[1].powi(2) + v.pos[2].powi(2)).sqrt();
            assert!((len - radius).abs() < 1e-5);
        }
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.vertices.len());
        }
        assert_eq!(mesh.indices.len() % 3, 0);
    }
}
