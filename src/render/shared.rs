use std::f32::consts::PI;

/// Unlit shader: each sphere is filled with its flat color.
pub(crate) const SHADER: &str = r#"
struct GlobalUniform {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
}

struct ObjectConstants {
    model: mat4x4<f32>,
    color: vec4<f32>,
}

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> globals: GlobalUniform;

@group(1) @binding(0)
var<uniform> object: ObjectConstants;

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    let world_pos = object.model * vec4<f32>(input.position, 1.0);
    output.position = globals.view_proj * world_pos;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return object.color;
}
"#;

/// Interleaved position/normal vertices with triangle indices.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub const FLOATS_PER_VERTEX: usize = 6;

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::FLOATS_PER_VERTEX
    }
}

/// Unit UV sphere centered at the origin with `segments` rings and slices.
pub fn generate_sphere(segments: u32) -> SphereMesh {
    let slices = segments.max(3);
    let rings = segments.max(2);
    let mut mesh = SphereMesh::default();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for slice in 0..=slices {
            let phi = slice as f32 * 2.0 * PI / slices as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let point = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            // Position and normal coincide on a unit sphere.
            mesh.vertices.extend_from_slice(&point);
            mesh.vertices.extend_from_slice(&point);
        }
    }

    for ring in 0..rings {
        for slice in 0..slices {
            let first = ring * (slices + 1) + slice;
            let second = first + slices + 1;
            mesh.indices
                .extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = generate_sphere(32);
        assert_eq!(mesh.vertex_count(), 33 * 33);
        assert_eq!(mesh.indices.len(), 32 * 32 * 6);
        for vertex in mesh.vertices.chunks(SphereMesh::FLOATS_PER_VERTEX) {
            let length = (vertex[0] * vertex[0] + vertex[1] * vertex[1] + vertex[2] * vertex[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-5);
        }
        let max_index = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max_index < mesh.vertex_count());
    }

    #[test]
    fn tiny_segment_counts_are_raised() {
        let mesh = generate_sphere(0);
        assert_eq!(mesh.vertex_count(), 3 * 4);
    }
}
