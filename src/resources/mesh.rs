use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector2, Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::data_structures::model::{GpuMesh, ModelVertex};

/// Triangle geometry on the CPU side, ready to be uploaded.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn upload(&self, device: &wgpu::Device, name: &str) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        GpuMesh {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: self.indices.len() as u32,
        }
    }
}

/**
 * Flattens all objects of an obj file into one vertex/index list.
 *
 * Material assignments are dropped on purpose: the lighting shader decides the
 * look of every model. Obj files don't come with tangents and bitangents so
 * they are calculated here for normal maps to work. Files exported without
 * normals get averaged face normals.
 */
pub fn obj_geometry(models: &[tobj::Model]) -> MeshData {
    let mut data = MeshData::default();
    for m in models {
        let offset = data.vertices.len() as u32;
        let mesh = &m.mesh;
        data.vertices
            .extend((0..mesh.positions.len() / 3).map(|i| ModelVertex {
                position: [
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                ],
                tex_coords: [
                    mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                    1.0 - mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                ],
                normal: [
                    mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                    mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                    mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                ],
                // calculated below
                tangent: [0.0; 3],
                bitangent: [0.0; 3],
            }));
        data.indices
            .extend(mesh.indices.iter().map(|index| index + offset));
        if mesh.normals.is_empty() {
            compute_normals(&mut data.vertices, &data.indices, offset as usize);
        }
    }
    compute_tangents(&mut data.vertices, &data.indices);
    data
}

fn compute_normals(vertices: &mut [ModelVertex], indices: &[u32], first_vertex: usize) {
    for c in indices.chunks_exact(3) {
        if (c[0] as usize) < first_vertex {
            continue;
        }
        let pos0: Vector3<f32> = vertices[c[0] as usize].position.into();
        let pos1: Vector3<f32> = vertices[c[1] as usize].position.into();
        let pos2: Vector3<f32> = vertices[c[2] as usize].position.into();
        let face = (pos1 - pos0).cross(pos2 - pos0);
        for &i in c {
            let v = &mut vertices[i as usize];
            v.normal = (Vector3::from(v.normal) + face).into();
        }
    }
    for v in &mut vertices[first_vertex..] {
        let n = Vector3::from(v.normal);
        if !n.is_zero() {
            v.normal = n.normalize().into();
        }
    }
}

fn compute_tangents(vertices: &mut [ModelVertex], indices: &[u32]) {
    let mut triangles_included = vec![0u32; vertices.len()];

    // Solve per triangle:
    //     delta_pos1 = delta_uv1.x * T + delta_uv1.y * B
    //     delta_pos2 = delta_uv2.x * T + delta_uv2.y * B
    for c in indices.chunks_exact(3) {
        let v0 = vertices[c[0] as usize];
        let v1 = vertices[c[1] as usize];
        let v2 = vertices[c[2] as usize];

        let pos0: Vector3<f32> = v0.position.into();
        let pos1: Vector3<f32> = v1.position.into();
        let pos2: Vector3<f32> = v2.position.into();

        let uv0: Vector2<f32> = v0.tex_coords.into();
        let uv1: Vector2<f32> = v1.tex_coords.into();
        let uv2: Vector2<f32> = v2.tex_coords.into();

        let delta_pos1 = pos1 - pos0;
        let delta_pos2 = pos2 - pos0;
        let delta_uv1 = uv1 - uv0;
        let delta_uv2 = uv2 - uv0;

        let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
        // untextured or degenerate uv triangle
        if det.abs() < f32::EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
        // flipped for right-handed normal maps in wgpu's texture coordinates
        let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * -r;

        for &i in c {
            let v = &mut vertices[i as usize];
            v.tangent = (tangent + Vector3::from(v.tangent)).into();
            v.bitangent = (bitangent + Vector3::from(v.bitangent)).into();
            triangles_included[i as usize] += 1;
        }
    }

    for (i, n) in triangles_included.into_iter().enumerate() {
        if n == 0 {
            continue;
        }
        let denom = 1.0 / n as f32;
        let v = &mut vertices[i];
        v.tangent = (Vector3::from(v.tangent) * denom).into();
        v.bitangent = (Vector3::from(v.bitangent) * denom).into();
    }
}

/// A UV sphere centred on the origin.
///
/// `resolution` is the number of latitude bands; twice as many longitude
/// segments are used. Pole bands emit one triangle per segment instead of a
/// degenerate quad. Texture v runs from 0 at the north pole to 1 at the south
/// pole.
pub fn uv_sphere(radius: f32, resolution: u32) -> MeshData {
    let stacks = resolution.max(2);
    let slices = stacks * 2;
    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);

    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let theta = v * PI;
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let phi = u * 2.0 * PI;
            let normal = Vector3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
            let tangent = Vector3::new(phi.cos(), 0.0, -phi.sin());
            let bitangent = normal.cross(tangent);
            vertices.push(ModelVertex {
                position: (normal * radius).into(),
                tex_coords: [u, v],
                normal: normal.into(),
                tangent: tangent.into(),
                bitangent: bitangent.into(),
            });
        }
    }

    let idx = |i: u32, j: u32| i * (slices + 1) + j;
    let mut indices = Vec::with_capacity((slices * 6 * (stacks - 1)) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            // a and d meet at the north pole, b and c at the south pole
            if i != stacks - 1 {
                indices.extend([a, b, c]);
            }
            if i != 0 {
                indices.extend([a, c, d]);
            }
        }
    }
    MeshData { vertices, indices }
}
