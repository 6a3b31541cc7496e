//! glTF model loading and the GPU-side drawable.
//!
//! A model is flattened into one vertex and one index buffer; every glTF
//! primitive becomes a sub-mesh drawn with its own `draw_indexed` call. Node
//! transforms are baked into positions and normals, and the material base
//! colour is baked into a per-vertex colour.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};
use scene_core::SetupError;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];
    const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Same stride, position only: the depth pass ignores the rest.
    pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::POSITION_ATTRIBUTES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubMesh {
    pub first_index: u32,
    pub index_count: u32,
    pub base_vertex: i32,
}

#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub submeshes: Vec<SubMesh>,
}

pub fn load_model(path: impl AsRef<Path>) -> Result<ModelData, SetupError> {
    let path = path.as_ref();
    let model_err = |reason: String| SetupError::Model {
        path: path.display().to_string(),
        reason,
    };
    let (document, buffers, _images) = gltf::import(path).map_err(|e| model_err(e.to_string()))?;
    let model = build_model(&document, &buffers).map_err(model_err)?;
    log::info!(
        "loaded {}: {} sub-meshes, {} vertices, {} triangles",
        path.display(),
        model.submeshes.len(),
        model.vertices.len(),
        model.indices.len() / 3
    );
    Ok(model)
}

/// Load a self-contained glTF (embedded or data-URI buffers).
pub fn load_model_from_slice(bytes: &[u8]) -> Result<ModelData, SetupError> {
    let model_err = |reason: String| SetupError::Model {
        path: "<memory>".to_string(),
        reason,
    };
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| model_err(e.to_string()))?;
    build_model(&document, &buffers).map_err(model_err)
}

fn build_model(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<ModelData, String> {
    let mut model = ModelData::default();
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| "document has no scenes".to_string())?;
    for node in scene.nodes() {
        append_node(&node, Mat4::IDENTITY, buffers, &mut model)?;
    }
    if model.submeshes.is_empty() {
        return Err("no triangle meshes found".to_string());
    }
    Ok(model)
}

fn append_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    model: &mut ModelData,
) -> Result<(), String> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "skipping non-triangle primitive in mesh '{}'",
                    mesh.name().unwrap_or("unnamed")
                );
                continue;
            }
            append_primitive(&primitive, world, buffers, model)?;
        }
    }
    for child in node.children() {
        append_node(&child, world, buffers, model)?;
    }
    Ok(())
}

fn append_primitive(
    primitive: &gltf::Primitive,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    model: &mut ModelData,
) -> Result<(), String> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| "primitive has no positions".to_string())?
        .map(Vec3::from_array)
        .collect();
    let mut indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(iter) => iter.map(Vec3::from_array).collect(),
        None => smooth_normals(&positions, &indices),
    };
    let vertex_colors: Option<Vec<Vec3>> = reader
        .read_colors(0)
        .map(|c| c.into_rgb_f32().map(Vec3::from_array).collect());

    let base = primitive.material().pbr_metallic_roughness().base_color_factor();
    let base_color = Vec3::new(base[0], base[1], base[2]);
    let normal_to_world = Mat3::from_mat4(world).inverse().transpose();
    // A mirroring transform turns counter-clockwise faces clockwise.
    if world.determinant() < 0.0 {
        for tri in indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    let base_vertex = i32::try_from(model.vertices.len()).map_err(|e| e.to_string())?;
    let first_index = u32::try_from(model.indices.len()).map_err(|e| e.to_string())?;
    for (i, p) in positions.iter().enumerate() {
        let n = normals.get(i).copied().unwrap_or(Vec3::Y);
        let tint = vertex_colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or(Vec3::ONE);
        model.vertices.push(Vertex {
            position: world.transform_point3(*p).to_array(),
            normal: (normal_to_world * n).normalize_or_zero().to_array(),
            color: (base_color * tint).to_array(),
        });
    }
    model.indices.extend_from_slice(&indices);
    model.submeshes.push(SubMesh {
        first_index,
        index_count: indices.len() as u32,
        base_vertex,
    });
    Ok(())
}

/// Area-weighted vertex normals for meshes exported without them.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}

/// A loaded model resident on the GPU.
pub struct Drawable {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    submeshes: Vec<SubMesh>,
}

impl Drawable {
    pub fn upload(device: &wgpu::Device, label: &str, model: &ModelData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vb")),
            contents: bytemuck::cast_slice(&model.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_ib")),
            contents: bytemuck::cast_slice(&model.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            submeshes: model.submeshes.clone(),
        }
    }

    /// Issue one indexed draw per sub-mesh with whatever pipeline is bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for sub in &self.submeshes {
            pass.draw_indexed(
                sub.first_index..sub.first_index + sub.index_count,
                sub.base_vertex,
                0..1,
            );
        }
    }
}
