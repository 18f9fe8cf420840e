use std::path::PathBuf;
use crate::geometry::mesh_data::{Drawcall, MaterialDesc, MeshData};
use crate::geometry::vertex::Vertex;

/// Unit quad in the XY plane, facing +Z, centred on the origin
pub fn quad(diffuse_texture: Option<PathBuf>) -> MeshData
{
    let normal = [0.0, 0.0, 1.0];

    let vertices = vec!
    [
        Vertex::with_normal([-0.5, -0.5, 0.0], normal, [0.0, 0.0]),
        Vertex::with_normal([0.5, -0.5, 0.0], normal, [1.0, 0.0]),
        Vertex::with_normal([0.5, 0.5, 0.0], normal, [1.0, 1.0]),
        Vertex::with_normal([-0.5, 0.5, 0.0], normal, [0.0, 1.0]),
    ];

    single_material_mesh(vertices, vec![[0, 1, 2], [0, 2, 3]], "quad", diffuse_texture)
}

/// Unit cube centred on the origin. Each face has its own four vertices so that normals and
/// texture coordinates do not bleed between faces, giving 24 vertices and 12 triangles
pub fn cube(diffuse_texture: Option<PathBuf>) -> MeshData
{
    // (normal, axis along u, axis along v); u x v == normal so every face winds counter-clockwise
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] =
    [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut triangles = Vec::with_capacity(12);

    for (normal, u_axis, v_axis) in faces.iter()
    {
        let base = vertices.len() as u32;

        for (u, v) in [(0.0_f32, 0.0_f32), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].iter()
        {
            let position =
            [
                0.5 * normal[0] + (u - 0.5) * u_axis[0] + (v - 0.5) * v_axis[0],
                0.5 * normal[1] + (u - 0.5) * u_axis[1] + (v - 0.5) * v_axis[1],
                0.5 * normal[2] + (u - 0.5) * u_axis[2] + (v - 0.5) * v_axis[2],
            ];

            vertices.push(Vertex::with_normal(position, *normal, [*u, *v]));
        }

        triangles.push([base, base + 1, base + 2]);
        triangles.push([base, base + 2, base + 3]);
    }

    single_material_mesh(vertices, triangles, "cube", diffuse_texture)
}

fn single_material_mesh(vertices: Vec<Vertex>, triangles: Vec<[u32; 3]>, name: &str, diffuse_texture: Option<PathBuf>) -> MeshData
{
    let material = MaterialDesc
    {
        name: name.to_string(),
        diffuse_texture,
        ..MaterialDesc::default()
    };

    MeshData
    {
        vertices,
        drawcalls: vec![Drawcall { triangles, material_index: Some(0) }],
        materials: vec![material],
    }
}
