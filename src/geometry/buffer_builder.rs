use std::mem::size_of;
use log::warn;
use crate::error::MeshError;
use crate::geometry::mesh_data::{MaterialDesc, MeshData};
use crate::geometry::tangent_space::apply_flat_tangents;
use crate::geometry::vertex::{IndexRange, Vertex};

/// Everything needed to create a model's GPU buffers. The index buffer is partitioned by the
/// index ranges, in drawcall order
#[derive(Debug)]
pub struct BufferContents
{
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub index_ranges: Vec<IndexRange>,
    pub materials: Vec<MaterialDesc>,
}

impl BufferContents
{
    /// Number of bytes required for the model's vertices
    pub fn vertex_bytes(&self) -> usize
    {
        self.vertices.len() * Vertex::STRIDE
    }

    /// Number of bytes required for the model's indices
    pub fn index_bytes(&self) -> usize
    {
        self.indices.len() * size_of::<u32>()
    }
}

/// Flattens the drawcalls of a mesh into a single index list, records where each drawcall lives in
/// it, and computes the tangent space of every triangle
///
/// `mesh` - the loaded mesh. It is consumed; only the returned contents are kept
pub fn build_buffer_contents(mesh: MeshData) -> Result<BufferContents, MeshError>
{
    let mut indices = Vec::with_capacity(mesh.triangle_count() * 3);
    let MeshData { mut vertices, drawcalls, materials } = mesh;

    let mut index_ranges = Vec::with_capacity(drawcalls.len());

    for (drawcall_index, drawcall) in drawcalls.iter().enumerate()
    {
        if let Some(material_index) = drawcall.material_index
        {
            if material_index >= materials.len()
            {
                return Err(MeshError::UnknownMaterial { drawcall: drawcall_index, material_index, material_count: materials.len() });
            }
        }

        let start = indices.len() as u32;

        for triangle in &drawcall.triangles
        {
            if let Some(index) = triangle.iter().find(|x| **x as usize >= vertices.len())
            {
                return Err(MeshError::IndexOutOfBounds { drawcall: drawcall_index, index: *index, vertex_count: vertices.len() });
            }

            indices.extend_from_slice(triangle);
        }

        index_ranges.push(IndexRange
        {
            start,
            size: drawcall.triangles.len() as u32 * 3,
            base_vertex: 0,
            material_index: drawcall.material_index
        });
    }

    let degenerate_triangles = apply_flat_tangents(&mut vertices, &indices);
    if degenerate_triangles > 0
    {
        warn!("{} of {} triangles have a degenerate UV mapping; a fallback tangent space was used", degenerate_triangles, indices.len() / 3);
    }

    Ok(BufferContents { vertices, indices, index_ranges, materials })
}

#[cfg(test)]
mod tests
{
    use crate::error::MeshError;
    use crate::geometry::buffer_builder::build_buffer_contents;
    use crate::geometry::mesh_data::{Drawcall, MaterialDesc, MeshData};
    use crate::geometry::vertex::{IndexRange, Vertex};

    /// Grid of vertices large enough for any test triangle to index into
    fn grid_vertices() -> Vec<Vertex>
    {
        let mut vertices = Vec::new();
        for y in 0..4
        {
            for x in 0..4
            {
                vertices.push(Vertex::new([x as f32, y as f32, 0.0], [x as f32 / 3.0, y as f32 / 3.0]));
            }
        }
        vertices
    }

    fn triangles(count: usize) -> Vec<[u32; 3]>
    {
        (0..count as u32).map(|x| [x % 3, x % 3 + 1, x % 3 + 4]).collect()
    }

    fn materials(count: usize) -> Vec<MaterialDesc>
    {
        (0..count).map(|x| MaterialDesc { name: format!("material{}", x), ..MaterialDesc::default() }).collect()
    }

    #[test]
    fn two_drawcalls_give_consecutive_ranges()
    {
        let mesh = MeshData
        {
            vertices: grid_vertices(),
            drawcalls: vec!
            [
                Drawcall { triangles: triangles(4), material_index: Some(0) },
                Drawcall { triangles: triangles(6), material_index: Some(1) },
            ],
            materials: materials(2),
        };

        let contents = build_buffer_contents(mesh).unwrap();

        assert_eq!(contents.index_ranges, vec!
        [
            IndexRange { start: 0, size: 12, base_vertex: 0, material_index: Some(0) },
            IndexRange { start: 12, size: 18, base_vertex: 0, material_index: Some(1) },
        ]);
        assert_eq!(contents.indices.len(), 30);
    }

    #[test]
    fn ranges_partition_the_index_buffer()
    {
        let drawcalls = [3_usize, 0, 7, 1, 5].iter().enumerate()
            .map(|(i, count)| Drawcall { triangles: triangles(*count), material_index: if i % 2 == 0 { Some(i / 2) } else { None } })
            .collect();

        let mesh = MeshData { vertices: grid_vertices(), drawcalls, materials: materials(3) };
        let contents = build_buffer_contents(mesh).unwrap();

        let mut expected_start = 0;
        for range in &contents.index_ranges
        {
            assert_eq!(range.start, expected_start);
            assert_eq!(range.size % 3, 0);
            expected_start += range.size;
        }

        assert_eq!(expected_start as usize, contents.indices.len());
        assert_eq!(contents.indices.len() % 3, 0);
    }

    #[test]
    fn byte_sizes_match_contents()
    {
        let mesh = MeshData
        {
            vertices: grid_vertices(),
            drawcalls: vec![Drawcall { triangles: triangles(5), material_index: None }],
            materials: Vec::new(),
        };

        let contents = build_buffer_contents(mesh).unwrap();

        assert_eq!(contents.vertex_bytes(), 16 * 56);
        assert_eq!(contents.index_bytes(), 15 * 4);
    }

    #[test]
    fn out_of_bounds_index_is_rejected()
    {
        let mesh = MeshData
        {
            vertices: grid_vertices(),
            drawcalls: vec!
            [
                Drawcall { triangles: triangles(1), material_index: None },
                Drawcall { triangles: vec![[0, 1, 16]], material_index: None },
            ],
            materials: Vec::new(),
        };

        match build_buffer_contents(mesh)
        {
            Err(MeshError::IndexOutOfBounds { drawcall, index, vertex_count }) =>
                {
                    assert_eq!(drawcall, 1);
                    assert_eq!(index, 16);
                    assert_eq!(vertex_count, 16);
                },
            other => panic!("Expected an out of bounds error, got {:?}", other)
        }
    }

    #[test]
    fn unknown_material_is_rejected()
    {
        let mesh = MeshData
        {
            vertices: grid_vertices(),
            drawcalls: vec![Drawcall { triangles: triangles(1), material_index: Some(2) }],
            materials: materials(2),
        };

        assert!(matches!(build_buffer_contents(mesh), Err(MeshError::UnknownMaterial { material_index: 2, .. })));
    }

    #[test]
    fn every_vertex_used_gets_a_tangent()
    {
        let mesh = MeshData
        {
            vertices: grid_vertices(),
            drawcalls: vec![Drawcall { triangles: triangles(3), material_index: None }],
            materials: Vec::new(),
        };

        let contents = build_buffer_contents(mesh).unwrap();

        for index in &contents.indices
        {
            let vertex = &contents.vertices[*index as usize];
            assert_ne!(vertex.tangent, [0.0; 3]);
            assert_ne!(vertex.binormal, [0.0; 3]);
        }
    }
}
