use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::error::MeshError;
use crate::geometry::vertex::Vertex;

/// CPU-side triangle soup as read from a model file, before it is turned into GPU buffers
#[derive(Clone, Debug, Default)]
pub struct MeshData
{
    pub vertices: Vec<Vertex>,
    pub drawcalls: Vec<Drawcall>,
    pub materials: Vec<MaterialDesc>,
}

/// A group of triangles that are all drawn with the same material
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drawcall
{
    pub triangles: Vec<[u32; 3]>,
    pub material_index: Option<usize>,
}

/// Material as described by the model file. Texture files are optional
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDesc
{
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub diffuse_texture: Option<PathBuf>,
    pub normal_texture: Option<PathBuf>,
}

impl Default for MaterialDesc
{
    fn default() -> MaterialDesc
    {
        MaterialDesc
        {
            name: String::new(),
            ambient: [0.2, 0.2, 0.2],
            diffuse: [1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0],
            shininess: 32.0,
            diffuse_texture: None,
            normal_texture: None,
        }
    }
}

impl MeshData
{
    /// Loads an OBJ file (and its MTL library, if any). Every object/group in the file becomes one
    /// drawcall, kept in file order
    ///
    /// `file_location` - path to the OBJ file. Texture names in the MTL file are resolved relative
    ///                   to the folder holding this file
    pub fn from_obj_file<P: AsRef<Path>>(file_location: P) -> Result<MeshData, MeshError>
    {
        let file_location = file_location.as_ref();

        let model_options = tobj::LoadOptions
        {
            single_index: true,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true
        };

        let (models, materials) = tobj::load_obj(file_location, &model_options)
            .map_err(|source| MeshError::Obj { path: file_location.to_path_buf(), source })?;

        let materials = match materials
        {
            Ok(i) => i,
            Err(err) =>
                {
                    warn!("Failed to load the materials of {:?}: {}. Continuing without materials", file_location, err);
                    Vec::new()
                }
        };

        let texture_folder = file_location.parent().unwrap_or_else(|| Path::new(""));
        let materials: Vec<MaterialDesc> = materials.iter().map(|x| MaterialDesc::from_obj_material(x, texture_folder)).collect();

        let mut vertices = Vec::new();
        let mut drawcalls = Vec::new();

        for (drawcall_index, m) in models.iter().enumerate()
        {
            let mesh = &m.mesh;
            let current_vertex_count = vertices.len() as u32;

            if mesh.indices.len() % 3 != 0
            {
                return Err(MeshError::IncompleteTriangle { drawcall: drawcall_index, index_count: mesh.indices.len() });
            }

            for v in 0..mesh.positions.len() / 3
            {
                let position = [mesh.positions[3 * v], mesh.positions[3 * v + 1], mesh.positions[3 * v + 2]];

                // Texture coordinates and normals are optional in an OBJ file
                let tex_coord = if 2 * v + 1 < mesh.texcoords.len()
                {
                    [mesh.texcoords[2 * v], mesh.texcoords[2 * v + 1]]
                }
                else
                {
                    [0.0, 0.0]
                };

                let normal = if 3 * v + 2 < mesh.normals.len()
                {
                    [mesh.normals[3 * v], mesh.normals[3 * v + 1], mesh.normals[3 * v + 2]]
                }
                else
                {
                    [0.0, 0.0, 0.0]
                };

                vertices.push(Vertex::with_normal(position, normal, tex_coord));
            }

            let triangles = mesh.indices
                .chunks_exact(3)
                .map(|x| [x[0] + current_vertex_count, x[1] + current_vertex_count, x[2] + current_vertex_count])
                .collect();

            let material_index = match mesh.material_id
            {
                Some(i) if i >= materials.len() =>
                    {
                        warn!("Object '{}' references missing material {}; it will be drawn without one", m.name, i);
                        None
                    },
                other => other
            };

            drawcalls.push(Drawcall { triangles, material_index });
        }

        info!("Loaded {:?}: {} vertices, {} drawcalls, {} materials", file_location, vertices.len(), drawcalls.len(), materials.len());

        Ok(MeshData { vertices, drawcalls, materials })
    }

    /// Number of triangles over all drawcalls
    pub fn triangle_count(&self) -> usize
    {
        self.drawcalls.iter().map(|x| x.triangles.len()).sum()
    }
}

impl MaterialDesc
{
    fn from_obj_material(material: &tobj::Material, texture_folder: &Path) -> MaterialDesc
    {
        let resolve = |file_name: &str|
            {
                if file_name.trim().is_empty()
                {
                    None
                }
                else
                {
                    Some(texture_folder.join(file_name.trim()))
                }
            };

        MaterialDesc
        {
            name: material.name.clone(),
            ambient: material.ambient,
            diffuse: material.diffuse,
            specular: material.specular,
            shininess: material.shininess,
            diffuse_texture: resolve(&material.diffuse_texture),
            normal_texture: resolve(&material.normal_texture),
        }
    }
}
