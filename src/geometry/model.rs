use std::path::PathBuf;
use std::rc::Rc;
use fnv::FnvHashMap;
use log::{debug, info, warn};
use crate::error::ModelError;
use crate::geometry::buffer_builder::build_buffer_contents;
use crate::geometry::mesh_data::{MaterialDesc, MeshData};
use crate::geometry::vertex::{IndexRange, Vertex};
use crate::rendering::graphics_device::{GraphicsDevice, DIFFUSE_TEXTURE_SLOT, NORMAL_TEXTURE_SLOT};

/// A material together with the textures loaded for it. A texture slot is `None` when the material
/// names no file for it or when loading the file failed
pub struct Material<D: GraphicsDevice>
{
    pub desc: MaterialDesc,
    pub diffuse: Option<Rc<D::Texture>>,
    pub normal: Option<Rc<D::Texture>>,
}

/// Holds the GPU buffers and materials required to render a model. All of the model's geometry
/// lives in one vertex buffer and one index buffer; the index ranges say which part of the index
/// buffer is drawn with which material
pub struct IndexedModel<D: GraphicsDevice>
{
    vertex_buffer: D::Buffer,
    index_buffer: D::Buffer,
    index_ranges: Vec<IndexRange>,
    materials: Vec<Material<D>>,
    vertex_count: usize,
    index_count: usize,
}

impl<D: GraphicsDevice> IndexedModel<D>
{
    /// Builds the buffers for the given mesh, uploads them and loads the textures of its materials.
    /// The CPU-side mesh is dropped once everything is uploaded
    ///
    /// `device` - the device to create the buffers and textures with
    /// `mesh` - the geometry and materials of the model
    /// `label` - name used for the GPU buffers and in log messages
    pub fn new(device: &mut D, mesh: MeshData, label: &str) -> Result<IndexedModel<D>, ModelError>
    {
        let contents = build_buffer_contents(mesh)?;

        let vertex_buffer = device.create_vertex_buffer(bytemuck::cast_slice(&contents.vertices), &format!("{} vertices", label))?;
        let index_buffer = device.create_index_buffer(&contents.indices, &format!("{} indices", label))?;

        debug!("Uploaded '{}': {} bytes of vertices, {} bytes of indices", label, contents.vertex_bytes(), contents.index_bytes());

        let vertex_count = contents.vertices.len();
        let index_count = contents.indices.len();
        let materials = load_materials(device, contents.materials, label);

        Ok(IndexedModel
        {
            vertex_buffer,
            index_buffer,
            index_ranges: contents.index_ranges,
            materials,
            vertex_count,
            index_count,
        })
    }

    /// Binds the model's buffers once, then draws every index range in the order it was recorded
    /// with its material's textures bound
    pub fn render(&self, device: &mut D)
    {
        device.bind_geometry(&self.vertex_buffer, Vertex::STRIDE, &self.index_buffer);

        for range in &self.index_ranges
        {
            let material = range.material_index.and_then(|x| self.materials.get(x));

            device.bind_texture(DIFFUSE_TEXTURE_SLOT, material.and_then(|x| x.diffuse.as_deref()));
            device.bind_texture(NORMAL_TEXTURE_SLOT, material.and_then(|x| x.normal.as_deref()));

            device.draw_indexed(range.size, range.start, range.base_vertex);
        }
    }

    pub fn index_ranges(&self) -> &[IndexRange]
    {
        &self.index_ranges
    }

    pub fn materials(&self) -> &[Material<D>]
    {
        &self.materials
    }

    pub fn vertex_count(&self) -> usize
    {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize
    {
        self.index_count
    }
}

/// Loads the textures of every material. A file is loaded at most once per model, and a file that
/// failed to load is not tried again
fn load_materials<D: GraphicsDevice>(device: &mut D, descs: Vec<MaterialDesc>, label: &str) -> Vec<Material<D>>
{
    let mut loaded: FnvHashMap<PathBuf, Option<Rc<D::Texture>>> = FnvHashMap::default();
    let mut failed = 0;

    let mut load = |device: &mut D, file: &Option<PathBuf>| -> Option<Rc<D::Texture>>
        {
            let file = file.as_ref()?;

            if let Some(texture) = loaded.get(file)
            {
                return texture.clone();
            }

            let texture = match device.load_texture(file)
            {
                Ok(i) => Some(Rc::new(i)),
                Err(err) =>
                    {
                        warn!("Texture for '{}' left unset: {}", label, err);
                        failed += 1;
                        None
                    }
            };

            loaded.insert(file.clone(), texture.clone());
            texture
        };

    info!("Loading textures for '{}'...", label);

    let materials: Vec<Material<D>> = descs.into_iter().map(|desc|
        {
            let diffuse = load(device, &desc.diffuse_texture);
            let normal = load(device, &desc.normal_texture);
            Material { desc, diffuse, normal }
        })
        .collect();

    for material in &materials
    {
        let desc = &material.desc;
        debug!("'{}' material '{}': ambient {:?}, diffuse {:?}, specular {:?}, shininess {}, diffuse texture {}, normal map {}",
               label, desc.name, desc.ambient, desc.diffuse, desc.specular, desc.shininess,
               material.diffuse.is_some(), material.normal.is_some());
    }

    info!("Done loading textures for '{}' ({} failed)", label, failed);

    materials
}
