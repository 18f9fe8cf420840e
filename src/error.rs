use std::path::PathBuf;
use thiserror::Error;

/// Reasons a mesh could not be turned into GPU-ready buffer contents
#[derive(Debug, Error)]
pub enum MeshError
{
    #[error("failed to load {path:?}: {source}")]
    Obj
    {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("index {index} in drawcall {drawcall} is outside of the {vertex_count} loaded vertices")]
    IndexOutOfBounds
    {
        drawcall: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("drawcall {drawcall} has {index_count} indices, which is not a whole number of triangles")]
    IncompleteTriangle
    {
        drawcall: usize,
        index_count: usize,
    },

    #[error("drawcall {drawcall} references material {material_index} but only {material_count} materials exist")]
    UnknownMaterial
    {
        drawcall: usize,
        material_index: usize,
        material_count: usize,
    },
}

/// Failures reported by the graphics device when creating resources
#[derive(Debug, Error)]
pub enum GpuError
{
    #[error("failed to create buffer '{label}' ({size_bytes} bytes): {reason}")]
    BufferCreation
    {
        label: String,
        size_bytes: usize,
        reason: String,
    },

    #[error("failed to map buffer {buffer} for writing")]
    BufferMap
    {
        buffer: u32,
    },

    #[error("failed to read shader {path:?}: {source}")]
    ShaderRead
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile shader {path:?}: {log}")]
    ShaderCompilation
    {
        path: PathBuf,
        log: String,
    },

    #[error("failed to link shader program: {0}")]
    ShaderLink(String),
}

/// Failures when decoding or uploading a texture file
#[derive(Debug, Error)]
pub enum TextureError
{
    #[error("could not decode {path:?}: {reason}")]
    Decode
    {
        path: PathBuf,
        reason: String,
    },

    #[error("{path:?} has {channels} channels, only 1, 3 and 4 are supported")]
    UnsupportedChannels
    {
        path: PathBuf,
        channels: usize,
    },
}

#[derive(Debug, Error)]
pub enum ModelError
{
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// Errors returned by the scene when it is driven out of order or fails to build its objects
#[derive(Debug, Error)]
pub enum SceneError
{
    #[error("the scene has not been initialized")]
    NotInitialized,

    #[error("the scene has already been released")]
    Released,

    #[error("the scene is already initialized")]
    AlreadyInitialized,

    #[error("failed to build model '{label}': {source}")]
    Model
    {
        label: String,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Gpu(#[from] GpuError),
}

#[derive(Debug, Error)]
pub enum WindowError
{
    #[error("failed to initialize GLFW: {0}")]
    Init(#[from] glfw::InitError),

    #[error("failed to create a {width}x{height} window")]
    Creation
    {
        width: u32,
        height: u32,
    },
}

/// Anything that stops the program from starting or keeps it from rendering a frame
#[derive(Debug, Error)]
pub enum AppError
{
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}
