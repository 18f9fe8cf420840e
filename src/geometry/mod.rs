pub mod buffer_builder;
pub mod mesh_data;
pub mod model;
pub mod primitives;
pub mod tangent_space;
pub mod vertex;
