pub mod animation;
pub mod camera;
pub mod constant_buffers;
pub mod graphics_device;
pub mod scene;

#[cfg(test)]
pub mod test_device;
