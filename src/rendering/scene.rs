use std::path::PathBuf;
use log::{debug, info};
use nalgebra_glm::vec3;
use crate::error::{ModelError, SceneError};
use crate::geometry::mesh_data::MeshData;
use crate::geometry::model::IndexedModel;
use crate::geometry::primitives;
use crate::input_state::InputState;
use crate::rendering::animation::{camera_world_position, SceneTransforms, SolarSystem};
use crate::rendering::camera::{aspect_ratio, Camera};
use crate::rendering::constant_buffers::{ConstantBuffer, LightCameraBuffer, MaterialBuffer, TransformationBuffer};
use crate::rendering::graphics_device::{ConstantBufferSlot, GraphicsDevice};

/// How often the frame rate is logged, in seconds of accumulated frame time
const FPS_REPORT_INTERVAL: f32 = 2.0;

const SPECULAR: [f32; 3] = [1.0, 1.0, 1.0];
const SHININESS: f32 = 32.0;

/// Files the scene loads its objects from
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig
{
    pub model_path: PathBuf,
    /// Image used for the ground quad and the three cubes. Without one they are drawn untextured
    pub cube_texture: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneState
{
    Uninitialized,
    Initialized,
    Released,
}

/// Constant buffers shared by every object of the scene
struct SceneConstants<D: GraphicsDevice>
{
    transformation: ConstantBuffer<TransformationBuffer, D>,
    light_camera: ConstantBuffer<LightCameraBuffer, D>,
    material: ConstantBuffer<MaterialBuffer, D>,
}

struct SceneObjects<D: GraphicsDevice>
{
    camera: Camera,
    quad: IndexedModel<D>,
    sponza: IndexedModel<D>,
    sun: IndexedModel<D>,
    earth: IndexedModel<D>,
    moon: IndexedModel<D>,
    solar_system: SolarSystem,
    transforms: SceneTransforms,
}

/// Elapsed time and frames since the frame rate was last logged
#[derive(Default)]
struct FrameCounter
{
    elapsed: f32,
    frames: u32,
}

/// The demo scene: a spinning ground quad, a large static model and a sun, earth and moon made of
/// cubes. The scene owns the device it renders with and every GPU resource it creates
pub struct OurTestScene<D: GraphicsDevice>
{
    state: SceneState,
    window_dimensions: (i32, i32),
    constants: Option<SceneConstants<D>>,
    objects: Option<SceneObjects<D>>,
    frame_counter: FrameCounter,
    // Dropped last, after every resource created with it
    device: D,
}

impl<D: GraphicsDevice> OurTestScene<D>
{
    /// Creates the constant buffers of the scene. No objects exist until `init` is called
    ///
    /// `device` - device used for every resource of the scene
    /// `width` - width of the window rendered to
    /// `height` - height of the window rendered to
    pub fn new(mut device: D, width: i32, height: i32) -> Result<OurTestScene<D>, SceneError>
    {
        let constants = SceneConstants
        {
            transformation: ConstantBuffer::new(&mut device, ConstantBufferSlot::Transformation, "transformation constants")?,
            light_camera: ConstantBuffer::new(&mut device, ConstantBufferSlot::LightCamera, "light camera constants")?,
            material: ConstantBuffer::new(&mut device, ConstantBufferSlot::Material, "material constants")?,
        };

        Ok(OurTestScene
        {
            device,
            state: SceneState::Uninitialized,
            window_dimensions: (width, height),
            constants: Some(constants),
            objects: None,
            frame_counter: FrameCounter::default(),
        })
    }

    /// Loads the model named in the config and builds every object of the scene
    pub fn init(&mut self, config: &SceneConfig) -> Result<(), SceneError>
    {
        self.check_can_init()?;

        info!("Loading model {:?}", config.model_path);

        let mesh = MeshData::from_obj_file(&config.model_path)
            .map_err(|err| model_error("sponza", ModelError::Mesh(err)))?;

        self.init_with_mesh(mesh, config)
    }

    /// Builds every object of the scene, using an already loaded mesh as the large static model
    pub fn init_with_mesh(&mut self, mesh: MeshData, config: &SceneConfig) -> Result<(), SceneError>
    {
        self.check_can_init()?;

        let device = &mut self.device;
        let cube = || primitives::cube(config.cube_texture.clone());

        let quad = IndexedModel::new(device, primitives::quad(config.cube_texture.clone()), "quad").map_err(|err| model_error("quad", err))?;
        let sponza = IndexedModel::new(device, mesh, "sponza").map_err(|err| model_error("sponza", err))?;
        info!("sponza: {} vertices, {} indices in {} ranges, {} materials",
              sponza.vertex_count(), sponza.index_count(), sponza.index_ranges().len(), sponza.materials().len());
        let sun = IndexedModel::new(device, cube(), "sun").map_err(|err| model_error("sun", err))?;
        let earth = IndexedModel::new(device, cube(), "earth").map_err(|err| model_error("earth", err))?;
        let moon = IndexedModel::new(device, cube(), "moon").map_err(|err| model_error("moon", err))?;

        let solar_system = SolarSystem::default();

        let mut camera = Camera::new(self.window_dimensions);
        camera.move_to(vec3(0.0, 0.0, 5.0));

        self.objects = Some(SceneObjects
        {
            camera,
            quad,
            sponza,
            sun,
            earth,
            moon,
            transforms: solar_system.transforms(),
            solar_system,
        });

        self.state = SceneState::Initialized;
        info!("Scene initialized");

        Ok(())
    }

    /// Moves the camera and advances the animation
    ///
    /// `dt` - elapsed time in seconds since the previous update
    /// `input` - input gathered by the window this frame
    pub fn update(&mut self, dt: f32, input: &InputState) -> Result<(), SceneError>
    {
        self.check_initialized()?;

        let objects = self.objects.as_mut().ok_or(SceneError::NotInitialized)?;
        objects.camera.update(dt, input);
        objects.solar_system.advance(dt);
        objects.transforms = objects.solar_system.transforms();

        self.frame_counter.elapsed += dt;
        self.frame_counter.frames += 1;

        if self.frame_counter.elapsed >= FPS_REPORT_INTERVAL
        {
            info!("fps: {:.1}", self.frame_counter.frames as f32 / self.frame_counter.elapsed);
            self.frame_counter = FrameCounter::default();
        }

        Ok(())
    }

    /// Draws the quad, the static model, the sun, the earth and the moon in that order. Every
    /// object gets its own material and transformation constants written just before its draw
    pub fn render(&mut self) -> Result<(), SceneError>
    {
        self.check_initialized()?;

        let device = &mut self.device;
        let objects = self.objects.as_ref().ok_or(SceneError::NotInitialized)?;
        let constants = self.constants.as_ref().ok_or(SceneError::Released)?;

        constants.transformation.bind(device);

        let world_to_view = objects.camera.world_to_view_matrix();
        let projection = objects.camera.projection_matrix();
        let camera_position = camera_world_position(&world_to_view);
        let light_position = objects.solar_system.light_position();

        constants.light_camera.update(device, &LightCameraBuffer::new(&light_position, &camera_position))?;
        constants.light_camera.bind(device);

        let transforms = &objects.transforms;
        let draws =
            [
                (&objects.quad, transforms.quad, ground_material()),
                (&objects.sponza, transforms.sponza, ground_material()),
                (&objects.sun, transforms.sun, body_material([0.0, 0.0, 0.2], [0.0, 0.0, 1.0])),
                (&objects.earth, transforms.earth, body_material([0.05, 0.1, 0.2], [0.53, 0.81, 0.92])),
                (&objects.moon, transforms.moon, body_material([0.1, 0.1, 0.1], [0.5, 0.5, 0.5])),
            ];

        for (model, model_to_world, material) in draws.iter()
        {
            constants.material.update(device, material)?;
            constants.material.bind(device);

            constants.transformation.update(device, &TransformationBuffer::new(model_to_world, &world_to_view, &projection))?;
            constants.transformation.bind(device);

            model.render(device);
        }

        Ok(())
    }

    /// Records the new window size and adjusts the camera's projection. No buffers are recreated
    pub fn on_window_resized(&mut self, width: i32, height: i32)
    {
        self.window_dimensions = (width, height);

        if let Some(objects) = self.objects.as_mut()
        {
            objects.camera.set_aspect(aspect_ratio(width, height));
            debug!("Scene resized to {}x{}, aspect {:.3}", width, height, objects.camera.aspect());
        }
    }

    /// Releases every model and constant buffer. The scene cannot be used afterwards
    pub fn release(&mut self) -> Result<(), SceneError>
    {
        if self.state == SceneState::Released
        {
            return Err(SceneError::Released);
        }

        self.objects = None;
        self.constants = None;
        self.state = SceneState::Released;

        info!("Scene released");
        Ok(())
    }

    #[cfg(test)]
    pub fn state(&self) -> SceneState
    {
        self.state
    }

    #[cfg(test)]
    pub fn window_dimensions(&self) -> (i32, i32)
    {
        self.window_dimensions
    }

    pub fn device(&self) -> &D
    {
        &self.device
    }

    #[cfg(test)]
    pub fn camera(&self) -> Option<&Camera>
    {
        self.objects.as_ref().map(|x| &x.camera)
    }

    #[cfg(test)]
    pub fn transforms(&self) -> Option<&SceneTransforms>
    {
        self.objects.as_ref().map(|x| &x.transforms)
    }

    fn check_initialized(&self) -> Result<(), SceneError>
    {
        match self.state
        {
            SceneState::Initialized => Ok(()),
            SceneState::Uninitialized => Err(SceneError::NotInitialized),
            SceneState::Released => Err(SceneError::Released),
        }
    }

    fn check_can_init(&self) -> Result<(), SceneError>
    {
        match self.state
        {
            SceneState::Uninitialized => Ok(()),
            SceneState::Initialized => Err(SceneError::AlreadyInitialized),
            SceneState::Released => Err(SceneError::Released),
        }
    }
}

fn model_error(label: &str, source: ModelError) -> SceneError
{
    SceneError::Model { label: label.to_string(), source }
}

/// Material of the quad and the static model; their colour comes from their textures
fn ground_material() -> MaterialBuffer
{
    MaterialBuffer::new([0.2, 0.2, 0.2], [1.0, 1.0, 1.0], SPECULAR, SHININESS)
}

fn body_material(ambient: [f32; 3], diffuse: [f32; 3]) -> MaterialBuffer
{
    MaterialBuffer::new(ambient, diffuse, SPECULAR, SHININESS)
}
