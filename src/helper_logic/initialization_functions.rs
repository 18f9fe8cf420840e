use std::time::Instant;
use glfw::OpenGlProfileHint;
use log::info;
use crate::args_parser::Args;
use crate::error::AppError;
use crate::gl_wrappers::gl_device::GlDevice;
use crate::helper_logic::folder_location_functions::{get_shaders_folder, resolve_asset_path};
use crate::input_state::InputState;
use crate::rendering::scene::{OurTestScene, SceneConfig};
use crate::window::RenderWindow;

/// Holds all of the variables used in the program
pub struct ProgramVariables
{
    // Fields are dropped in order: the scene frees its GL objects while the window's context
    // is still current
    pub scene: OurTestScene<GlDevice>,
    pub render_window: RenderWindow,
    pub input: InputState,
    pub last_frame: Instant,
}

impl ProgramVariables
{
    /// Creates the window, the graphics device and the scene with all of its objects
    pub fn new() -> Result<ProgramVariables, AppError>
    {
        let args = Args::parse_args();
        info!("Starting with {:?}", args);

        let render_window = create_window(args.window_size, "Solar Scene")?;
        let (width, height) = render_window.get_window_dimensions();

        let device = GlDevice::new(&get_shaders_folder())?;
        let mut scene = OurTestScene::new(device, width, height)?;
        scene.init(&scene_config(&args))?;

        Ok(ProgramVariables
        {
            scene,
            render_window,
            input: InputState::new(),
            last_frame: Instant::now(),
        })
    }
}

/// Resolves the files named on the command line against the assets folder
///
/// `args` - the arguments passed to the program upon launching it
pub fn scene_config(args: &Args) -> SceneConfig
{
    SceneConfig
    {
        model_path: resolve_asset_path(&args.model),
        cube_texture: args.cube_texture.as_ref().map(resolve_asset_path),
    }
}

/// Creates the window with an OpenGL 4.5 core context. Debug builds also request a debug context
///
/// `window_size` - the dimensions of the window (width, height)
/// `window_title` - the name of the window
pub fn create_window(window_size: (u32, u32), window_title: &str) -> Result<RenderWindow, AppError>
{
    let mut window_hints = vec!
    [
        glfw::WindowHint::ContextVersion(4, 5),
        glfw::WindowHint::OpenGlProfile(OpenGlProfileHint::Core)
    ];

    // Only have debug mode if the program as a whole is compiled in debug mode
    if cfg!(debug_assertions)
    {
        window_hints.push(glfw::WindowHint::OpenGlDebugContext(true));
    }

    Ok(RenderWindow::new(window_size, window_title, window_hints)?)
}

#[cfg(test)]
mod tests
{
    use std::path::PathBuf;
    use crate::args_parser::Args;
    use crate::helper_logic::initialization_functions::scene_config;

    #[test]
    fn config_resolves_relative_files_in_assets()
    {
        let absolute_texture = std::env::temp_dir().join("crate.png");
        let args = Args
        {
            model: PathBuf::from("crytek-sponza/sponza.obj"),
            cube_texture: Some(absolute_texture.clone()),
            window_size: (1280, 720),
        };

        let config = scene_config(&args);

        assert!(config.model_path.ends_with("assets/crytek-sponza/sponza.obj"));
        assert_eq!(config.cube_texture, Some(absolute_texture));
    }
}
