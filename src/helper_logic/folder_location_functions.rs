use std::env;
use std::path::{Path, PathBuf};
use log::warn;

// The DevelopmentFlag indicates that this program is being run
// from the project folder. If this is not set, it is assumed
// that the program executable is being launched. This means
// that all required folders should be in the same folder
// as the executable

/// Get the location of the shaders folder
pub fn get_shaders_folder() -> PathBuf
{
    get_folder("shaders")
}

/// Get the location of the folder holding the models and textures
pub fn get_assets_folder() -> PathBuf
{
    get_folder("assets")
}

/// Resolves a user supplied asset path. Absolute paths are kept as they are
///
/// `path` - path given on the command line
pub fn resolve_asset_path<P: AsRef<Path>>(path: P) -> PathBuf
{
    let path = path.as_ref();

    if path.is_absolute()
    {
        path.to_path_buf()
    }
    else
    {
        get_assets_folder().join(path)
    }
}

fn get_folder(name: &str) -> PathBuf
{
    if env::var("DevelopmentFlag").is_ok()
    {
        match get_root_project_folder()
        {
            Some(i) => return i.join(name),
            None => warn!("Could not find the project folder from the executable location, using the working directory")
        }
    }

    PathBuf::new().join(name)
}

/// Get the location of the project folder, assuming the executable is in target/<configuration>
fn get_root_project_folder() -> Option<PathBuf>
{
    let exe_location = env::current_exe().ok()?;

    let configuration_folder = exe_location.parent()?;
    let target_folder = configuration_folder.parent()?;
    let project_folder = target_folder.parent()?;

    Some(project_folder.to_path_buf())
}

#[cfg(test)]
mod tests
{
    use std::path::PathBuf;
    use crate::helper_logic::folder_location_functions::resolve_asset_path;

    #[test]
    fn absolute_paths_are_kept()
    {
        let absolute = std::env::temp_dir().join("model.obj");
        assert_eq!(resolve_asset_path(&absolute), absolute);
    }

    #[test]
    fn relative_paths_land_in_assets()
    {
        let resolved = resolve_asset_path("crytek-sponza/sponza.obj");
        assert!(resolved.ends_with(PathBuf::from("assets").join("crytek-sponza").join("sponza.obj")));
    }
}
