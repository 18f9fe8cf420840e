mod args_parser;
mod error;
mod geometry;
mod gl_wrappers;
mod helper_logic;
mod input_state;
mod rendering;
mod window;

use std::process::exit;
use log::{error, info};
use helper_logic::initialization_functions::ProgramVariables;
use helper_logic::main_loop_functions::run_frame;

fn main()
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut program_variables = match ProgramVariables::new()
    {
        Ok(i) => i,
        Err(err) =>
            {
                error!("Failed to start: {}", err);
                exit(-1);
            }
    };

    while !program_variables.render_window.should_close()
    {
        if let Err(err) = run_frame(&mut program_variables)
        {
            error!("Failed to render frame: {}", err);
            exit(-1);
        }
    }

    if let Err(err) = program_variables.scene.release()
    {
        error!("Failed to release the scene: {}", err);
    }

    info!("Exiting");
}
