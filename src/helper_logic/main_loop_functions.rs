use std::time::Instant;
use crate::error::SceneError;
use crate::helper_logic::initialization_functions::ProgramVariables;

/// Seconds elapsed since the previous call, restarting the measurement
///
/// `last_frame` - time the previous frame started
pub fn frame_delta(last_frame: &mut Instant) -> f32
{
    let now = Instant::now();
    let dt = now.duration_since(*last_frame).as_secs_f32();
    *last_frame = now;
    dt
}

/// Processes input, advances the scene and renders one frame
///
/// `program_variables` - the window, scene and input state of the program
pub fn run_frame(program_variables: &mut ProgramVariables) -> Result<(), SceneError>
{
    if let Some((width, height)) = program_variables.render_window.poll_events(&mut program_variables.input)
    {
        program_variables.scene.device().set_viewport(width, height);
        program_variables.scene.on_window_resized(width, height);
    }

    let dt = frame_delta(&mut program_variables.last_frame);
    program_variables.scene.update(dt, &program_variables.input)?;

    program_variables.scene.device().begin_frame();
    program_variables.scene.render()?;

    program_variables.render_window.swap_buffers();
    Ok(())
}

#[cfg(test)]
mod tests
{
    use std::time::{Duration, Instant};
    use crate::helper_logic::main_loop_functions::frame_delta;

    #[test]
    fn delta_restarts_from_the_last_call()
    {
        let mut last_frame = Instant::now() - Duration::from_millis(50);

        let first = frame_delta(&mut last_frame);
        let second = frame_delta(&mut last_frame);

        assert!(first >= 0.05);
        assert!(second < first);
    }
}
