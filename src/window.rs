use std::ffi::{c_void, CStr};
use std::ptr::null;
use std::sync::mpsc::Receiver;
use glfw::{Action, Context, Glfw, Key, MouseButton, Window, WindowEvent, WindowHint};
use log::{debug, error, info, warn};
use crate::error::WindowError;
use crate::input_state::{InputState, MovementKeys};

/// Abstraction of the window that is rendered to
pub struct RenderWindow
{
    glfw: Glfw,
    window: Window,
    events: Receiver<(f64, WindowEvent)>,
}

impl RenderWindow
{
    /// Creates a new window, and after this function all OpenGL functions can be called
    ///
    /// `window_size` - the dimensions of the window (width, height)
    /// `window_title` - the name of the window
    /// `window_hints`- additional information about how the window should behave or initialize the
    ///                 OpenGL context. If the window hints contain a DebugContext request, then the
    ///                 context will be in debug mode and all warnings sent to the log
    pub fn new(window_size: (u32, u32), window_title: &str, window_hints: Vec<WindowHint>) -> Result<RenderWindow, WindowError>
    {
        let debug_mode = window_hints.iter().any(|x| matches!(x, WindowHint::OpenGlDebugContext(true)));

        let mut glfw = glfw::init(glfw::LOG_ERRORS)?;
        for x in window_hints
        {
            glfw.window_hint(x);
        }

        let (mut window, events) = glfw.create_window
            (
                window_size.0,
                window_size.1,
                window_title,
                glfw::WindowMode::Windowed
            )
            .ok_or(WindowError::Creation { width: window_size.0, height: window_size.1 })?;

        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_framebuffer_size_polling(true);
        window.make_current();
        gl::load_with(|s| window.get_proc_address(s) as *const _);

        unsafe
            {
                gl::Viewport(0, 0, window_size.0 as i32, window_size.1 as i32);
            }

        if debug_mode
        {
            RenderWindow::setup_debug_context();
        }

        info!("Created {}x{} window", window_size.0, window_size.1);

        Ok(RenderWindow{ glfw, window, events })
    }

    /// Query if the window should be closed
    pub fn should_close(&self) -> bool
    {
        self.window.should_close()
    }

    /// Swap the offscreen buffer with the onscreen buffer
    pub fn swap_buffers(&mut self)
    {
        self.window.swap_buffers();
    }

    pub fn get_window_dimensions(&self) -> (i32, i32)
    {
        self.window.get_framebuffer_size()
    }

    /// Collects the events of the current frame into the input state. Escape requests the window
    /// to close
    ///
    /// `input` - input state carried across frames
    /// Returns the latest framebuffer size if the window was resized this frame
    pub fn poll_events(&mut self, input: &mut InputState) -> Option<(i32, i32)>
    {
        self.glfw.poll_events();
        input.begin_frame();

        let mut resized = None;

        for (_, event) in glfw::flush_messages(&self.events)
        {
            match event
            {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) =>
                    {
                        self.window.set_should_close(true);
                    },
                WindowEvent::Key(key, _, action, _) =>
                    {
                        if let (Some(movement_key), Some(pressed)) = (movement_key(key), is_pressed(action))
                        {
                            input.set_movement_key(movement_key, pressed);
                        }
                    },
                WindowEvent::FramebufferSize(width, height) =>
                    {
                        debug!("Resized to: {}, {}", width, height);
                        resized = Some((width, height));
                    },
                WindowEvent::CursorPos(x, y) =>
                    {
                        input.cursor_moved(x as f32, y as f32);
                    },
                WindowEvent::MouseButton(MouseButton::Button3, action, _) =>
                    {
                        if let Some(pressed) = is_pressed(action)
                        {
                            input.set_middle_button(pressed);

                            if pressed
                            {
                                let (x, y) = self.window.get_cursor_pos();
                                input.cursor_moved(x as f32, y as f32);
                            }
                        }
                    },
                _ => {}
            }
        }

        resized
    }

    /// Configures the OpenGL context for debugging
    fn setup_debug_context()
    {
        unsafe
            {
                let mut flags = 0;
                gl::GetIntegerv(gl::CONTEXT_FLAGS, &mut flags);
                if flags as u32 & gl::CONTEXT_FLAG_DEBUG_BIT != 0
                {
                    gl::Enable(gl::DEBUG_OUTPUT);
                    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS); // makes sure errors are displayed synchronously
                    gl::DebugMessageCallback(Some(gl_debug_output), null());
                    gl::DebugMessageControl(gl::DONT_CARE, gl::DONT_CARE, gl::DONT_CARE, 0, null(), gl::TRUE);
                }
                else
                {
                    warn!("Debug Context not active! Check if your driver supports the extension.")
                }
            }
    }
}

/// Keys that move the camera
fn movement_key(key: Key) -> Option<MovementKeys>
{
    match key
    {
        Key::W => Some(MovementKeys::Forward),
        Key::S => Some(MovementKeys::Backward),
        Key::A => Some(MovementKeys::Left),
        Key::D => Some(MovementKeys::Right),
        Key::Q => Some(MovementKeys::Down),
        Key::E => Some(MovementKeys::Up),
        _ => None
    }
}

/// Key repeats do not change whether a key is held
fn is_pressed(action: Action) -> Option<bool>
{
    match action
    {
        Action::Press => Some(true),
        Action::Release => Some(false),
        Action::Repeat => None
    }
}

/// Forwards OpenGL debug messages to the log, at a level matching their severity
extern "system" fn gl_debug_output(_: gl::types::GLenum,
                                   _: gl::types::GLenum,
                                   _: gl::types::GLuint,
                                   severity: gl::types::GLenum,
                                   _length: gl::types::GLsizei,
                                   message: *const gl::types::GLchar,
                                   _user_param: *mut c_void)
{
    let message = unsafe { CStr::from_ptr(message).to_string_lossy() };

    match severity
    {
        gl::DEBUG_SEVERITY_HIGH => error!("{}", message),
        gl::DEBUG_SEVERITY_MEDIUM => warn!("{}", message),
        gl::DEBUG_SEVERITY_LOW => info!("{}", message),
        _ => debug!("{}", message)
    }
}
