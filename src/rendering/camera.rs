use nalgebra_glm::{cross, normalize, vec3, TMat4, TVec3};
use crate::input_state::{InputState, MovementKeys};

pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 500.0;

/// Distance moved per second while a movement key is held
pub const MOVEMENT_SPEED: f32 = 5.0;

/// Degrees of rotation per unit of cursor movement
const ROTATION_SENSITIVITY: f32 = 0.1;
const PITCH_LIMIT: f32 = 89.0;

/// Perspective camera through which the scene is seen
pub struct Camera
{
    view_matrix: TMat4<f32>,
    perspective_matrix: TMat4<f32>,

    direction: TVec3<f32>,
    position: TVec3<f32>,
    up: TVec3<f32>,
    aspect: f32,

    yaw: f32,
    pitch: f32,
}

impl Camera
{
    /// Creates a camera at (0, 0, 5) looking down the negative Z axis
    ///
    /// `window_dimensions` - size of the window the camera renders to (width, height)
    pub fn new(window_dimensions: (i32, i32)) -> Camera
    {
        let position = vec3(0.0, 0.0, 5.0);
        let direction = vec3(0.0, 0.0, -1.0);
        let up = vec3(0.0, 1.0, 0.0);
        let aspect = aspect_ratio(window_dimensions.0, window_dimensions.1);

        Camera
        {
            view_matrix: nalgebra_glm::look_at(&position, &(position + direction), &up),
            perspective_matrix: perspective(aspect),
            direction,
            position,
            up,
            aspect,
            // Looking down -Z
            yaw: -90.0,
            pitch: 0.0,
        }
    }

    /// Moves and rotates the camera according to the input held this frame
    ///
    /// `dt` - elapsed time in seconds
    /// `input` - keys and cursor movement of the current frame
    pub fn update(&mut self, dt: f32, input: &InputState)
    {
        self.update_rotation(input);
        self.update_position(dt, input);
        self.update_view();
    }

    pub fn world_to_view_matrix(&self) -> TMat4<f32>
    {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> TMat4<f32>
    {
        self.perspective_matrix
    }

    /// Rebuilds the projection for a new aspect ratio, keeping the field of view and planes
    pub fn set_aspect(&mut self, aspect: f32)
    {
        self.aspect = aspect;
        self.perspective_matrix = perspective(aspect);
    }

    pub fn aspect(&self) -> f32
    {
        self.aspect
    }

    /// Sets the camera position and updates the view matrix
    pub fn move_to(&mut self, position: TVec3<f32>)
    {
        self.position = position;
        self.update_view();
    }

    #[cfg(test)]
    pub fn position(&self) -> TVec3<f32>
    {
        self.position
    }

    #[cfg(test)]
    pub fn direction(&self) -> TVec3<f32>
    {
        self.direction
    }

    fn update_position(&mut self, dt: f32, input: &InputState)
    {
        let movement_scale = MOVEMENT_SPEED * dt;
        let right = normalize(&cross(&self.direction, &self.up));

        if input.is_held(MovementKeys::Forward)
        {
            self.position += self.direction * movement_scale;
        }

        if input.is_held(MovementKeys::Backward)
        {
            self.position -= self.direction * movement_scale;
        }

        if input.is_held(MovementKeys::Left)
        {
            self.position -= right * movement_scale;
        }

        if input.is_held(MovementKeys::Right)
        {
            self.position += right * movement_scale;
        }

        if input.is_held(MovementKeys::Down)
        {
            self.position -= self.up * movement_scale;
        }

        if input.is_held(MovementKeys::Up)
        {
            self.position += self.up * movement_scale;
        }
    }

    /// Rotate camera based off of cursor movement while the middle button is held
    fn update_rotation(&mut self, input: &InputState)
    {
        if !input.middle_button_down()
        {
            return;
        }

        let (x_offset, y_offset) = input.cursor_delta();

        self.yaw += x_offset * ROTATION_SENSITIVITY;
        self.pitch = (self.pitch + y_offset * ROTATION_SENSITIVITY).max(-PITCH_LIMIT).min(PITCH_LIMIT);

        self.direction = normalize(&vec3
            (
                self.yaw.to_radians().cos() * self.pitch.to_radians().cos(),
                self.pitch.to_radians().sin(),
                self.yaw.to_radians().sin() * self.pitch.to_radians().cos()
            ));
    }

    fn update_view(&mut self)
    {
        self.view_matrix = nalgebra_glm::look_at(&self.position, &(self.position + self.direction), &self.up);
    }
}

/// Aspect ratio of the window. A minimised window reports a zero size, which falls back to one
pub fn aspect_ratio(width: i32, height: i32) -> f32
{
    if width <= 0 || height <= 0
    {
        1.0
    }
    else
    {
        width as f32 / height as f32
    }
}

fn perspective(aspect: f32) -> TMat4<f32>
{
    nalgebra_glm::perspective(aspect, FIELD_OF_VIEW_DEGREES.to_radians(), NEAR_PLANE, FAR_PLANE)
}

#[cfg(test)]
mod tests
{
    use nalgebra_glm::{vec3, vec4};
    use crate::input_state::{InputState, MovementKeys};
    use crate::rendering::animation::camera_world_position;
    use crate::rendering::camera::{aspect_ratio, Camera, MOVEMENT_SPEED};

    const TOLERANCE: f32 = 1e-4;

    #[test]
    fn starts_behind_the_origin_looking_at_it()
    {
        let camera = Camera::new((1280, 720));

        assert!((camera.position() - vec3(0.0, 0.0, 5.0)).norm() < TOLERANCE);
        assert!((camera.direction() - vec3(0.0, 0.0, -1.0)).norm() < TOLERANCE);
        assert!((camera_world_position(&camera.world_to_view_matrix()) - camera.position()).norm() < TOLERANCE);

        // The origin is straight ahead, five units into the screen
        let origin_in_view = camera.world_to_view_matrix() * vec4(0.0, 0.0, 0.0, 1.0);
        assert!((origin_in_view - vec4(0.0, 0.0, -5.0, 1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn movement_scales_with_time()
    {
        let mut camera = Camera::new((800, 600));
        let mut input = InputState::new();
        input.set_movement_key(MovementKeys::Forward, true);

        camera.update(0.5, &input);
        assert!((camera.position() - vec3(0.0, 0.0, 5.0 - MOVEMENT_SPEED * 0.5)).norm() < TOLERANCE);

        camera.update(0.0, &input);
        assert!((camera.position() - vec3(0.0, 0.0, 5.0 - MOVEMENT_SPEED * 0.5)).norm() < TOLERANCE);
    }

    #[test]
    fn strafe_and_vertical_movement()
    {
        let mut camera = Camera::new((800, 600));
        let mut input = InputState::new();
        input.set_movement_key(MovementKeys::Right, true);
        input.set_movement_key(MovementKeys::Up, true);

        camera.update(1.0, &input);
        assert!((camera.position() - vec3(MOVEMENT_SPEED, MOVEMENT_SPEED, 5.0)).norm() < TOLERANCE);
    }

    #[test]
    fn pitch_is_clamped()
    {
        let mut camera = Camera::new((800, 600));
        let mut input = InputState::new();
        input.set_middle_button(true);
        input.cursor_moved(0.0, 0.0);
        input.cursor_moved(0.0, -10_000.0);

        camera.update(0.0, &input);

        let direction = camera.direction();
        assert!(direction.y < 1.0);
        assert!((direction.y - 89.0_f32.to_radians().sin()).abs() < TOLERANCE);
    }

    #[test]
    fn resize_changes_only_the_projection()
    {
        let mut camera = Camera::new((800, 600));
        let view = camera.world_to_view_matrix();
        let projection = camera.projection_matrix();

        camera.set_aspect(aspect_ratio(1920, 1080));

        assert_eq!(camera.world_to_view_matrix(), view);
        assert_ne!(camera.projection_matrix(), projection);
        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < TOLERANCE);
        assert_eq!(aspect_ratio(1920, 0), 1.0);
    }

    #[test]
    fn move_to_updates_the_view()
    {
        let mut camera = Camera::new((800, 600));
        camera.move_to(vec3(1.0, 2.0, 3.0));
        assert!((camera_world_position(&camera.world_to_view_matrix()) - vec3(1.0, 2.0, 3.0)).norm() < TOLERANCE);
    }
}
