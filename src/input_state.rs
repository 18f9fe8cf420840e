/// The direction that a camera should move in
#[repr(usize)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MovementKeys
{
    Backward,
    Forward,
    Left,
    Right,
    Down,
    Up,
}

/// User input relevant to the scene, gathered by the window over one frame. Keys stay held between
/// frames until released; the cursor delta only covers the current frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState
{
    movement_keys: [bool; 6],
    middle_button_down: bool,
    cursor_delta: (f32, f32),
    last_cursor_pos: Option<(f32, f32)>,
}

impl InputState
{
    pub fn new() -> InputState
    {
        InputState::default()
    }

    pub fn set_movement_key(&mut self, key: MovementKeys, pressed: bool)
    {
        self.movement_keys[key as usize] = pressed;
    }

    pub fn is_held(&self, key: MovementKeys) -> bool
    {
        self.movement_keys[key as usize]
    }

    /// Cursor movement only counts while the middle button is held. Releasing it forgets the last
    /// cursor position so the next drag does not jump
    pub fn set_middle_button(&mut self, down: bool)
    {
        self.middle_button_down = down;

        if !down
        {
            self.last_cursor_pos = None;
        }
    }

    pub fn middle_button_down(&self) -> bool
    {
        self.middle_button_down
    }

    /// Records a new cursor position, accumulating the movement since the previous one
    ///
    /// `x` - horizontal cursor position in window coordinates
    /// `y` - vertical cursor position in window coordinates; grows downwards
    pub fn cursor_moved(&mut self, x: f32, y: f32)
    {
        if self.middle_button_down
        {
            if let Some((last_x, last_y)) = self.last_cursor_pos
            {
                self.cursor_delta.0 += x - last_x;
                self.cursor_delta.1 += last_y - y;
            }

            self.last_cursor_pos = Some((x, y));
        }
    }

    /// Movement of the cursor this frame while dragging; positive y is upwards
    pub fn cursor_delta(&self) -> (f32, f32)
    {
        self.cursor_delta
    }

    /// Call at the start of every frame, before new events are collected
    pub fn begin_frame(&mut self)
    {
        self.cursor_delta = (0.0, 0.0);
    }
}
