use std::f32::consts::PI;
use nalgebra_glm::{inverse, rotation, scaling, translation, vec3, TMat4, TVec3};

/// Angular velocity of the shared scene angle that spins the ground quad and moves the light
pub const SCENE_ANGULAR_VELOCITY: f32 = PI / 8.0;

pub const SUN_ROTATION_SPEED: f32 = 0.5;
pub const EARTH_ORBIT_SPEED: f32 = 1.0;
pub const EARTH_ROTATION_SPEED: f32 = 3.0;
pub const MOON_ORBIT_SPEED: f32 = 5.0;
pub const MOON_ROTATION_SPEED: f32 = 0.5;

pub const EARTH_ORBIT_RADIUS: f32 = 4.0;
pub const MOON_ORBIT_RADIUS: f32 = 1.5;

pub const QUAD_SCALE: f32 = 1.5;
pub const SUN_SCALE: f32 = 2.0;
pub const EARTH_SCALE: f32 = 0.7;
pub const MOON_SCALE: f32 = 0.4;

const LIGHT_ORBIT_RADIUS: f32 = 5.0;
const LIGHT_HEIGHT: f32 = 3.0;

const SUN: usize = 0;
const EARTH: usize = 1;
const MOON: usize = 2;

/// One object in the sun -> earth -> moon hierarchy. The local frame places the object relative to
/// its parent's frame; the scale only applies to the object itself and is not passed to children
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneNode
{
    pub parent: Option<usize>,
    pub local_frame: TMat4<f32>,
    pub scale: f32,
}

/// Model-to-world matrices of every object drawn in the scene
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneTransforms
{
    pub quad: TMat4<f32>,
    pub sponza: TMat4<f32>,
    pub sun: TMat4<f32>,
    pub earth: TMat4<f32>,
    pub moon: TMat4<f32>,
}

/// Animation state of the scene. Every angle only ever changes by its rate times the elapsed time,
/// so the same sequence of time steps always produces the same transforms
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SolarSystem
{
    pub scene_angle: f32,
    pub sun_rotation: f32,
    pub earth_orbit: f32,
    pub earth_rotation: f32,
    pub moon_orbit: f32,
    pub moon_rotation: f32,
}

impl SolarSystem
{
    /// Advances every angle by its rate
    ///
    /// `dt` - elapsed time in seconds
    pub fn advance(&mut self, dt: f32)
    {
        self.scene_angle += SCENE_ANGULAR_VELOCITY * dt;
        self.sun_rotation += SUN_ROTATION_SPEED * dt;
        self.earth_orbit += EARTH_ORBIT_SPEED * dt;
        self.earth_rotation += EARTH_ROTATION_SPEED * dt;
        self.moon_orbit += MOON_ORBIT_SPEED * dt;
        self.moon_rotation += MOON_ROTATION_SPEED * dt;
    }

    /// The sun, earth and moon as a hierarchy, parents first
    pub fn nodes(&self) -> [SceneNode; 3]
    {
        let mut nodes = [SceneNode { parent: None, local_frame: nalgebra_glm::identity(), scale: 1.0 }; 3];

        nodes[SUN] = SceneNode
        {
            parent: None,
            local_frame: rotation(self.sun_rotation, &up()),
            scale: SUN_SCALE,
        };

        nodes[EARTH] = SceneNode
        {
            parent: Some(SUN),
            local_frame: translation(&orbit_offset(EARTH_ORBIT_RADIUS, self.earth_orbit)) * rotation(self.earth_rotation, &up()),
            scale: EARTH_SCALE,
        };

        nodes[MOON] = SceneNode
        {
            parent: Some(EARTH),
            local_frame: translation(&orbit_offset(MOON_ORBIT_RADIUS, self.moon_orbit)) * rotation(self.moon_rotation, &up()),
            scale: MOON_SCALE,
        };

        nodes
    }

    pub fn transforms(&self) -> SceneTransforms
    {
        let world = world_transforms(&self.nodes());

        SceneTransforms
        {
            quad: quad_transform(self.scene_angle),
            sponza: sponza_transform(),
            sun: world[SUN],
            earth: world[EARTH],
            moon: world[MOON],
        }
    }

    pub fn light_position(&self) -> TVec3<f32>
    {
        light_position(self.scene_angle)
    }
}

/// Computes the model-to-world matrix of every node. The frame of a node is its parent's frame
/// followed by its own local frame; the node's scale is applied last
///
/// `nodes` - the hierarchy; a node's parent must come before it
pub fn world_transforms<const N: usize>(nodes: &[SceneNode; N]) -> [TMat4<f32>; N]
{
    let mut frames = [nalgebra_glm::identity(); N];
    let mut transforms = [nalgebra_glm::identity(); N];

    for (i, node) in nodes.iter().enumerate()
    {
        frames[i] = match node.parent
        {
            Some(parent) =>
                {
                    debug_assert!(parent < i, "node {} is listed before its parent {}", i, parent);
                    frames[parent] * node.local_frame
                },
            None => node.local_frame
        };

        transforms[i] = frames[i] * scaling(&vec3(node.scale, node.scale, node.scale));
    }

    transforms
}

/// Position on a circular orbit in the horizontal plane
pub fn orbit_offset(radius: f32, angle: f32) -> TVec3<f32>
{
    vec3(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// The ground quad spins around the vertical axis, in the opposite direction of the light
pub fn quad_transform(scene_angle: f32) -> TMat4<f32>
{
    translation(&vec3(0.0, 0.0, 0.0)) * rotation(-scene_angle, &up()) * scaling(&vec3(QUAD_SCALE, QUAD_SCALE, QUAD_SCALE))
}

pub fn sponza_transform() -> TMat4<f32>
{
    translation(&vec3(0.0, -5.0, 0.0)) * rotation(PI / 2.0, &up()) * scaling(&vec3(0.05, 0.05, 0.05))
}

/// The light circles the scene centre driven by the same angle as the ground quad
pub fn light_position(scene_angle: f32) -> TVec3<f32>
{
    vec3(LIGHT_ORBIT_RADIUS * scene_angle.cos(), LIGHT_HEIGHT, LIGHT_ORBIT_RADIUS * scene_angle.sin())
}

/// World position of the camera, taken from the inverse of its world-to-view matrix
pub fn camera_world_position(world_to_view: &TMat4<f32>) -> TVec3<f32>
{
    position_of(&inverse(world_to_view))
}

/// Translation part of a transform
pub fn position_of(transform: &TMat4<f32>) -> TVec3<f32>
{
    vec3(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)])
}

fn up() -> TVec3<f32>
{
    vec3(0.0, 1.0, 0.0)
}
