//! First-person camera: state, projection, matrix composition and key input.
//!
//! The camera is a plain value owned by the application state. Keyboard input
//! mutates it through [`CameraController`] and every frame [`compose`] turns
//! it, together with an instance's [`Transform`], into the matrix the shader
//! multiplies positions with.

use cgmath::{Deg, Matrix4, Vector3, perspective};
use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::data_structures::instance::Transform;

/// cgmath produces OpenGL clip space (z in [-1, 1]); wgpu expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const MIN_FOVY: f32 = 1.0;
pub const MAX_FOVY: f32 = 179.0;

/// Amount every key press changes the camera by (units or degrees).
const STEP: f32 = 1.0;

/// Free-look camera state. Angles are kept in degrees and converted at use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub eye_distance: f32,
    pub lateral_offset: f32,
    fovy: Deg<f32>,
}

impl Camera {
    pub fn new<F: Into<Deg<f32>>>(eye_distance: f32, fovy: F) -> Self {
        Self {
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            eye_distance,
            lateral_offset: 0.0,
            fovy: clamp_fovy(fovy.into()),
        }
    }

    /// Vertical field of view, always within `[MIN_FOVY, MAX_FOVY]` degrees.
    pub fn fovy(&self) -> Deg<f32> {
        self.fovy
    }

    pub fn set_fovy<F: Into<Deg<f32>>>(&mut self, fovy: F) {
        self.fovy = clamp_fovy(fovy.into());
    }

    /// Apply a single key press.
    pub fn apply(&mut self, key: CameraKey) {
        match key {
            CameraKey::Left => self.lateral_offset -= STEP,
            CameraKey::Right => self.lateral_offset += STEP,
            CameraKey::Forward => self.eye_distance -= STEP,
            CameraKey::Backward => self.eye_distance += STEP,
            CameraKey::YawLeft => self.yaw -= Deg(STEP),
            CameraKey::YawRight => self.yaw += Deg(STEP),
            CameraKey::PitchUp => {
                self.pitch -= Deg(STEP);
                log::debug!("pitch {:?}", self.pitch);
            }
            CameraKey::PitchDown => {
                self.pitch += Deg(STEP);
                log::debug!("pitch {:?}", self.pitch);
            }
            CameraKey::ZoomIn => self.set_fovy(self.fovy - Deg(STEP)),
            CameraKey::ZoomOut => self.set_fovy(self.fovy + Deg(STEP)),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(150.0, Deg(45.0))
    }
}

fn clamp_fovy(fovy: Deg<f32>) -> Deg<f32> {
    Deg(fovy.0.clamp(MIN_FOVY, MAX_FOVY))
}

/// Perspective parameters that don't change with camera input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub const ZNEAR: f32 = 0.1;
    pub const ZFAR: f32 = 1000.0;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: aspect(width, height),
            znear: Self::ZNEAR,
            zfar: Self::ZFAR,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self, fovy: Deg<f32>) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(fovy, self.aspect, self.znear, self.zfar)
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Projection and view part of the composition: everything before the model transform.
pub fn view_projection(camera: &Camera, projection: &Projection) -> Matrix4<f32> {
    projection.calc_matrix(camera.fovy)
        * Matrix4::from_angle_z(Deg(180.0))
        * Matrix4::from_translation(Vector3::new(camera.lateral_offset, 0.0, -camera.eye_distance))
        * Matrix4::from_angle_y(camera.yaw)
        * Matrix4::from_angle_x(camera.pitch)
}

/// Compose the full matrix for one instance.
///
/// The chain is evaluated left to right, each factor right-multiplied onto
/// the running product: projection, 180° flip about Z, camera translation,
/// yaw, pitch, instance translation, instance rotation X/Y/Z, instance scale.
/// The order matters and must not be rearranged.
pub fn compose(camera: &Camera, projection: &Projection, transform: &Transform) -> Matrix4<f32> {
    view_projection(camera, projection)
        * Matrix4::from_translation(transform.translation)
        * Matrix4::from_angle_x(transform.rotation.x)
        * Matrix4::from_angle_y(transform.rotation.y)
        * Matrix4::from_angle_z(transform.rotation.z)
        * Matrix4::from_nonuniform_scale(transform.scale.x, transform.scale.y, transform.scale.z)
}

/// Keys that move the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraKey {
    /// A
    Left,
    /// D
    Right,
    /// W
    Forward,
    /// S
    Backward,
    /// Left arrow
    YawLeft,
    /// Right arrow
    YawRight,
    /// Up arrow
    PitchUp,
    /// Down arrow
    PitchDown,
    /// Z
    ZoomIn,
    /// C
    ZoomOut,
}

impl CameraKey {
    /// Map a DOM `keyCode` to a camera key.
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            65 => Some(Self::Left),
            68 => Some(Self::Right),
            87 => Some(Self::Forward),
            83 => Some(Self::Backward),
            37 => Some(Self::YawLeft),
            39 => Some(Self::YawRight),
            38 => Some(Self::PitchUp),
            40 => Some(Self::PitchDown),
            90 => Some(Self::ZoomIn),
            67 => Some(Self::ZoomOut),
            _ => None,
        }
    }
}

impl TryFrom<KeyCode> for CameraKey {
    type Error = KeyCode;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        match code {
            KeyCode::KeyA => Ok(Self::Left),
            KeyCode::KeyD => Ok(Self::Right),
            KeyCode::KeyW => Ok(Self::Forward),
            KeyCode::KeyS => Ok(Self::Backward),
            KeyCode::ArrowLeft => Ok(Self::YawLeft),
            KeyCode::ArrowRight => Ok(Self::YawRight),
            KeyCode::ArrowUp => Ok(Self::PitchUp),
            KeyCode::ArrowDown => Ok(Self::PitchDown),
            KeyCode::KeyZ => Ok(Self::ZoomIn),
            KeyCode::KeyC => Ok(Self::ZoomOut),
            other => Err(other),
        }
    }
}

/// Translates window keyboard events into camera changes.
///
/// Every delivered press counts, key repeats included; there is no throttling.
#[derive(Clone, Copy, Debug, Default)]
pub struct CameraController;

impl CameraController {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if the event changed the camera.
    pub fn handle_window_events(&self, camera: &mut Camera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.handle_key(camera, *code),
            _ => false,
        }
    }

    pub fn handle_key(&self, camera: &mut Camera, code: KeyCode) -> bool {
        match CameraKey::try_from(code) {
            Ok(key) => {
                camera.apply(key);
                true
            }
            Err(_) => false,
        }
    }
}
