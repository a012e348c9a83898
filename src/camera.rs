//! A free-flying camera and the input handler that steers it.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;

use cgmath::{perspective, EuclideanSpace, Matrix4, Point3, Rad, Vector3};
use glw::{InputHandler, Key, KeyAction, Propagation, ScrollDelta, WindowFlags};

/// Narrowest field of view the camera zooms to, half a degree.
pub const MIN_FOV: f32 = FRAC_PI_2 / 180.0;
pub const MAX_FOV: f32 = FRAC_PI_2;

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Position plus three rotations, all angles in radians.
///
/// With every angle at zero the camera looks down the negative z axis, with y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    position: Vector3<f32>,
    pitch: f32,
    yaw: f32,
    roll: f32,
    fov: f32,
}

impl Camera {
    pub fn new(position: Vector3<f32>) -> Self {
        Self { position, pitch: 0.0, yaw: 0.0, roll: 0.0, fov: FRAC_PI_4 }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Ignores pitches of a quarter turn or more either way, which would flip the view over.
    pub fn set_pitch(&mut self, pitch: f32) -> bool {
        let accepted = -FRAC_PI_2 < pitch && pitch < FRAC_PI_2;
        if accepted {
            self.pitch = pitch;
        }

        accepted
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn set_roll(&mut self, roll: f32) {
        self.roll = roll;
    }

    /// Vertical field of view.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Turns a vector about the y axis by the camera's yaw.
    fn apply_yaw(&self, v: Vector3<f32>) -> Vector3<f32> {
        let (sin, cos) = self.yaw.sin_cos();
        Vector3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos)
    }

    /// Unit vector pointing from what the camera looks at back to the camera.
    pub fn direction(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_roll, cos_roll) = self.roll.sin_cos();

        self.apply_yaw(Vector3::new(sin_pitch * sin_roll, sin_pitch * cos_roll, cos_pitch))
    }

    pub fn up(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_roll, cos_roll) = self.roll.sin_cos();

        self.apply_yaw(Vector3::new(sin_roll, cos_roll * cos_pitch, -sin_roll * sin_pitch))
    }

    pub fn move_forward(&mut self, speed: f32) {
        self.position -= self.direction() * speed;
    }

    pub fn move_backward(&mut self, speed: f32) {
        self.move_forward(-speed);
    }

    pub fn move_left(&mut self, speed: f32) {
        self.position -= self.up().cross(self.direction()) * speed;
    }

    pub fn move_right(&mut self, speed: f32) {
        self.move_left(-speed);
    }

    /// Narrows the field of view by `degrees`, or widens it for negative values.
    pub fn zoom(&mut self, degrees: f32) {
        self.fov = (self.fov - degrees.to_radians()).max(MIN_FOV).min(MAX_FOV);
    }

    pub fn view(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye - self.direction(), self.up())
    }

    pub fn projection(&self, aspect_ratio: f32) -> Matrix4<f32> {
        perspective(Rad(self.fov), aspect_ratio, NEAR, FAR)
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position();
        write!(
            f,
            "pos = ({:.2}, {:.2}, {:.2}); roll = {:.1}; pitch = {:.1}; yaw = {:.1}; fov = {:.1}",
            p.x,
            p.y,
            p.z,
            self.roll.to_degrees(),
            self.pitch.to_degrees(),
            self.yaw.to_degrees(),
            self.fov.to_degrees(),
        )
    }
}

/// Steers a [`Camera`]: W/S move, A/D strafe, Q/E roll, the mouse looks around and the wheel
/// zooms. Escape closes the window.
#[derive(Debug)]
pub struct CameraController {
    camera: Camera,
    speed: f32,
    sensitivity: f32,
    roll_step: f32,
}

impl CameraController {
    pub fn new(camera: Camera) -> Self {
        Self { camera, speed: 0.1, sensitivity: 0.005, roll_step: 0.2 }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

impl InputHandler for CameraController {
    fn key(&mut self, window: &WindowFlags, key: Key, _scancode: u32, action: KeyAction) -> Propagation {
        if key == Key::Escape {
            if action == KeyAction::Press {
                window.set_should_close(true);
            }
            return Propagation::Stop;
        }

        if action == KeyAction::Release {
            return Propagation::Continue;
        }

        let camera = &mut self.camera;
        match key {
            Key::W => camera.move_forward(self.speed),
            Key::S => camera.move_backward(self.speed),
            Key::A => camera.move_left(self.speed),
            Key::D => camera.move_right(self.speed),
            Key::Q => camera.set_roll(camera.roll() + self.roll_step),
            Key::E => camera.set_roll(camera.roll() - self.roll_step),
            _ => return Propagation::Continue,
        }

        Propagation::Stop
    }

    fn mouse_motion(&mut self, _window: &WindowFlags, dx: f64, dy: f64) -> Propagation {
        let yaw = self.camera.yaw() + self.sensitivity * dx as f32;
        let pitch = self.camera.pitch() + self.sensitivity * dy as f32;

        self.camera.set_yaw(yaw);
        self.camera.set_pitch(pitch);
        Propagation::Stop
    }

    fn scroll(&mut self, _window: &WindowFlags, delta: ScrollDelta) -> Propagation {
        let (_, lines) = delta.lines();
        self.camera.zoom(lines as f32);
        Propagation::Stop
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::{InnerSpace, Vector4};

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{:?} != {:?}", a, b);
    }

    fn start() -> Camera {
        Camera::new(Vector3::new(0.0, 0.0, 10.0))
    }

    #[test]
    fn level_camera_looks_down_negative_z() {
        let camera = start();

        assert_close(camera.direction(), Vector3::unit_z());
        assert_close(camera.up(), Vector3::unit_y());
    }

    #[test]
    fn moving_follows_the_view() {
        let mut camera = start();

        camera.move_forward(1.0);
        assert_close(camera.position(), Vector3::new(0.0, 0.0, 9.0));

        camera.move_backward(2.0);
        assert_close(camera.position(), Vector3::new(0.0, 0.0, 11.0));
    }

    #[test]
    fn strafing_is_sideways() {
        let mut camera = start();

        camera.move_left(1.0);
        assert_close(camera.position(), Vector3::new(-1.0, 0.0, 10.0));

        camera.move_right(2.0);
        assert_close(camera.position(), Vector3::new(1.0, 0.0, 10.0));
    }

    #[test]
    fn yaw_turns_about_y() {
        let mut camera = start();
        camera.set_yaw(FRAC_PI_2);

        assert_close(camera.direction(), -Vector3::unit_x());
        assert_close(camera.up(), Vector3::unit_y());
    }

    #[test]
    fn pitch_stays_inside_a_quarter_turn() {
        let mut camera = start();

        assert!(camera.set_pitch(1.0));
        assert!(!camera.set_pitch(FRAC_PI_2));
        assert!(!camera.set_pitch(-FRAC_PI_2));
        assert!(!camera.set_pitch(3.0));
        assert_eq!(camera.pitch(), 1.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = start();

        camera.zoom(10.0);
        assert!((camera.fov() - 35f32.to_radians()).abs() < 1e-5);

        camera.zoom(1000.0);
        assert_eq!(camera.fov(), MIN_FOV);

        camera.zoom(-1000.0);
        assert_eq!(camera.fov(), MAX_FOV);
    }

    #[test]
    fn view_moves_the_eye_to_the_origin() {
        let camera = start();
        let eye = camera.view() * Vector4::new(0.0, 0.0, 10.0, 1.0);
        let ahead = camera.view() * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert_close(eye.truncate(), Vector3::new(0.0, 0.0, 0.0));
        // Ten units in front of the camera, which looks down -z in view space.
        assert_close(ahead.truncate(), Vector3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn controller_moves_on_press_and_repeat_only() {
        let flags = WindowFlags::default();
        let mut controller = CameraController::new(start());

        assert_eq!(controller.key(&flags, Key::W, 0, KeyAction::Press), Propagation::Stop);
        controller.key(&flags, Key::W, 0, KeyAction::Repeat);
        assert_eq!(controller.key(&flags, Key::W, 0, KeyAction::Release), Propagation::Continue);

        assert_close(controller.camera().position(), Vector3::new(0.0, 0.0, 9.8));
    }

    #[test]
    fn controller_rolls_and_ignores_other_keys() {
        let flags = WindowFlags::default();
        let mut controller = CameraController::new(start());

        controller.key(&flags, Key::Q, 0, KeyAction::Press);
        assert!((controller.camera().roll() - 0.2).abs() < 1e-6);

        assert_eq!(controller.key(&flags, Key::Space, 0, KeyAction::Press), Propagation::Continue);
    }

    #[test]
    fn controller_closes_on_escape() {
        let flags = WindowFlags::default();
        let mut controller = CameraController::new(start());

        controller.key(&flags, Key::Escape, 0, KeyAction::Press);
        assert!(flags.should_close());
    }

    #[test]
    fn mouse_turns_and_wheel_zooms() {
        let flags = WindowFlags::default();
        let mut controller = CameraController::new(start());

        controller.mouse_motion(&flags, 100.0, 40.0);
        assert!((controller.camera().yaw() - 0.5).abs() < 1e-6);
        assert!((controller.camera().pitch() - 0.2).abs() < 1e-6);

        // Too far down is ignored; yaw still turns.
        controller.mouse_motion(&flags, 0.0, 1000.0);
        assert!((controller.camera().pitch() - 0.2).abs() < 1e-6);

        controller.scroll(&flags, ScrollDelta::Lines { x: 0.0, y: 5.0 });
        assert!((controller.camera().fov() - 40f32.to_radians()).abs() < 1e-5);
    }
}
