use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use cgmath::Vector3;
use glw::{CurrentWindow, InputStack, Platform, SharedHandler};

use super::coord_systems::CubeScene;
use super::DemoConfig;
use crate::camera::{Camera, CameraController};
use crate::geometry;

/// The cubes again, seen through a camera steered with the keyboard and mouse.
pub fn run(platform: &mut Platform, window: &CurrentWindow, config: &DemoConfig) -> Result<()> {
    let gl = window.gl();
    let scene = CubeScene::new(gl, config)?;
    gl.enable_depth_test()?;

    let controller = Rc::new(RefCell::new(CameraController::new(Camera::new(Vector3::new(0.0, 0.0, 10.0)))));
    let handler: SharedHandler = controller.clone();

    let mut input = InputStack::new();
    let input = input.push(handler);

    if let Err(e) = window.disable_cursor() {
        log::warn!("{}; mouse look only works while the cursor is inside the window", e);
    }

    super::render_loop(platform, window, &input, |time| {
        super::clear(gl, true)?;

        let camera = *controller.borrow().camera();
        log::trace!("{}", camera);

        let projection = camera.projection(window.aspect_ratio());
        scene.draw(gl, &geometry::CAMERA_CUBE_POSITIONS, time, camera.view(), projection)
    })
}
