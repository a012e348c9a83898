//! One module per tutorial chapter. Each builds its scene against the current window and renders
//! until the window is told to close.

mod camera;
mod coord_systems;
mod shaders;
mod transformation;
mod triangle;
mod two_triangles;
mod window;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cgmath::Matrix4;
use glw::{Context, CurrentWindow, InputStack, Platform, Texture, TextureImage, WindowConfig};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Demo {
    Window,
    Triangle,
    TwoTriangles,
    Shaders,
    Transformation,
    CoordSystems,
    Camera,
}

impl Demo {
    pub const ALL: [Demo; 7] = [
        Demo::Window,
        Demo::Triangle,
        Demo::TwoTriangles,
        Demo::Shaders,
        Demo::Transformation,
        Demo::CoordSystems,
        Demo::Camera,
    ];

    /// The subcommand that runs it.
    pub fn name(self) -> &'static str {
        match self {
            Demo::Window => "window",
            Demo::Triangle => "triangle",
            Demo::TwoTriangles => "two-triangles",
            Demo::Shaders => "shaders",
            Demo::Transformation => "transformation",
            Demo::CoordSystems => "coord-systems",
            Demo::Camera => "camera",
        }
    }

    pub fn from_name(name: &str) -> Option<Demo> {
        Self::ALL.iter().copied().find(|demo| demo.name() == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            Demo::Window => "window",
            Demo::Triangle => "first triangle",
            Demo::TwoTriangles => "two triangles",
            Demo::Shaders => "shaders",
            Demo::Transformation => "transformation",
            Demo::CoordSystems => "textures",
            Demo::Camera => "camera",
        }
    }

    pub fn default_size(self) -> (u32, u32) {
        match self {
            Demo::Window | Demo::Triangle | Demo::CoordSystems | Demo::Camera => (800, 800),
            Demo::TwoTriangles | Demo::Shaders | Demo::Transformation => (800, 600),
        }
    }
}

/// Everything a demo needs to know before it starts.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub demo: Demo,
    pub window: WindowConfig,
    pub shaders: PathBuf,
    pub textures: PathBuf,
    pub log_filter: Option<String>,
}

impl DemoConfig {
    pub fn new(demo: Demo) -> Self {
        let (width, height) = demo.default_size();

        Self {
            demo,
            window: WindowConfig::new(demo.title(), width, height),
            shaders: PathBuf::from("shaders"),
            textures: PathBuf::from("textures"),
            log_filter: None,
        }
    }

    pub fn shader(&self, file: &str) -> PathBuf {
        self.shaders.join(file)
    }

    pub fn texture(&self, file: &str) -> PathBuf {
        self.textures.join(file)
    }
}

/// Opens the window and runs the configured demo in it.
pub fn run(config: &DemoConfig) -> Result<()> {
    log::info!("running the {} demo", config.demo.name());

    let mut platform = Platform::new().context("cannot connect to the windowing system")?;
    let window = platform
        .create_window(&config.window)?
        .make_current()
        .context("cannot make the GL context current")?;

    let (width, height) = window.size();
    window.gl().viewport(0, 0, width, height)?;

    let result = match config.demo {
        Demo::Window => window::run(&mut platform, &window),
        Demo::Triangle => triangle::run(&mut platform, &window, config),
        Demo::TwoTriangles => two_triangles::run(&mut platform, &window, config),
        Demo::Shaders => shaders::run(&mut platform, &window, config),
        Demo::Transformation => transformation::run(&mut platform, &window, config),
        Demo::CoordSystems => coord_systems::run(&mut platform, &window, config),
        Demo::Camera => camera::run(&mut platform, &window, config),
    };
    result.with_context(|| format!("{} demo failed", config.demo.name()))?;

    log::info!("window \"{}\" closed", window.title());
    Ok(())
}

/// Calls `frame` with the time in seconds, then presents and handles input, until the window
/// should close.
fn render_loop<F>(platform: &mut Platform, window: &CurrentWindow, input: &InputStack, mut frame: F) -> Result<()>
where
    F: FnMut(f32) -> Result<()>,
{
    while !window.should_close() {
        frame(platform.time() as f32)?;

        window.swap_buffers()?;
        platform.poll_events(window, input);
    }

    Ok(())
}

fn clear(gl: &Context, depth: bool) -> Result<()> {
    gl.clear_color(0.2, 0.3, 0.3, 1.0)?;
    gl.clear(depth)?;
    Ok(())
}

fn load_texture<'gl>(gl: &'gl Context, path: &Path) -> Result<Texture<'gl>> {
    let image = TextureImage::load(path).with_context(|| format!("cannot load {}", path.display()))?;
    Ok(Texture::new(gl, &image)?)
}

/// Column-major, the way `glUniformMatrix4fv` takes it.
fn columns(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix.into()
}
