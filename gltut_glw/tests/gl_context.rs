//! Runs the wrappers against a real driver. Needs a display, so it's ignored by default:
//!
//! ```sh
//! cargo test -p glw -- --ignored
//! ```
//!
//! The windowing layer only allows one event loop per process, so everything shares a single
//! hidden window and a single test.
#![cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]

use glw::{
    Context, CurrentWindow, ElementBuffer, Error, InputStack, Platform, Program, Shader, ShaderKind, VertexArray,
    VertexAttribute, VertexBuffer, WindowConfig,
};

const PASS_THROUGH: &str = "#version 330 core
layout (location = 0) in vec3 position;
void main() {
    gl_Position = vec4(position, 1.0);
}
";

const FLAT_COLOR: &str = "#version 330 core
out vec4 frag_color;
uniform vec4 color;
uniform float unused;
void main() {
    frag_color = color;
}
";

const READS_MISSING_INPUT: &str = "#version 330 core
in vec3 vertex_color;
out vec4 frag_color;
void main() {
    frag_color = vec4(vertex_color, 1.0);
}
";

fn valid_sources_compile(gl: &Context) {
    let vertex = Shader::vertex(gl, PASS_THROUGH).unwrap();
    let fragment = Shader::fragment(gl, FLAT_COLOR).unwrap();

    assert_ne!(vertex.id(), 0);
    assert_ne!(fragment.id(), 0);
    assert_eq!(fragment.kind(), ShaderKind::Fragment);
}

fn invalid_source_reports_the_log(gl: &Context) {
    let broken = "#version 330 core\nvoid main() { gl_Position = vec4(0.0) }\n";

    match Shader::vertex(gl, broken) {
        Err(Error::Compile { kind, log }) => {
            assert_eq!(kind, ShaderKind::Vertex);
            assert!(!log.is_empty());
        }
        other => panic!("expected a compile error, got {:?}", other),
    }

    gl.check_error("after failed compile").unwrap();
}

fn mismatched_stages_fail_to_link(gl: &Context) {
    let vertex = Shader::vertex(gl, PASS_THROUGH).unwrap();
    let fragment = Shader::fragment(gl, READS_MISSING_INPUT).unwrap();

    match Program::link(gl, &[&vertex, &fragment]) {
        Err(Error::Link { log }) => assert!(!log.is_empty()),
        other => panic!("expected a link error, got {:?}", other),
    }
}

fn uniforms_are_looked_up_by_name(gl: &Context) {
    let vertex = Shader::vertex(gl, PASS_THROUGH).unwrap();
    let fragment = Shader::fragment(gl, FLAT_COLOR).unwrap();
    let program = Program::link(gl, &[&vertex, &fragment]).unwrap();

    assert!(program.uniform_location("color").is_ok());
    assert!(matches!(
        program.uniform_location("colour"),
        Err(Error::UniformNotFound { ref name }) if name == "colour"
    ));

    // Declared but never read, so the linker drops it.
    assert!(program.uniform_location("unused").is_err());
    assert_eq!(program.active_uniforms(), vec![String::from("color")]);
}

fn draws_a_triangle(gl: &Context) {
    let vertex = Shader::vertex(gl, PASS_THROUGH).unwrap();
    let fragment = Shader::fragment(gl, FLAT_COLOR).unwrap();
    let program = Program::link(gl, &[&vertex, &fragment]).unwrap();

    let positions: [[f32; 3]; 3] = [[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]];
    let vao = VertexArray::new(gl).unwrap();
    vao.bind().unwrap();
    let vbo = VertexBuffer::new(gl, &positions).unwrap();
    let ebo = ElementBuffer::new(gl, &[0, 1, 2]).unwrap();
    vao.attribute(&VertexAttribute::of::<[f32; 3]>(0, 3, 0)).unwrap();

    assert_eq!(vbo.len(), 3);
    assert_eq!(ebo.len(), 3);

    gl.clear_color(0.2, 0.3, 0.3, 1.0).unwrap();
    gl.clear(false).unwrap();

    let active = program.apply().unwrap();
    let color = program.uniform_location("color").unwrap();
    active.set_uniform(color, (1.0f32, 1.0f32, 0.0f32, 1.0f32)).unwrap();

    gl.draw_arrays(0, vbo.len()).unwrap();
    gl.draw_elements(ebo.len()).unwrap();
    vao.unbind();
}

#[test]
#[ignore = "needs a display and an OpenGL 3.3 driver"]
fn wrappers_against_a_real_context() {
    let mut platform = Platform::new_any_thread().unwrap();
    let config = WindowConfig { visible: false, ..WindowConfig::new("glw test", 800, 800) };
    let window = platform.create_window(&config).unwrap().make_current().unwrap();

    {
        let gl = window.gl();
        assert!(!gl.version().is_empty());

        valid_sources_compile(gl);
        invalid_source_reports_the_log(gl);
        mismatched_stages_fail_to_link(gl);
        uniforms_are_looked_up_by_name(gl);
        draws_a_triangle(gl);
    }

    window.swap_buffers().unwrap();
    platform.poll_events(&window, &InputStack::new());
    assert!(!window.should_close());

    window.gl().check_error("end of test").unwrap();

    second_window_waits_for_the_first(&platform, window, &config);
}

fn second_window_waits_for_the_first(platform: &Platform, first: CurrentWindow, config: &WindowConfig) {
    let second = platform.create_window(config).unwrap();
    match second.make_current() {
        Err(Error::Context(_)) => {}
        Err(e) => panic!("expected a context error, got {}", e),
        Ok(_) => panic!("bound a second window while the first was current"),
    }

    let _first = first.release().unwrap();
    let second = platform.create_window(config).unwrap().make_current().unwrap();
    second.gl().check_error("second window").unwrap();
}
