use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context as _, Result};
use clap::{App, ArgMatches};

use crate::demos::{Demo, DemoConfig};

/// Parses the command line into the demo to run and how to run it.
///
/// Help and version requests come back as a `clap::Error`, ready for `exit()`.
pub fn demo_config<I, T>(args: I) -> Result<DemoConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;

    let (name, sub) = matches.subcommand();
    let demo = Demo::from_name(name).ok_or_else(|| anyhow!("unknown demo \"{}\"", name))?;

    let mut config = DemoConfig::new(demo);

    if let Some(width) = lookup(&matches, sub, "width") {
        config.window.width = parse_size("width", width)?;
    }
    if let Some(height) = lookup(&matches, sub, "height") {
        config.window.height = parse_size("height", height)?;
    }
    if let Some(dir) = lookup(&matches, sub, "shaders") {
        config.shaders = PathBuf::from(dir);
    }
    if let Some(dir) = lookup(&matches, sub, "textures") {
        config.textures = PathBuf::from(dir);
    }
    config.log_filter = lookup(&matches, sub, "log").map(String::from);

    Ok(config)
}

/// Options may come before or after the subcommand.
fn lookup<'m>(matches: &'m ArgMatches<'_>, sub: Option<&'m ArgMatches<'_>>, arg: &str) -> Option<&'m str> {
    sub.and_then(|sub| sub.value_of(arg)).or_else(|| matches.value_of(arg))
}

fn parse_size(arg: &str, value: &str) -> Result<u32> {
    let size = value
        .parse::<u32>()
        .with_context(|| format!("--{} expects a number of pixels, got \"{}\"", arg, value))?;

    if size == 0 {
        bail!("--{} must be at least 1", arg);
    }

    Ok(size)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<DemoConfig> {
        demo_config(std::iter::once("gltut").chain(args.iter().copied()))
    }

    #[test]
    fn demo_defaults_apply_without_options() {
        let config = parse(&["coord-systems"]).unwrap();

        assert_eq!(config.demo, Demo::CoordSystems);
        assert_eq!((config.window.width, config.window.height), (800, 800));
        assert_eq!(config.shaders, Path::new("shaders"));
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn options_after_the_demo() {
        let config = parse(&["two-triangles", "--width", "1024", "--shaders", "glsl", "--log", "debug"]).unwrap();

        assert_eq!(config.demo, Demo::TwoTriangles);
        assert_eq!((config.window.width, config.window.height), (1024, 600));
        assert_eq!(config.shader("red.frag"), Path::new("glsl").join("red.frag"));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn options_before_the_demo() {
        let config = parse(&["--height", "300", "--textures", "img", "window"]).unwrap();

        assert_eq!(config.demo, Demo::Window);
        assert_eq!(config.window.height, 300);
        assert_eq!(config.textures, Path::new("img"));
    }

    #[test]
    fn bad_sizes_are_rejected() {
        assert!(parse(&["camera", "--width", "wide"]).is_err());
        assert!(parse(&["camera", "--height", "0"]).is_err());
    }

    #[test]
    fn unknown_demos_are_rejected() {
        let error = parse(&["teapot"]).unwrap_err();
        assert!(error.downcast_ref::<clap::Error>().is_some());
    }

    #[test]
    fn a_demo_is_required() {
        assert!(parse(&[]).is_err());
    }
}
