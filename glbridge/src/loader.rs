//! Filling the [gl] function table.
//!
//! Once a context is current, the [gl] crate needs every entry point it knows of resolved. This
//! module drives `gl::load_with` with a backend resolver, checks that the few entry points needed
//! to talk to the driver at all are there, and queries what the driver actually gave us.
//!
//! [gl]: https://crates.io/crates/gl

use std::error;
use std::ffi::{c_char, CStr};
use std::fmt;

use crate::proc_address::ProcAddress;
use crate::request::GlVersion;

/// Entry points without which nothing can be rendered nor even queried.
pub const REQUIRED_ENTRY_POINTS: &[&str] = &[
  "glGetString",
  "glGetIntegerv",
  "glGetError",
  "glViewport",
  "glClearColor",
  "glClear",
];

/// Error that might occur while loading the function table.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadError {
  /// A required entry point resolved to null.
  MissingEntryPoint(&'static str),
  /// The driver didn’t report a version we understand. The carried string is what it reported.
  UnknownVersion(String),
}

impl fmt::Display for LoadError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      LoadError::MissingEntryPoint(name) => write!(f, "missing OpenGL entry point {}", name),
      LoadError::UnknownVersion(ref version) => {
        write!(f, "cannot understand OpenGL version “{}”", version)
      }
    }
  }
}

impl error::Error for LoadError {}

/// What the driver reports about the current context.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlInfo {
  /// Negotiated version.
  pub version: GlVersion,
  /// Raw `GL_VERSION` string.
  pub version_string: String,
  /// `GL_VENDOR` string.
  pub vendor: String,
  /// `GL_RENDERER` string.
  pub renderer: String,
}

impl GlInfo {
  /// Build the information out of the driver strings.
  pub fn from_strings(version: &str, vendor: &str, renderer: &str) -> Result<Self, LoadError> {
    let parsed =
      GlVersion::parse(version).ok_or_else(|| LoadError::UnknownVersion(version.to_owned()))?;

    Ok(GlInfo {
      version: parsed,
      version_string: version.to_owned(),
      vendor: vendor.to_owned(),
      renderer: renderer.to_owned(),
    })
  }
}

impl fmt::Display for GlInfo {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(
      f,
      "OpenGL {} ({}, {})",
      self.version, self.vendor, self.renderer
    )
  }
}

/// Fail on the first required entry point found in `missing`.
pub fn check_required(missing: &[&'static str]) -> Result<(), LoadError> {
  match REQUIRED_ENTRY_POINTS
    .iter()
    .find_map(|required| missing.iter().find(|name| *name == required))
  {
    Some(name) => Err(LoadError::MissingEntryPoint(*name)),
    None => Ok(()),
  }
}

/// Fill the [gl](https://crates.io/crates/gl) function table with `resolve` and query the
/// driver.
///
/// A context must be current on the calling thread. Entry points the driver doesn’t have are left
/// unloaded, which is fine for extensions; only [`REQUIRED_ENTRY_POINTS`] are checked.
pub fn load_gl<F>(mut resolve: F) -> Result<GlInfo, LoadError>
where
  F: FnMut(&'static str) -> ProcAddress,
{
  let mut missing = Vec::new();

  gl::load_with(|name| {
    let address = resolve(name);

    if address.is_null() {
      missing.push(name);
    }

    address
  });

  check_required(&missing)?;

  let version = gl_string(gl::VERSION);
  let vendor = gl_string(gl::VENDOR);
  let renderer = gl_string(gl::RENDERER);

  GlInfo::from_strings(&version, &vendor, &renderer)
}

fn gl_string(name: gl::types::GLenum) -> String {
  unsafe {
    let s = gl::GetString(name);

    if s.is_null() {
      String::new()
    } else {
      CStr::from_ptr(s as *const c_char)
        .to_string_lossy()
        .into_owned()
    }
  }
}
