//! Context requests.
//!
//! A [`ContextRequest`] is what you hand to [`ContextBackend::create_context`]: the exact OpenGL
//! version you want and a few flags. The profile is not a choice: every context created by a
//! backend is a _core profile_ context, without the deprecated fixed-function API surface.
//!
//! [`ContextBackend::create_context`]: crate::ContextBackend::create_context

use std::fmt;
use std::str::FromStr;

/// Flavor of the OpenGL API a backend is constructed for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Api {
  /// Desktop OpenGL.
  OpenGl,
  /// OpenGL ES, the embedded profile.
  OpenGlEs,
}

impl Api {
  /// Whether this is the embedded (ES) flavor.
  #[inline]
  pub fn is_embedded(self) -> bool {
    matches!(self, Api::OpenGlEs)
  }
}

impl fmt::Display for Api {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Api::OpenGl => f.write_str("OpenGL"),
      Api::OpenGlEs => f.write_str("OpenGL ES"),
    }
  }
}

/// An OpenGL version, as `major.minor`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GlVersion {
  /// Major version.
  pub major: u8,
  /// Minor version.
  pub minor: u8,
}

impl GlVersion {
  /// Create a new version.
  #[inline]
  pub const fn new(major: u8, minor: u8) -> Self {
    GlVersion { major, minor }
  }

  /// Parse the version out of a `GL_VERSION` string.
  ///
  /// Desktop drivers start the string with the version (`"4.6.0 NVIDIA 535.54.03"`), OpenGL ES
  /// drivers prefix it with `"OpenGL ES"` and sometimes a profile marker
  /// (`"OpenGL ES-CM 1.1"`, `"OpenGL ES 3.2 Mesa 23.1.0"`). Anything after the minor number is
  /// vendor-specific and ignored.
  pub fn parse(version: &str) -> Option<Self> {
    let version = version.trim();
    let version = match version.strip_prefix("OpenGL ES") {
      // skip the optional profile marker ("-CM", "-CL") up to the first blank
      Some(rest) => rest.trim_start_matches(|c: char| !c.is_whitespace()).trim_start(),
      None => version,
    };

    let numbers = version.split(|c: char| c.is_whitespace()).next()?;
    let mut parts = numbers.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
      .next()?
      .trim_end_matches(|c: char| !c.is_ascii_digit())
      .parse()
      .ok()?;

    Some(GlVersion { major, minor })
  }
}

impl fmt::Display for GlVersion {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{}.{}", self.major, self.minor)
  }
}

impl FromStr for GlVersion {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    GlVersion::parse(s).ok_or(())
  }
}

impl From<(u8, u8)> for GlVersion {
  fn from((major, minor): (u8, u8)) -> Self {
    GlVersion { major, minor }
  }
}

/// A request for a core profile context.
///
/// The request is consumed by context creation and not retained; backends only remember the
/// version they negotiated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ContextRequest {
  version: GlVersion,
  debug: bool,
}

impl ContextRequest {
  /// Request exactly `major.minor`, core profile.
  #[inline]
  pub const fn new(major: u8, minor: u8) -> Self {
    ContextRequest {
      version: GlVersion::new(major, minor),
      debug: false,
    }
  }

  /// Ask for a debug context. Defaults to `false`.
  #[inline]
  pub fn debug(self, debug: bool) -> Self {
    ContextRequest { debug, ..self }
  }

  /// Requested version.
  #[inline]
  pub fn version(&self) -> GlVersion {
    self.version
  }

  /// Whether a debug context is requested.
  #[inline]
  pub fn is_debug(&self) -> bool {
    self.debug
  }
}

impl Default for ContextRequest {
  /// Defaults to OpenGL 3.3, core profile, no debug.
  fn default() -> Self {
    ContextRequest::new(3, 3)
  }
}

impl From<GlVersion> for ContextRequest {
  fn from(version: GlVersion) -> Self {
    ContextRequest::new(version.major, version.minor)
  }
}

impl fmt::Display for ContextRequest {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{} core", self.version)?;

    if self.debug {
      f.write_str(" (debug)")?;
    }

    Ok(())
  }
}
