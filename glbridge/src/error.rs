//! Context errors.

use std::error;
use std::fmt;

use crate::request::{Api, ContextRequest};

/// Error that might occur while constructing a backend or operating its context.
///
/// Every variant is terminal to the operation that detected it: nothing is retried and nothing
/// aborts the process. The caller decides whether to retry, degrade (for instance by requesting a
/// lower version) or give up.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContextError {
  /// The requested API flavor is not supported by the platform.
  CapabilityMismatch {
    /// Requested flavor.
    api: Api,
    /// Name of the native context API that cannot provide it.
    platform: &'static str,
  },
  /// The native context API could not be brought up (missing runtime, display initialization
  /// failure…). The carried string gives more details.
  PlatformUnavailable(String),
  /// The backend was not initialized; construction failed earlier.
  Uninitialized,
  /// The window handle does not belong to this platform or is null.
  InvalidWindow,
  /// No pixel format / configuration satisfies the format policy.
  FormatUnavailable,
  /// A bootstrap entry point could not be resolved. The carried string is the entry point name.
  ExtensionUnavailable(&'static str),
  /// The native drawable surface could not be created.
  SurfaceCreationFailed,
  /// The driver rejected the requested version / profile combination.
  ContextCreationFailed(ContextRequest),
  /// The operation requires a context and none was created.
  NoContext,
  /// The native bind (or unbind) call was rejected.
  BindFailed,
}

impl fmt::Display for ContextError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ContextError::CapabilityMismatch { api, platform } => {
        write!(f, "{} doesn’t support {}", platform, api)
      }
      ContextError::PlatformUnavailable(ref reason) => {
        write!(f, "native context API unavailable: {}", reason)
      }
      ContextError::Uninitialized => f.write_str("backend is not initialized"),
      ContextError::InvalidWindow => f.write_str("window handle is not usable on this platform"),
      ContextError::FormatUnavailable => f.write_str("required context format not supported"),
      ContextError::ExtensionUnavailable(name) => {
        write!(f, "cannot find context creation function {}", name)
      }
      ContextError::SurfaceCreationFailed => f.write_str("failed to create window surface"),
      ContextError::ContextCreationFailed(ref request) => {
        write!(f, "failed to create OpenGL {} context", request)
      }
      ContextError::NoContext => f.write_str("no context was created"),
      ContextError::BindFailed => f.write_str("cannot make context current"),
    }
  }
}

impl error::Error for ContextError {}
