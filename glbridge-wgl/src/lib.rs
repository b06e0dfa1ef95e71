//! The [WGL] implementation of [glbridge] context backends, for Windows.
//!
//! Creating a modern OpenGL context with WGL is a two-step dance. The entry point that creates
//! _versioned_, _core profile_ contexts, `wglCreateContextAttribsARB`, is an extension function:
//! it can only be resolved while some context is current. So [`WglBackend::create_context`]:
//!
//! 1. creates a transitional, unversioned legacy context, binds it and resolves
//!    `wglCreateContextAttribsARB` through it, then unbinds and destroys it, whatever happened;
//! 2. creates the real context with exactly the requested version and the core profile, and
//!    binds it.
//!
//! The native calls are abstracted behind the [`Wgl`] trait; [`Win32Wgl`] is the real thing and
//! [`Backend`] the backend type you want on Windows.
//!
//! [WGL]: https://learn.microsoft.com/en-us/windows/win32/opengl/wgl-functions
//! [glbridge]: https://crates.io/crates/glbridge

#![deny(missing_docs)]

pub mod native;
#[cfg(windows)]
mod win32;

pub use crate::native::{Hwnd, Wgl, CREATE_CONTEXT_ATTRIBS};
#[cfg(windows)]
pub use crate::win32::{get_proc_address, CreateContextAttribsArb, Hdc, Hglrc, Win32Wgl};

use glbridge::proc_address;
use glbridge::{
  Api, BackendState, ContextBackend, ContextError, ContextRequest, Diagnostics, FormatPolicy,
  GlVersion, LogDiagnostics, NativeWindowRef, ProcAddress,
};
use raw_window_handle::RawWindowHandle;

use crate::native::context_attribs;

/// Name WGL goes by in diagnostics.
pub const PLATFORM: &str = "WGL";

/// Log target of the default diagnostics sink.
pub const LOG_TARGET: &str = "glbridge::wgl";

/// The WGL backend type on Windows.
#[cfg(windows)]
pub type Backend = WglBackend<Win32Wgl>;

// Owned state of an initialized backend.
#[derive(Debug)]
struct WglHandle<N>
where
  N: Wgl,
{
  live: Option<LiveContext<N>>,
}

// A created context and the device it renders into.
#[derive(Debug)]
struct LiveContext<N>
where
  N: Wgl,
{
  window: Hwnd,
  device: N::Device,
  context: N::Context,
  version: GlVersion,
}

/// WGL context backend.
///
/// See the [crate documentation](crate) for the creation protocol.
#[derive(Debug)]
pub struct WglBackend<N, D = LogDiagnostics>
where
  N: Wgl,
  D: Diagnostics,
{
  native: N,
  diagnostics: D,
  policy: FormatPolicy,
  handle: Option<WglHandle<N>>,
}

#[cfg(windows)]
impl WglBackend<Win32Wgl> {
  /// Create a backend for `api`, logging through [log](https://crates.io/crates/log).
  ///
  /// WGL only exposes desktop OpenGL: asking for [`Api::OpenGlEs`] leaves the backend
  /// uninitialized.
  pub fn new(api: Api) -> Self {
    WglBackend::with_native(Win32Wgl, api, LogDiagnostics::new(LOG_TARGET))
  }
}

impl<N, D> WglBackend<N, D>
where
  N: Wgl,
  D: Diagnostics,
{
  /// Create a backend over any [`Wgl`] implementation and diagnostics sink.
  pub fn with_native(native: N, api: Api, diagnostics: D) -> Self {
    let handle = if api.is_embedded() {
      let e = ContextError::CapabilityMismatch {
        api,
        platform: PLATFORM,
      };
      diagnostics.error(&e.to_string());
      None
    } else {
      Some(WglHandle { live: None })
    };

    WglBackend {
      native,
      diagnostics,
      policy: FormatPolicy::default(),
      handle,
    }
  }

  /// Change the pixel format policy used by the next context creation.
  pub fn with_format_policy(mut self, policy: FormatPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Pixel format policy.
  pub fn format_policy(&self) -> &FormatPolicy {
    &self.policy
  }

  /// Native WGL implementation.
  pub fn native(&self) -> &N {
    &self.native
  }

  /// Diagnostics sink.
  pub fn diagnostics(&self) -> &D {
    &self.diagnostics
  }

  fn report(&self, e: ContextError) -> ContextError {
    self.diagnostics.error(&e.to_string());
    e
  }

  fn live(&self) -> Result<&LiveContext<N>, ContextError> {
    self
      .handle
      .as_ref()
      .ok_or(ContextError::Uninitialized)?
      .live
      .as_ref()
      .ok_or(ContextError::NoContext)
  }

  fn create_on_device(
    &mut self,
    request: ContextRequest,
    device: N::Device,
  ) -> Result<N::Context, ContextError> {
    self.apply_pixel_format(device)?;

    let entry = discover_create_context_attribs(&mut self.native, device)?;
    create_versioned_context(&mut self.native, entry, device, request)
  }

  fn apply_pixel_format(&mut self, device: N::Device) -> Result<(), ContextError> {
    let preferred = *self.policy.preferred();
    let index = self
      .native
      .choose_pixel_format(device, &preferred)
      .ok_or(ContextError::FormatUnavailable)?;
    let chosen = self
      .native
      .describe_pixel_format(device, index)
      .ok_or(ContextError::FormatUnavailable)?;

    // ChoosePixelFormat answers with the closest match, which might be way off
    if !self.policy.accepts(&chosen) {
      return Err(ContextError::FormatUnavailable);
    }

    // a window’s pixel format can only be set once
    if self.native.pixel_format(device) == Some(index) {
      return Ok(());
    }

    if !self.native.set_pixel_format(device, index, &preferred) {
      return Err(ContextError::FormatUnavailable);
    }

    Ok(())
  }

  fn destroy_context(&mut self) {
    let live = match self.handle.as_mut().and_then(|handle| handle.live.take()) {
      Some(live) => live,
      None => return,
    };

    self.native.make_current(None);

    if !self.native.delete_context(live.context) {
      self
        .diagnostics
        .debug("context deletion rejected; is it current on another thread?");
    }

    self.native.release_device(live.window, live.device);
  }
}

/// First step of context creation: resolve `wglCreateContextAttribsARB` through a transitional
/// legacy context.
///
/// The transitional context is unbound and deleted before returning, on every path.
fn discover_create_context_attribs<N>(
  native: &mut N,
  device: N::Device,
) -> Result<N::CreateContextAttribs, ContextError>
where
  N: Wgl,
{
  let transitional = native
    .create_legacy_context(device)
    .ok_or(ContextError::ExtensionUnavailable(CREATE_CONTEXT_ATTRIBS))?;

  let entry = if native.make_current(Some((device, transitional))) {
    native.create_context_attribs()
  } else {
    None
  };

  native.make_current(None);
  native.delete_context(transitional);

  entry.ok_or(ContextError::ExtensionUnavailable(CREATE_CONTEXT_ATTRIBS))
}

/// Second step of context creation: the real, versioned, core profile context.
fn create_versioned_context<N>(
  native: &mut N,
  entry: N::CreateContextAttribs,
  device: N::Device,
  request: ContextRequest,
) -> Result<N::Context, ContextError>
where
  N: Wgl,
{
  let attribs = context_attribs(&request);

  native
    .create_context_with_attribs(entry, device, &attribs)
    .ok_or(ContextError::ContextCreationFailed(request))
}

impl<N, D> ContextBackend for WglBackend<N, D>
where
  N: Wgl,
  D: Diagnostics,
{
  fn is_initialized(&self) -> bool {
    self.handle.is_some()
  }

  fn state(&self) -> BackendState {
    match self.handle {
      None => BackendState::Uninitialized,
      Some(WglHandle { live: None }) => BackendState::NoContext,
      Some(WglHandle { live: Some(_) }) => BackendState::HasContext,
    }
  }

  fn create_context(
    &mut self,
    request: ContextRequest,
    window: NativeWindowRef<'_>,
  ) -> Result<(), ContextError> {
    if self.handle.is_none() {
      return Err(self.report(ContextError::Uninitialized));
    }

    self.destroy_context();

    let window = match window.window_handle() {
      RawWindowHandle::Win32(handle) => Hwnd::new(handle.hwnd),
      _ => None,
    }
    .ok_or_else(|| self.report(ContextError::InvalidWindow))?;

    let device = self
      .native
      .device(window)
      .ok_or_else(|| self.report(ContextError::InvalidWindow))?;

    let context = match self.create_on_device(request, device) {
      Ok(context) => context,
      Err(e) => {
        self.native.release_device(window, device);
        return Err(self.report(e));
      }
    };

    if !self.native.make_current(Some((device, context))) {
      self.native.delete_context(context);
      self.native.release_device(window, device);
      return Err(self.report(ContextError::BindFailed));
    }

    let version = request.version();
    if let Some(handle) = self.handle.as_mut() {
      handle.live = Some(LiveContext {
        window,
        device,
        context,
        version,
      });
    }

    self.diagnostics.info(&format!(
      "Successfully created {} {} context",
      Api::OpenGl,
      request
    ));

    Ok(())
  }

  fn make_current(&mut self) -> Result<(), ContextError> {
    let (device, context) = match self.live() {
      Ok(live) => (live.device, live.context),
      Err(e) => return Err(self.report(e)),
    };

    if self.native.make_current(Some((device, context))) {
      Ok(())
    } else {
      Err(self.report(ContextError::BindFailed))
    }
  }

  fn make_null_current(&mut self) -> Result<(), ContextError> {
    if self.handle.is_none() {
      return Err(self.report(ContextError::Uninitialized));
    }

    if self.native.make_current(None) {
      Ok(())
    } else {
      Err(self.report(ContextError::BindFailed))
    }
  }

  fn swap_buffers(&mut self) {
    if let Ok(device) = self.live().map(|live| live.device) {
      let _ = self.native.swap_buffers(device);
    }
  }

  fn version(&self) -> Option<GlVersion> {
    self.live().ok().map(|live| live.version)
  }

  fn get_proc_address(&self, name: &str) -> ProcAddress {
    proc_address::resolve_with(
      name,
      |name| self.native.extension_proc_address(name),
      |name| self.native.core_proc_address(name),
    )
  }
}

impl<N, D> Drop for WglBackend<N, D>
where
  N: Wgl,
  D: Diagnostics,
{
  fn drop(&mut self) {
    // an uninitialized backend never touched the native API
    if self.handle.is_none() {
      return;
    }

    self.destroy_context();
    self.handle = None;
  }
}
