//! The [EGL] implementation of [glbridge] context backends.
//!
//! EGL serves both desktop OpenGL and OpenGL ES. The EGL runtime is loaded when a backend is
//! built rather than linked, so that a program using this crate starts (and can fall back to
//! something else) on a machine without it.
//!
//! Windows are X11 windows, given through their [raw-window-handle] Xlib handles.
//!
//! [EGL]: https://registry.khronos.org/EGL/
//! [glbridge]: https://crates.io/crates/glbridge
//! [raw-window-handle]: https://crates.io/crates/raw-window-handle

#![deny(missing_docs)]

mod dynamic;
pub mod native;

pub use crate::dynamic::{
  get_proc_address, DynamicEgl, EglConfig, EglContext, EglDisplay, EglSurface,
};
pub use crate::native::{Egl, NativeDisplay, NativeWindow};

use glbridge::proc_address;
use glbridge::{
  Api, BackendState, ContextBackend, ContextError, ContextRequest, Diagnostics, FormatPolicy,
  GlVersion, LogDiagnostics, NativeWindowRef, PixelFormat, ProcAddress,
};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use std::ptr;

use crate::native::{config_attribs, context_attribs};

/// Name EGL goes by in diagnostics.
pub const PLATFORM: &str = "EGL";

/// Log target of the default diagnostics sink.
pub const LOG_TARGET: &str = "glbridge::egl";

/// The EGL backend type.
pub type Backend = EglBackend<DynamicEgl>;

// Owned state of an initialized backend.
#[derive(Debug)]
struct EglHandle<N>
where
  N: Egl,
{
  native: N,
  live: Option<LiveContext<N>>,
}

#[derive(Debug)]
struct LiveContext<N>
where
  N: Egl,
{
  display: N::Display,
  surface: N::Surface,
  context: N::Context,
  version: GlVersion,
}

/// EGL context backend.
#[derive(Debug)]
pub struct EglBackend<N, D = LogDiagnostics>
where
  N: Egl,
  D: Diagnostics,
{
  api: Api,
  diagnostics: D,
  policy: FormatPolicy,
  handle: Option<EglHandle<N>>,
}

impl EglBackend<DynamicEgl> {
  /// Create a backend for `api`, logging through [log](https://crates.io/crates/log).
  ///
  /// If the EGL runtime cannot be loaded, the backend is left uninitialized.
  pub fn new(api: Api) -> Self {
    let diagnostics = LogDiagnostics::new(LOG_TARGET);

    match DynamicEgl::load() {
      Ok(native) => EglBackend::with_native(native, api, diagnostics),

      Err(reason) => {
        diagnostics.error(&ContextError::PlatformUnavailable(reason).to_string());

        EglBackend {
          api,
          diagnostics,
          policy: FormatPolicy::default(),
          handle: None,
        }
      }
    }
  }
}

impl<N, D> EglBackend<N, D>
where
  N: Egl,
  D: Diagnostics,
{
  /// Create a backend over any [`Egl`] implementation and diagnostics sink.
  ///
  /// The backend is left uninitialized if EGL does not serve `api`.
  pub fn with_native(mut native: N, api: Api, diagnostics: D) -> Self {
    let handle = if native.bind_api(api) {
      Some(EglHandle { native, live: None })
    } else {
      diagnostics.error(
        &ContextError::CapabilityMismatch {
          api,
          platform: PLATFORM,
        }
        .to_string(),
      );
      None
    };

    EglBackend {
      api,
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

  /// API flavor the backend was built for.
  pub fn api(&self) -> Api {
    self.api
  }

  /// Native EGL implementation; `None` on an uninitialized backend.
  pub fn native(&self) -> Option<&N> {
    self.handle.as_ref().map(|handle| &handle.native)
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

  fn destroy_context(&mut self) {
    let handle = match self.handle.as_mut() {
      Some(handle) => handle,
      None => return,
    };

    if let Some(live) = handle.live.take() {
      destroy_live(&mut handle.native, &self.diagnostics, self.api, live);
    }
  }
}

// Accept X11 windows only; a null display connection selects the default display.
fn xlib_window(window: NativeWindowRef<'_>) -> Option<(NativeWindow, NativeDisplay)> {
  let native_window = match window.window_handle() {
    RawWindowHandle::Xlib(handle) if handle.window != 0 => NativeWindow(handle.window as usize),
    _ => return None,
  };

  let native_display = match window.display_handle() {
    RawDisplayHandle::Xlib(handle) => NativeDisplay(handle.display),
    _ => NativeDisplay(ptr::null_mut()),
  };

  Some((native_window, native_display))
}

/// Everything up to a created (not yet current) context.
///
/// On error, every surface created on the way is destroyed. The display stays initialized, as
/// other backends may share it.
fn create_live<N>(
  native: &mut N,
  api: Api,
  request: ContextRequest,
  minimum: &PixelFormat,
  window: NativeWindow,
  display: NativeDisplay,
) -> Result<LiveContext<N>, ContextError>
where
  N: Egl,
{
  let display = native.display(display).ok_or_else(|| {
    ContextError::PlatformUnavailable(format!("no EGL display for {:?}", display))
  })?;

  native.initialize(display).ok_or_else(|| {
    ContextError::PlatformUnavailable("cannot initialize EGL display".to_owned())
  })?;

  let (surface, context) = create_on_display(native, api, request, minimum, display, window)?;

  Ok(LiveContext {
    display,
    surface,
    context,
    version: request.version(),
  })
}

fn create_on_display<N>(
  native: &mut N,
  api: Api,
  request: ContextRequest,
  minimum: &PixelFormat,
  display: N::Display,
  window: NativeWindow,
) -> Result<(N::Surface, N::Context), ContextError>
where
  N: Egl,
{
  // the bound API is per thread; this one may never have bound it
  if !native.bind_api(api) {
    return Err(ContextError::CapabilityMismatch {
      api,
      platform: PLATFORM,
    });
  }

  let config = native
    .choose_config(display, &config_attribs(api, &request, minimum))
    .ok_or(ContextError::FormatUnavailable)?;

  let surface = native
    .create_window_surface(display, config, window)
    .ok_or(ContextError::SurfaceCreationFailed)?;

  match native.create_context(display, config, &context_attribs(api, &request)) {
    Some(context) => Ok((surface, context)),

    None => {
      native.destroy_surface(display, surface);
      Err(ContextError::ContextCreationFailed(request))
    }
  }
}

/// Make a freshly created context current, destroying it if that fails.
fn bind_live<N>(native: &mut N, live: LiveContext<N>) -> Result<LiveContext<N>, ContextError>
where
  N: Egl,
{
  if native.make_current(live.display, Some((live.surface, live.context))) {
    return Ok(live);
  }

  native.destroy_context(live.display, live.context);
  native.destroy_surface(live.display, live.surface);
  Err(ContextError::BindFailed)
}

fn destroy_live<N, D>(native: &mut N, diagnostics: &D, api: Api, live: LiveContext<N>)
where
  N: Egl,
  D: Diagnostics,
{
  // eglMakeCurrent(NO_CONTEXT) only releases the context of the thread's bound API
  native.bind_api(api);
  native.make_current(live.display, None);

  if !native.destroy_context(live.display, live.context) {
    diagnostics.debug("context destruction rejected; is it current on another thread?");
  }

  native.destroy_surface(live.display, live.surface);
}

impl<N, D> ContextBackend for EglBackend<N, D>
where
  N: Egl,
  D: Diagnostics,
{
  fn is_initialized(&self) -> bool {
    self.handle.is_some()
  }

  fn state(&self) -> BackendState {
    match self.handle {
      None => BackendState::Uninitialized,
      Some(EglHandle { live: None, .. }) => BackendState::NoContext,
      Some(EglHandle { live: Some(_), .. }) => BackendState::HasContext,
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

    let (window, display) =
      xlib_window(window).ok_or_else(|| self.report(ContextError::InvalidWindow))?;

    let api = self.api;
    let minimum = *self.policy.minimum();
    let created = match self.handle.as_mut() {
      Some(handle) => {
        create_live(
          &mut handle.native,
          api,
          request,
          &minimum,
          window,
          display,
        )
        .and_then(|live| bind_live(&mut handle.native, live))
        .map(|live| handle.live = Some(live))
      }

      None => Err(ContextError::Uninitialized),
    };

    if let Err(e) = created {
      return Err(self.report(e));
    }

    self
      .diagnostics
      .info(&format!("Successfully created {} {} context", api, request));

    Ok(())
  }

  fn make_current(&mut self) -> Result<(), ContextError> {
    let (display, surface, context) = match self.live() {
      Ok(live) => (live.display, live.surface, live.context),
      Err(e) => return Err(self.report(e)),
    };

    let api = self.api;
    let bound = self.handle.as_mut().map_or(false, |handle| {
      handle.native.bind_api(api) && handle.native.make_current(display, Some((surface, context)))
    });

    if bound {
      Ok(())
    } else {
      Err(self.report(ContextError::BindFailed))
    }
  }

  fn make_null_current(&mut self) -> Result<(), ContextError> {
    let handle = match self.handle.as_mut() {
      Some(handle) => handle,
      None => return Err(self.report(ContextError::Uninitialized)),
    };

    // without a display there is nothing EGL could have bound
    let display = match handle.live.as_ref() {
      Some(live) => live.display,
      None => return Ok(()),
    };

    if handle.native.bind_api(self.api) && handle.native.make_current(display, None) {
      Ok(())
    } else {
      Err(self.report(ContextError::BindFailed))
    }
  }

  fn swap_buffers(&mut self) {
    if let Some(handle) = self.handle.as_mut() {
      if let Some(live) = handle.live.as_ref() {
        let _ = handle.native.swap_buffers(live.display, live.surface);
      }
    }
  }

  fn version(&self) -> Option<GlVersion> {
    self.live().ok().map(|live| live.version)
  }

  fn get_proc_address(&self, name: &str) -> ProcAddress {
    let native = match self.handle.as_ref() {
      Some(handle) => &handle.native,
      None => return ptr::null(),
    };

    proc_address::resolve_with(
      name,
      |name| native.extension_proc_address(name),
      |name| native.core_proc_address(self.api, name),
    )
  }
}

impl<N, D> Drop for EglBackend<N, D>
where
  N: Egl,
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
