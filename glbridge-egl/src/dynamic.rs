//! EGL loaded at runtime.

use glbridge::library::{DynamicLibrary, ProcessLibrary};
use glbridge::proc_address;
use glbridge::{Api, ProcAddress};
use std::ffi::{c_char, c_void, CStr};
use std::fmt;
use std::mem;
use std::ptr;

use crate::native::{Egl, NativeDisplay, NativeWindow, EGL_OPENGL_API, EGL_OPENGL_ES_API};

#[cfg(not(windows))]
const EGL_LIBRARIES: &[&str] = &["libEGL.so.1", "libEGL.so"];
#[cfg(windows)]
const EGL_LIBRARIES: &[&str] = &["libEGL.dll"];

static EGL: ProcessLibrary = ProcessLibrary::new(EGL_LIBRARIES);

#[cfg(not(windows))]
static DESKTOP_GL: ProcessLibrary = ProcessLibrary::new(&["libGL.so.1", "libOpenGL.so.0"]);
#[cfg(windows)]
static DESKTOP_GL: ProcessLibrary = ProcessLibrary::new(&["opengl32.dll"]);

#[cfg(not(windows))]
static GLES: ProcessLibrary = ProcessLibrary::new(&["libGLESv2.so.2", "libGLESv2.so"]);
#[cfg(windows)]
static GLES: ProcessLibrary = ProcessLibrary::new(&["libGLESv2.dll"]);

/// `EGLDisplay`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EglDisplay(*mut c_void);

/// `EGLConfig`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EglConfig(*mut c_void);

/// `EGLSurface`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EglSurface(*mut c_void);

/// `EGLContext`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EglContext(*mut c_void);

// EGL objects are process-wide; eglMakeCurrent rejects binding a context current elsewhere.
unsafe impl Send for EglDisplay {}
unsafe impl Send for EglConfig {}
unsafe impl Send for EglSurface {}
unsafe impl Send for EglContext {}

type RawDisplay = *mut c_void;
type RawConfig = *mut c_void;
type RawSurface = *mut c_void;
type RawContext = *mut c_void;
type EglBoolean = u32;

type GetDisplayFn = unsafe extern "C" fn(*mut c_void) -> RawDisplay;
type InitializeFn = unsafe extern "C" fn(RawDisplay, *mut i32, *mut i32) -> EglBoolean;
type BindApiFn = unsafe extern "C" fn(u32) -> EglBoolean;
type ChooseConfigFn =
  unsafe extern "C" fn(RawDisplay, *const i32, *mut RawConfig, i32, *mut i32) -> EglBoolean;
type CreateWindowSurfaceFn =
  unsafe extern "C" fn(RawDisplay, RawConfig, usize, *const i32) -> RawSurface;
type DestroySurfaceFn = unsafe extern "C" fn(RawDisplay, RawSurface) -> EglBoolean;
type CreateContextFn =
  unsafe extern "C" fn(RawDisplay, RawConfig, RawContext, *const i32) -> RawContext;
type DestroyContextFn = unsafe extern "C" fn(RawDisplay, RawContext) -> EglBoolean;
type MakeCurrentFn =
  unsafe extern "C" fn(RawDisplay, RawSurface, RawSurface, RawContext) -> EglBoolean;
type SwapBuffersFn = unsafe extern "C" fn(RawDisplay, RawSurface) -> EglBoolean;
type GetProcAddressFn = unsafe extern "C" fn(*const c_char) -> ProcAddress;

// Resolve a symbol as a function pointer of type `F`.
//
// `F` must be a function pointer type matching the symbol’s signature.
unsafe fn load<F>(library: &DynamicLibrary, name: &CStr) -> Option<F>
where
  F: Copy,
{
  let address = library.symbol(name);

  if address.is_null() {
    None
  } else {
    Some(mem::transmute_copy::<ProcAddress, F>(&address))
  }
}

/// EGL entry points, resolved from the EGL runtime when loaded.
pub struct DynamicEgl {
  library: &'static DynamicLibrary,
  get_display: GetDisplayFn,
  initialize: InitializeFn,
  bind_api: BindApiFn,
  choose_config: ChooseConfigFn,
  create_window_surface: CreateWindowSurfaceFn,
  destroy_surface: DestroySurfaceFn,
  create_context: CreateContextFn,
  destroy_context: DestroyContextFn,
  make_current: MakeCurrentFn,
  swap_buffers: SwapBuffersFn,
  get_proc_address: GetProcAddressFn,
}

impl fmt::Debug for DynamicEgl {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("DynamicEgl")
      .field("library", &self.library)
      .finish()
  }
}

impl DynamicEgl {
  /// Load the EGL runtime and resolve every entry point the backend needs.
  ///
  /// Fails with a description of what is missing.
  pub fn load() -> Result<Self, String> {
    let library = EGL
      .get()
      .ok_or_else(|| format!("cannot load any of {}", EGL_LIBRARIES.join(", ")))?;

    macro_rules! entry {
      ($name:literal) => {
        unsafe { load(library, $name) }
          .ok_or_else(|| format!("{} has no {}", library.name(), $name.to_string_lossy()))?
      };
    }

    Ok(DynamicEgl {
      get_display: entry!(c"eglGetDisplay"),
      initialize: entry!(c"eglInitialize"),
      bind_api: entry!(c"eglBindAPI"),
      choose_config: entry!(c"eglChooseConfig"),
      create_window_surface: entry!(c"eglCreateWindowSurface"),
      destroy_surface: entry!(c"eglDestroySurface"),
      create_context: entry!(c"eglCreateContext"),
      destroy_context: entry!(c"eglDestroyContext"),
      make_current: entry!(c"eglMakeCurrent"),
      swap_buffers: entry!(c"eglSwapBuffers"),
      get_proc_address: entry!(c"eglGetProcAddress"),
      library,
    })
  }

  /// The loaded EGL runtime.
  pub fn library(&self) -> &'static DynamicLibrary {
    self.library
  }
}

/// Resolve an OpenGL / OpenGL ES entry point without a backend: `eglGetProcAddress` first, the
/// core library of `api` when it answers with a sentinel.
///
/// Returns null when the EGL runtime cannot be loaded.
pub fn get_proc_address(api: Api, name: &str) -> ProcAddress {
  let egl_get_proc_address = EGL
    .get()
    .and_then(|library| unsafe { load::<GetProcAddressFn>(library, c"eglGetProcAddress") });

  let egl_get_proc_address = match egl_get_proc_address {
    Some(f) => f,
    None => return ptr::null(),
  };

  proc_address::resolve_with(
    name,
    |name| unsafe { egl_get_proc_address(name.as_ptr()) },
    |name| core_proc_address(api, name),
  )
}

fn core_proc_address(api: Api, name: &CStr) -> ProcAddress {
  match api {
    Api::OpenGl => DESKTOP_GL.symbol(name),
    Api::OpenGlEs => GLES.symbol(name),
  }
}

fn is_true(b: EglBoolean) -> bool {
  b != 0
}

fn non_null(p: *mut c_void) -> Option<*mut c_void> {
  (!p.is_null()).then_some(p)
}

impl Egl for DynamicEgl {
  type Display = EglDisplay;
  type Config = EglConfig;
  type Surface = EglSurface;
  type Context = EglContext;

  fn display(&mut self, native: NativeDisplay) -> Option<EglDisplay> {
    non_null(unsafe { (self.get_display)(native.0) }).map(EglDisplay)
  }

  fn initialize(&mut self, display: EglDisplay) -> Option<(i32, i32)> {
    let (mut major, mut minor) = (0, 0);
    is_true(unsafe { (self.initialize)(display.0, &mut major, &mut minor) })
      .then_some((major, minor))
  }

  fn bind_api(&mut self, api: Api) -> bool {
    let api = match api {
      Api::OpenGl => EGL_OPENGL_API,
      Api::OpenGlEs => EGL_OPENGL_ES_API,
    };

    is_true(unsafe { (self.bind_api)(api) })
  }

  fn choose_config(&mut self, display: EglDisplay, attribs: &[i32]) -> Option<EglConfig> {
    let mut config = ptr::null_mut();
    let mut count = 0;
    let chosen =
      unsafe { (self.choose_config)(display.0, attribs.as_ptr(), &mut config, 1, &mut count) };

    (is_true(chosen) && count == 1).then_some(EglConfig(config))
  }

  fn create_window_surface(
    &mut self,
    display: EglDisplay,
    config: EglConfig,
    window: NativeWindow,
  ) -> Option<EglSurface> {
    non_null(unsafe {
      (self.create_window_surface)(display.0, config.0, window.0, ptr::null())
    })
    .map(EglSurface)
  }

  fn destroy_surface(&mut self, display: EglDisplay, surface: EglSurface) -> bool {
    is_true(unsafe { (self.destroy_surface)(display.0, surface.0) })
  }

  fn create_context(
    &mut self,
    display: EglDisplay,
    config: EglConfig,
    attribs: &[i32],
  ) -> Option<EglContext> {
    non_null(unsafe {
      (self.create_context)(display.0, config.0, ptr::null_mut(), attribs.as_ptr())
    })
    .map(EglContext)
  }

  fn destroy_context(&mut self, display: EglDisplay, context: EglContext) -> bool {
    is_true(unsafe { (self.destroy_context)(display.0, context.0) })
  }

  fn make_current(
    &mut self,
    display: EglDisplay,
    binding: Option<(EglSurface, EglContext)>,
  ) -> bool {
    let (surface, context) = match binding {
      Some((surface, context)) => (surface.0, context.0),
      None => (ptr::null_mut(), ptr::null_mut()),
    };

    is_true(unsafe { (self.make_current)(display.0, surface, surface, context) })
  }

  fn swap_buffers(&mut self, display: EglDisplay, surface: EglSurface) -> bool {
    is_true(unsafe { (self.swap_buffers)(display.0, surface.0) })
  }

  fn extension_proc_address(&self, name: &CStr) -> ProcAddress {
    unsafe { (self.get_proc_address)(name.as_ptr()) }
  }

  fn core_proc_address(&self, api: Api, name: &CStr) -> ProcAddress {
    core_proc_address(api, name)
  }
}
