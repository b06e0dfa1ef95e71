//! A scripted EGL driver, keeping track of calls and of the objects alive.
//!
//! The bound API and the current context are per thread, as in EGL.

use glbridge::{Api, GlVersion, ProcAddress};
use glbridge_egl::{Egl, NativeDisplay, NativeWindow};
use std::collections::HashMap;
use std::ffi::CStr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

pub const DESKTOP_ADDRESS: usize = 0x1000;
pub const ES_ADDRESS: usize = 0x2000;
pub const EXTENSION_ADDRESS: usize = 0x5000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FakeDisplay(pub usize);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FakeConfig;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FakeSurface(pub u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FakeContext(pub u32);

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
  GetDisplay,
  Initialize,
  BindApi(Api),
  ChooseConfig(Vec<i32>),
  CreateSurface(NativeWindow),
  DestroySurface(FakeSurface),
  CreateContext(Vec<i32>),
  DestroyContext(FakeContext),
  MakeCurrent(Option<FakeContext>),
  SwapBuffers(FakeSurface),
}

#[derive(Debug)]
pub struct Driver {
  pub apis: Vec<Api>,
  pub max_version: GlVersion,
  pub max_es_version: GlVersion,
  pub initializes: bool,
  pub has_config: bool,
  pub creates_surfaces: bool,
  pub reject_bind: bool,
  pub extension_sentinel: usize,
  pub initialized: bool,
  pub surfaces: Vec<FakeSurface>,
  pub contexts: Vec<(FakeContext, Api, GlVersion)>,
  pub bound_apis: HashMap<ThreadId, Api>,
  pub currents: HashMap<ThreadId, FakeContext>,
  pub calls: Vec<Call>,
  pub next_id: u32,
}

impl Driver {
  pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
    self.calls.iter().filter(|call| f(call)).count()
  }

  /// API bound on the calling thread; EGL starts every thread on OpenGL ES.
  pub fn bound_api(&self) -> Api {
    self
      .bound_apis
      .get(&thread::current().id())
      .copied()
      .unwrap_or(Api::OpenGlEs)
  }

  /// Context current on the calling thread.
  pub fn current(&self) -> Option<FakeContext> {
    self.currents.get(&thread::current().id()).copied()
  }

  fn current_elsewhere(&self, context: FakeContext) -> bool {
    let here = thread::current().id();
    self
      .currents
      .iter()
      .any(|(thread, current)| *thread != here && *current == context)
  }

  fn api_of(&self, context: FakeContext) -> Option<Api> {
    self
      .contexts
      .iter()
      .find(|(live, _, _)| *live == context)
      .map(|(_, api, _)| *api)
  }

  /// Nothing alive and nothing current on any thread.
  pub fn is_clean(&self) -> bool {
    self.surfaces.is_empty() && self.contexts.is_empty() && self.currents.is_empty()
  }

  fn next(&mut self) -> u32 {
    self.next_id += 1;
    self.next_id
  }
}

impl Default for Driver {
  fn default() -> Self {
    Driver {
      apis: vec![Api::OpenGl, Api::OpenGlEs],
      max_version: GlVersion::new(4, 6),
      max_es_version: GlVersion::new(3, 2),
      initializes: true,
      has_config: true,
      creates_surfaces: true,
      reject_bind: false,
      extension_sentinel: 0,
      initialized: false,
      surfaces: Vec::new(),
      contexts: Vec::new(),
      bound_apis: HashMap::new(),
      currents: HashMap::new(),
      calls: Vec::new(),
      next_id: 0,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct FakeEgl {
  driver: Arc<Mutex<Driver>>,
}

impl FakeEgl {
  pub fn new(driver: Driver) -> Self {
    FakeEgl {
      driver: Arc::new(Mutex::new(driver)),
    }
  }

  pub fn driver(&self) -> MutexGuard<'_, Driver> {
    self.driver.lock().unwrap()
  }
}

fn is_core(name: &CStr) -> bool {
  matches!(
    name.to_bytes(),
    b"glClear" | b"glClearColor" | b"glGetString" | b"glGetIntegerv" | b"glViewport"
  )
}

impl Egl for FakeEgl {
  type Display = FakeDisplay;
  type Config = FakeConfig;
  type Surface = FakeSurface;
  type Context = FakeContext;

  fn display(&mut self, native: NativeDisplay) -> Option<FakeDisplay> {
    self.driver().calls.push(Call::GetDisplay);
    Some(FakeDisplay(native.0 as usize))
  }

  fn initialize(&mut self, _: FakeDisplay) -> Option<(i32, i32)> {
    let mut d = self.driver();
    d.calls.push(Call::Initialize);

    if !d.initializes {
      return None;
    }

    d.initialized = true;
    Some((1, 5))
  }

  fn bind_api(&mut self, api: Api) -> bool {
    let mut d = self.driver();
    d.calls.push(Call::BindApi(api));

    if !d.apis.contains(&api) {
      return false;
    }

    d.bound_apis.insert(thread::current().id(), api);
    true
  }

  fn choose_config(&mut self, _: FakeDisplay, attribs: &[i32]) -> Option<FakeConfig> {
    let mut d = self.driver();
    d.calls.push(Call::ChooseConfig(attribs.to_vec()));
    d.has_config.then_some(FakeConfig)
  }

  fn create_window_surface(
    &mut self,
    _: FakeDisplay,
    _: FakeConfig,
    window: NativeWindow,
  ) -> Option<FakeSurface> {
    let mut d = self.driver();
    d.calls.push(Call::CreateSurface(window));

    if !d.creates_surfaces {
      return None;
    }

    let surface = FakeSurface(d.next());
    d.surfaces.push(surface);
    Some(surface)
  }

  fn destroy_surface(&mut self, _: FakeDisplay, surface: FakeSurface) -> bool {
    let mut d = self.driver();
    d.calls.push(Call::DestroySurface(surface));

    let before = d.surfaces.len();
    d.surfaces.retain(|live| *live != surface);
    d.surfaces.len() != before
  }

  fn create_context(&mut self, _: FakeDisplay, _: FakeConfig, attribs: &[i32]) -> Option<FakeContext> {
    let mut d = self.driver();
    d.calls.push(Call::CreateContext(attribs.to_vec()));

    let mut version = GlVersion::new(1, 0);

    for pair in attribs.chunks(2) {
      match pair {
        [0x3098, major] => version.major = *major as u8,
        [0x30FB, minor] => version.minor = *minor as u8,
        _ => (),
      }
    }

    let api = d.bound_api();
    let max = match api {
      Api::OpenGl => d.max_version,
      Api::OpenGlEs => d.max_es_version,
    };

    if version > max {
      return None;
    }

    let context = FakeContext(d.next());
    d.contexts.push((context, api, version));
    Some(context)
  }

  fn destroy_context(&mut self, _: FakeDisplay, context: FakeContext) -> bool {
    let mut d = self.driver();
    d.calls.push(Call::DestroyContext(context));

    if d.current_elsewhere(context) {
      return false;
    }

    let before = d.contexts.len();
    d.contexts.retain(|(live, _, _)| *live != context);
    d.currents.retain(|_, current| *current != context);
    d.contexts.len() != before
  }

  fn make_current(&mut self, _: FakeDisplay, binding: Option<(FakeSurface, FakeContext)>) -> bool {
    let mut d = self.driver();
    d.calls.push(Call::MakeCurrent(binding.map(|(_, context)| context)));

    let thread = thread::current().id();

    match binding {
      // releases the current context only if it belongs to the bound API
      None => {
        let bound_api = d.bound_api();
        let release = d.current().and_then(|current| d.api_of(current)) == Some(bound_api);

        if release {
          d.currents.remove(&thread);
        }

        true
      }

      Some((surface, context)) => {
        let alive = d.surfaces.contains(&surface) && d.api_of(context).is_some();

        if d.reject_bind || !alive || d.current_elsewhere(context) {
          return false;
        }

        d.currents.insert(thread, context);
        true
      }
    }
  }

  fn swap_buffers(&mut self, _: FakeDisplay, surface: FakeSurface) -> bool {
    self.driver().calls.push(Call::SwapBuffers(surface));
    true
  }

  fn extension_proc_address(&self, name: &CStr) -> ProcAddress {
    if is_core(name) {
      self.driver().extension_sentinel as ProcAddress
    } else if name.to_bytes().starts_with(b"glDebug") {
      EXTENSION_ADDRESS as ProcAddress
    } else {
      std::ptr::null()
    }
  }

  fn core_proc_address(&self, api: Api, name: &CStr) -> ProcAddress {
    match api {
      _ if !is_core(name) => std::ptr::null(),
      Api::OpenGl => DESKTOP_ADDRESS as ProcAddress,
      Api::OpenGlEs => ES_ADDRESS as ProcAddress,
    }
  }
}
