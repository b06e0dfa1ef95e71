//! A scripted WGL driver.
//!
//! It keeps track of every call, of the contexts alive, of the one current on the (single) test
//! thread and of the device contexts handed out, so that tests can check nothing leaks.

use glbridge::{GlVersion, PixelFormat, ProcAddress};
use glbridge_wgl::{Hwnd, Wgl, CREATE_CONTEXT_ATTRIBS};
use std::cell::RefCell;
use std::ffi::CStr;
use std::rc::Rc;

/// Address the driver gives for core entry points through the core library.
pub const CORE_ADDRESS: usize = 0x1000;
/// Address the driver gives for extension entry points.
pub const EXTENSION_ADDRESS: usize = 0x5000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FakeDevice(pub u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FakeContext(pub u32);

#[derive(Clone, Copy, Debug)]
pub struct FakeEntry;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
  Legacy,
  Versioned(GlVersion),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
  GetDc,
  ReleaseDc,
  ChoosePixelFormat,
  DescribePixelFormat(i32),
  GetPixelFormat,
  SetPixelFormat(i32),
  CreateLegacy(FakeContext),
  MakeCurrent(Option<FakeContext>),
  Delete(FakeContext),
  ResolveCreateContextAttribs,
  CreateWithAttribs(Vec<i32>),
  SwapBuffers,
}

#[derive(Debug)]
pub struct Driver {
  pub max_version: GlVersion,
  pub formats: Vec<PixelFormat>,
  pub window_format: Option<i32>,
  pub has_create_context_attribs: bool,
  pub legacy_fails: bool,
  pub reject_bind: bool,
  pub core_sentinel: usize,
  pub contexts: Vec<(FakeContext, Kind)>,
  pub current: Option<FakeContext>,
  pub devices_out: u32,
  pub calls: Vec<Call>,
  pub next_id: u32,
}

impl Driver {
  pub fn live_versioned(&self) -> Vec<FakeContext> {
    self
      .contexts
      .iter()
      .filter(|(_, kind)| matches!(kind, Kind::Versioned(_)))
      .map(|(ctx, _)| *ctx)
      .collect()
  }

  pub fn live_legacy(&self) -> usize {
    self
      .contexts
      .iter()
      .filter(|(_, kind)| *kind == Kind::Legacy)
      .count()
  }

  pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
    self.calls.iter().filter(|call| f(call)).count()
  }

  fn next(&mut self) -> FakeContext {
    self.next_id += 1;
    FakeContext(self.next_id)
  }
}

impl Default for Driver {
  fn default() -> Self {
    Driver {
      max_version: GlVersion::new(4, 6),
      formats: vec![PixelFormat {
        color_bits: 32,
        alpha_bits: 8,
        depth_bits: 24,
        stencil_bits: 8,
        double_buffer: true,
        draw_to_window: true,
        accelerated: true,
      }],
      window_format: None,
      has_create_context_attribs: true,
      legacy_fails: false,
      reject_bind: false,
      core_sentinel: 0,
      contexts: Vec::new(),
      current: None,
      devices_out: 0,
      calls: Vec::new(),
      next_id: 0,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct FakeWgl {
  pub driver: Rc<RefCell<Driver>>,
}

impl FakeWgl {
  pub fn new(driver: Driver) -> Self {
    FakeWgl {
      driver: Rc::new(RefCell::new(driver)),
    }
  }
}

fn is_core(name: &CStr) -> bool {
  matches!(
    name.to_bytes(),
    b"glClear" | b"glClearColor" | b"glGetString" | b"glGetIntegerv" | b"glViewport"
  )
}

impl Wgl for FakeWgl {
  type Device = FakeDevice;
  type Context = FakeContext;
  type CreateContextAttribs = FakeEntry;

  fn device(&mut self, _: Hwnd) -> Option<FakeDevice> {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::GetDc);
    d.devices_out += 1;
    Some(FakeDevice(1))
  }

  fn release_device(&mut self, _: Hwnd, _: FakeDevice) {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::ReleaseDc);
    d.devices_out -= 1;
  }

  fn choose_pixel_format(&mut self, _: FakeDevice, _: &PixelFormat) -> Option<i32> {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::ChoosePixelFormat);
    (!d.formats.is_empty()).then_some(1)
  }

  fn describe_pixel_format(&mut self, _: FakeDevice, index: i32) -> Option<PixelFormat> {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::DescribePixelFormat(index));
    d.formats.get(index as usize - 1).copied()
  }

  fn pixel_format(&mut self, _: FakeDevice) -> Option<i32> {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::GetPixelFormat);
    d.window_format
  }

  fn set_pixel_format(&mut self, _: FakeDevice, index: i32, _: &PixelFormat) -> bool {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::SetPixelFormat(index));

    if d.window_format.is_some() {
      return false;
    }

    d.window_format = Some(index);
    true
  }

  fn create_legacy_context(&mut self, _: FakeDevice) -> Option<FakeContext> {
    let mut d = self.driver.borrow_mut();

    if d.legacy_fails {
      return None;
    }

    let ctx = d.next();
    d.calls.push(Call::CreateLegacy(ctx));
    d.contexts.push((ctx, Kind::Legacy));
    Some(ctx)
  }

  fn make_current(&mut self, binding: Option<(FakeDevice, FakeContext)>) -> bool {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::MakeCurrent(binding.map(|(_, ctx)| ctx)));

    match binding {
      None => {
        d.current = None;
        true
      }
      Some((_, ctx)) => {
        if d.reject_bind || !d.contexts.iter().any(|(live, _)| *live == ctx) {
          return false;
        }

        d.current = Some(ctx);
        true
      }
    }
  }

  fn delete_context(&mut self, context: FakeContext) -> bool {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::Delete(context));

    let before = d.contexts.len();
    d.contexts.retain(|(live, _)| *live != context);

    if d.current == Some(context) {
      d.current = None;
    }

    d.contexts.len() != before
  }

  fn create_context_attribs(&mut self) -> Option<FakeEntry> {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::ResolveCreateContextAttribs);

    // only resolvable while a context is current
    let current_legacy = d
      .current
      .map_or(false, |ctx| d.contexts.contains(&(ctx, Kind::Legacy)));

    (current_legacy && d.has_create_context_attribs).then_some(FakeEntry)
  }

  fn create_context_with_attribs(
    &mut self,
    _: FakeEntry,
    _: FakeDevice,
    attribs: &[i32],
  ) -> Option<FakeContext> {
    let mut d = self.driver.borrow_mut();
    d.calls.push(Call::CreateWithAttribs(attribs.to_vec()));

    let mut version = GlVersion::new(1, 0);
    let mut core = false;

    for pair in attribs.chunks(2) {
      match pair {
        [0x2091, major] => version.major = *major as u8,
        [0x2092, minor] => version.minor = *minor as u8,
        [0x9126, mask] => core = mask & 0x1 != 0,
        _ => (),
      }
    }

    if !core || version > d.max_version {
      return None;
    }

    let ctx = d.next();
    d.contexts.push((ctx, Kind::Versioned(version)));
    Some(ctx)
  }

  fn swap_buffers(&mut self, _: FakeDevice) -> bool {
    self.driver.borrow_mut().calls.push(Call::SwapBuffers);
    true
  }

  fn extension_proc_address(&self, name: &CStr) -> ProcAddress {
    if name.to_bytes() == CREATE_CONTEXT_ATTRIBS.as_bytes() {
      return EXTENSION_ADDRESS as ProcAddress;
    }

    if is_core(name) {
      self.driver.borrow().core_sentinel as ProcAddress
    } else if name.to_bytes().starts_with(b"glDebug") {
      EXTENSION_ADDRESS as ProcAddress
    } else {
      std::ptr::null()
    }
  }

  fn core_proc_address(&self, name: &CStr) -> ProcAddress {
    if is_core(name) {
      CORE_ADDRESS as ProcAddress
    } else {
      std::ptr::null()
    }
  }
}
