//! WGL on Win32.

use glbridge::library::ProcessLibrary;
use glbridge::proc_address::{self, is_sentinel};
use glbridge::{PixelFormat, ProcAddress};
use std::ffi::{c_int, CStr};
use std::mem;
use winapi::shared::minwindef::{FALSE, UINT};
use winapi::shared::windef::{HDC, HGLRC, HWND};
use winapi::um::wingdi::{
  ChoosePixelFormat, DescribePixelFormat, GetPixelFormat, SetPixelFormat, SwapBuffers,
  wglCreateContext, wglDeleteContext, wglGetProcAddress, wglMakeCurrent, PFD_DOUBLEBUFFER,
  PFD_DRAW_TO_WINDOW, PFD_GENERIC_ACCELERATED, PFD_GENERIC_FORMAT, PFD_MAIN_PLANE,
  PFD_SUPPORT_OPENGL, PFD_TYPE_RGBA, PIXELFORMATDESCRIPTOR,
};
use winapi::um::winuser::{GetDC, ReleaseDC};

use crate::native::{Hwnd, Wgl};

/// Device context of a window (`HDC`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hdc(HDC);

/// OpenGL rendering context (`HGLRC`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hglrc(HGLRC);

// Both are process-wide handles; wglMakeCurrent rejects binding a context current elsewhere.
unsafe impl Send for Hdc {}
unsafe impl Send for Hglrc {}

// The core GL library, for entry points wglGetProcAddress doesn’t expose.
static OPENGL32: ProcessLibrary = ProcessLibrary::new(&["opengl32.dll"]);

/// `wglCreateContextAttribsARB`.
pub type CreateContextAttribsArb =
  unsafe extern "system" fn(hdc: HDC, share: HGLRC, attribs: *const c_int) -> HGLRC;

/// Resolve an OpenGL entry point: `wglGetProcAddress` first, `opengl32.dll` when it answers with a
/// sentinel.
///
/// A context must be current on the calling thread.
pub fn get_proc_address(name: &str) -> ProcAddress {
  proc_address::resolve_with(name, extension_proc_address, core_proc_address)
}

fn extension_proc_address(name: &CStr) -> ProcAddress {
  unsafe { wglGetProcAddress(name.as_ptr()) as ProcAddress }
}

fn core_proc_address(name: &CStr) -> ProcAddress {
  OPENGL32.symbol(name)
}

fn descriptor(format: &PixelFormat) -> PIXELFORMATDESCRIPTOR {
  let mut flags = PFD_SUPPORT_OPENGL;

  if format.draw_to_window {
    flags |= PFD_DRAW_TO_WINDOW;
  }

  if format.double_buffer {
    flags |= PFD_DOUBLEBUFFER;
  }

  // PIXELFORMATDESCRIPTOR is plain data, all zeros is a valid “don’t care”
  let mut pfd: PIXELFORMATDESCRIPTOR = unsafe { mem::zeroed() };
  pfd.nSize = mem::size_of::<PIXELFORMATDESCRIPTOR>() as u16;
  pfd.nVersion = 1;
  pfd.dwFlags = flags;
  pfd.iPixelType = PFD_TYPE_RGBA;
  pfd.cColorBits = format.color_bits;
  pfd.cAlphaBits = format.alpha_bits;
  pfd.cDepthBits = format.depth_bits;
  pfd.cStencilBits = format.stencil_bits;
  pfd.iLayerType = PFD_MAIN_PLANE;
  pfd
}

fn pixel_format(pfd: &PIXELFORMATDESCRIPTOR) -> PixelFormat {
  let generic = pfd.dwFlags & PFD_GENERIC_FORMAT != 0;
  let generic_accelerated = pfd.dwFlags & PFD_GENERIC_ACCELERATED != 0;

  PixelFormat {
    color_bits: pfd.cColorBits,
    alpha_bits: pfd.cAlphaBits,
    depth_bits: pfd.cDepthBits,
    stencil_bits: pfd.cStencilBits,
    double_buffer: pfd.dwFlags & PFD_DOUBLEBUFFER != 0,
    draw_to_window: pfd.dwFlags & PFD_DRAW_TO_WINDOW != 0,
    accelerated: !generic || generic_accelerated,
  }
}

/// WGL through the Win32 API.
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Wgl;

impl Wgl for Win32Wgl {
  type Device = Hdc;
  type Context = Hglrc;
  type CreateContextAttribs = CreateContextAttribsArb;

  fn device(&mut self, window: Hwnd) -> Option<Hdc> {
    let hdc = unsafe { GetDC(window.as_ptr() as HWND) };
    (!hdc.is_null()).then_some(Hdc(hdc))
  }

  fn release_device(&mut self, window: Hwnd, device: Hdc) {
    unsafe { ReleaseDC(window.as_ptr() as HWND, device.0) };
  }

  fn choose_pixel_format(&mut self, device: Hdc, format: &PixelFormat) -> Option<i32> {
    let pfd = descriptor(format);
    let index = unsafe { ChoosePixelFormat(device.0, &pfd) };
    (index != 0).then_some(index)
  }

  fn describe_pixel_format(&mut self, device: Hdc, index: i32) -> Option<PixelFormat> {
    let mut pfd: PIXELFORMATDESCRIPTOR = unsafe { mem::zeroed() };
    let described = unsafe {
      DescribePixelFormat(
        device.0,
        index,
        mem::size_of::<PIXELFORMATDESCRIPTOR>() as UINT,
        &mut pfd,
      )
    };

    (described != 0).then(|| pixel_format(&pfd))
  }

  fn pixel_format(&mut self, device: Hdc) -> Option<i32> {
    let index = unsafe { GetPixelFormat(device.0) };
    (index != 0).then_some(index)
  }

  fn set_pixel_format(&mut self, device: Hdc, index: i32, format: &PixelFormat) -> bool {
    let pfd = descriptor(format);
    unsafe { SetPixelFormat(device.0, index, &pfd) != FALSE }
  }

  fn create_legacy_context(&mut self, device: Hdc) -> Option<Hglrc> {
    let context = unsafe { wglCreateContext(device.0) };
    (!context.is_null()).then_some(Hglrc(context))
  }

  fn make_current(&mut self, binding: Option<(Hdc, Hglrc)>) -> bool {
    let (device, context) = match binding {
      Some((device, context)) => (device.0, context.0),
      None => (std::ptr::null_mut(), std::ptr::null_mut()),
    };

    unsafe { wglMakeCurrent(device, context) != FALSE }
  }

  fn delete_context(&mut self, context: Hglrc) -> bool {
    unsafe { wglDeleteContext(context.0) != FALSE }
  }

  fn create_context_attribs(&mut self) -> Option<CreateContextAttribsArb> {
    let address = extension_proc_address(c"wglCreateContextAttribsARB");

    if is_sentinel(address) {
      None
    } else {
      Some(unsafe { mem::transmute::<ProcAddress, CreateContextAttribsArb>(address) })
    }
  }

  fn create_context_with_attribs(
    &mut self,
    entry: CreateContextAttribsArb,
    device: Hdc,
    attribs: &[i32],
  ) -> Option<Hglrc> {
    let context = unsafe { entry(device.0, std::ptr::null_mut(), attribs.as_ptr()) };
    (!context.is_null()).then_some(Hglrc(context))
  }

  fn swap_buffers(&mut self, device: Hdc) -> bool {
    unsafe { SwapBuffers(device.0) != FALSE }
  }

  fn extension_proc_address(&self, name: &CStr) -> ProcAddress {
    extension_proc_address(name)
  }

  fn core_proc_address(&self, name: &CStr) -> ProcAddress {
    core_proc_address(name)
  }
}
