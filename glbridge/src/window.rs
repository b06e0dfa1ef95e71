//! Native window references.

use raw_window_handle::{
  HasRawDisplayHandle, HasRawWindowHandle, RawDisplayHandle, RawWindowHandle,
};
use std::marker::PhantomData;

/// Non-owning reference to an externally owned native window.
///
/// Backends read the handles it carries when creating a context. They never create, resize or
/// destroy the window: it’s up to you to keep it alive for as long as the backend presents into
/// it.
#[derive(Clone, Copy, Debug)]
pub struct NativeWindowRef<'a> {
  window: RawWindowHandle,
  display: RawDisplayHandle,
  _window: PhantomData<&'a ()>,
}

impl<'a> NativeWindowRef<'a> {
  /// Reference a window through its [raw-window-handle] implementation.
  ///
  /// [raw-window-handle]: https://crates.io/crates/raw-window-handle
  pub fn new<W>(window: &'a W) -> Self
  where
    W: HasRawWindowHandle + HasRawDisplayHandle + ?Sized,
  {
    NativeWindowRef {
      window: window.raw_window_handle(),
      display: window.raw_display_handle(),
      _window: PhantomData,
    }
  }

  /// Reference a window from its raw handles.
  ///
  /// # Safety
  ///
  /// The handles must describe a live window (and its display connection) for `'a`.
  pub unsafe fn from_raw(window: RawWindowHandle, display: RawDisplayHandle) -> Self {
    NativeWindowRef {
      window,
      display,
      _window: PhantomData,
    }
  }

  /// Raw window handle.
  #[inline]
  pub fn window_handle(&self) -> RawWindowHandle {
    self.window
  }

  /// Raw display handle.
  #[inline]
  pub fn display_handle(&self) -> RawDisplayHandle {
    self.display
  }
}
