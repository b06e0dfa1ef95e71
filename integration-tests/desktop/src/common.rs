//! A GLFW window without any client API, so that the context is ours to create.

use glfw::{Action, ClientApiHint, Glfw, Key, WindowEvent, WindowHint, WindowMode};
use glbridge::NativeWindowRef;
use std::sync::mpsc::Receiver;

pub struct TestWindow {
  pub glfw: Glfw,
  pub window: glfw::Window,
  pub events_rx: Receiver<(f64, WindowEvent)>,
}

impl TestWindow {
  pub fn open(title: &str) -> Self {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS).unwrap();
    glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));

    let (mut window, events_rx) = glfw
      .create_window(960, 540, title, WindowMode::Windowed)
      .unwrap();
    window.set_key_polling(true);
    window.set_close_polling(true);

    TestWindow {
      glfw,
      window,
      events_rx,
    }
  }

  pub fn native(&self) -> NativeWindowRef<'_> {
    NativeWindowRef::new(&self.window)
  }

  /// Poll events; `false` once the window was asked to close.
  pub fn poll(&mut self) -> bool {
    self.glfw.poll_events();

    for (_, event) in glfw::flush_messages(&self.events_rx) {
      match event {
        WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => return false,
        _ => (),
      }
    }

    true
  }
}
