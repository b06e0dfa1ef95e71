use colored::Colorize as _;
use glbridge::loader::load_gl;
use glbridge_front::{Api, Backend, ContextBackend as _, ContextRequest};

use crate::common::TestWindow;

pub fn fixture() {
  let mut window = TestWindow::open("Clear color");
  let mut backend = Backend::new(Api::OpenGl);

  backend
    .create_context(ContextRequest::new(3, 3), window.native())
    .unwrap();

  let info = load_gl(|name| backend.get_proc_address(name)).unwrap();
  println!("{}", info.to_string().green());

  let start = window.glfw.get_time() as f32;

  while window.poll() {
    let t = window.glfw.get_time() as f32 - start;
    let (width, height) = window.window.get_framebuffer_size();

    unsafe {
      gl::Viewport(0, 0, width, height);
      gl::ClearColor(t.cos() * 0.5 + 0.5, t.sin() * 0.5 + 0.5, 0.5, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }

    backend.swap_buffers();
  }
}
