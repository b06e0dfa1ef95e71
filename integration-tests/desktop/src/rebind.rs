use colored::Colorize as _;
use glbridge::loader::load_gl;
use glbridge_front::{Api, Backend, ContextBackend as _, ContextRequest};

use crate::common::TestWindow;

const ROUNDS: usize = 100;

pub fn fixture() {
  let mut window = TestWindow::open("Rebind");
  let mut backend = Backend::new(Api::OpenGl);

  backend
    .create_context(ContextRequest::new(3, 3), window.native())
    .unwrap();
  load_gl(|name| backend.get_proc_address(name)).unwrap();

  for round in 0..ROUNDS {
    if !window.poll() {
      break;
    }

    backend.make_null_current().unwrap();
    backend.make_null_current().unwrap();
    backend.make_current().unwrap();

    let shade = round as f32 / ROUNDS as f32;
    unsafe {
      gl::ClearColor(shade, shade, shade, 1.);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }

    backend.swap_buffers();
  }

  backend.make_null_current().unwrap();
  drop(backend);

  println!("{}", "OK".green());
}
