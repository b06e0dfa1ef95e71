use colored::Colorize as _;
use glbridge::proc_address::is_sentinel;
use glbridge_front::{get_proc_address, Api, Backend, ContextBackend as _, ContextRequest};

use crate::common::TestWindow;

// core 1.1 entry points, newer core ones and an extension
const NAMES: &[&str] = &[
  "glClear",
  "glGetString",
  "glViewport",
  "glCreateShader",
  "glGenVertexArrays",
  "glDebugMessageCallback",
];

pub fn fixture() {
  let window = TestWindow::open("Procedure resolution");
  let mut backend = Backend::new(Api::OpenGl);

  backend
    .create_context(ContextRequest::new(3, 3), window.native())
    .unwrap();

  for name in NAMES {
    let from_backend = backend.get_proc_address(name);
    let free = get_proc_address(Api::OpenGl, name);
    let status = if from_backend.is_null() {
      "null".yellow()
    } else if is_sentinel(from_backend) {
      "sentinel".red()
    } else {
      "ok".green()
    };

    println!("{:<24} {:p} {:p} {}", name, from_backend, free, status);
  }
}
