//! Ask for the most recent version first, walking down until the driver accepts one. Every
//! rejected request must leave the backend ready for the next one.

use colored::Colorize as _;
use glbridge_front::{Api, Backend, BackendState, ContextBackend as _, ContextRequest};

use crate::common::TestWindow;

const VERSIONS: &[(u8, u8)] = &[(4, 6), (4, 5), (4, 3), (4, 1), (3, 3), (3, 2)];

pub fn fixture() {
  let window = TestWindow::open("Version fallback");
  let mut backend = Backend::new(Api::OpenGl);

  let created = VERSIONS.iter().find(|&&(major, minor)| {
    let request = ContextRequest::new(major, minor);

    match backend.create_context(request, window.native()) {
      Ok(()) => true,

      Err(e) => {
        println!("{}: {}", request.to_string().yellow(), e);
        assert_eq!(backend.state(), BackendState::NoContext);
        false
      }
    }
  });

  match created {
    Some(&(major, minor)) => {
      println!("negotiated {}.{}", major, minor);
      assert_eq!(backend.version().map(|v| (v.major, v.minor)), Some((major, minor)));
      println!("{}", "OK".green());
    }

    None => println!("{}", "no version accepted".red()),
  }
}
