use colored::Colorize as _;

mod common;

macro_rules! tests {
  ($($name:expr, $module:ident),* $(,)?) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    // run a given test
    fn run_test(name: &str) {
      $(
        if name == $name {
          $module::fixture();
          return;
        }
      )*

      println!("{} is not a valid test. Possible values", name.red());
      show_tests();
    }
  }
}

tests! {
  "clear-color", clear_color,
  "version-fallback", version_fallback,
  "rebind", rebind,
  "proc-address", proc_address,
}

fn show_tests() {
  for test_name in TEST_NAMES {
    println!("  -> {}", test_name.blue());
  }
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();

  let test_name = std::env::args().nth(1);

  if let Some(test_name) = test_name {
    println!("test name: {}", test_name.green());

    run_test(&test_name);
  } else {
    println!("Please provide a test name. Possible values");
    show_tests();
  }
}
