// ABOUTME: Version and REPL banner constants — the crate's runtime behavior takes no other configuration

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "Actinide";
pub const WELCOME_SUBTITLE: &str = "An embeddable Lisp/Scheme-dialect interpreter";
