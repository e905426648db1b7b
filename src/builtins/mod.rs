// ABOUTME: Registers the full core primitive set (§6.3) into a fresh Session

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod lists;
pub mod logic;
pub mod ports;
pub mod reflection;
pub mod types;
pub mod vectors;

use crate::session::Session;

/// Binds every core primitive and macro named in `spec.md` §6.3 into
/// `session`'s value and macro environments. [`Session::with_builtins`] is
/// the one caller; a bare [`Session::new`] gets only the six core special
/// forms.
pub fn register_all(session: &mut Session) {
    arithmetic::register(session);
    comparison::register(session);
    logic::register(session);
    types::register(session);
    lists::register(session);
    vectors::register(session);
    ports::register(session);
    reflection::register(session);
    control::register(session);
}
