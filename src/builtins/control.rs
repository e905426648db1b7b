// ABOUTME: `values` — passes its arguments through untouched as a multi-value tuple

use crate::session::Session;
use crate::value::Value;

/// `values` is the primitive that actually produces a multi-value tuple
/// (§4.6's "a primitive may return a tuple of length != 1"): it is the
/// identity function on its argument list, relying entirely on the
/// evaluator's splicing behavior in application position to make the tuple
/// visible to a caller.
pub fn register(session: &mut Session) {
    session.bind_primitive("values", |args| Ok(args.to_vec()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::display;

    #[test]
    fn values_splices_into_an_enclosing_application() {
        let mut session = Session::with_builtins();
        session
            .run("(define (three) (values 1 2.2 \"three\"))")
            .unwrap();
        let results = session.run("(list (three))").unwrap();
        assert_eq!(display(&results[0]), "(1 2.2 \"three\")");
    }

    #[test]
    fn values_at_top_level_returns_every_value() {
        let mut session = Session::with_builtins();
        let results = session.run("(values 1 2 3)").unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn the_quicktest_scenario_from_the_spec() {
        // (define a (lambda (b) (values 1 2.2 "three" a b))) then (a "foo")
        let mut session = Session::with_builtins();
        session
            .run("(define a (lambda (b) (values 1 2.2 \"three\" a b)))")
            .unwrap();
        let results = session.run("(a \"foo\")").unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(display(&results[0]), "1");
        assert_eq!(display(&results[1]), "2.2");
        assert_eq!(display(&results[2]), "\"three\"");
        assert!(matches!(results[3], Value::Procedure(_)));
        assert_eq!(display(&results[4]), "\"foo\"");
    }
}
