// ABOUTME: Translates host-language function names into Actinide primitive names

/// Operator names that read poorly as bare identifiers get written as Rust
/// dunder-style names (`add_`, `eq_`, …) in `builtins/*` and are translated
/// back to their operator spelling here, mirroring the original's
/// `dunder_names` table for Python special methods.
const OPERATOR_NAMES: &[(&str, &str)] = &[
    ("add_", "+"),
    ("sub_", "-"),
    ("mul_", "*"),
    ("div_", "/"),
    ("eq_", "="),
    ("ne_", "!="),
    ("lt_", "<"),
    ("le_", "<="),
    ("gt_", ">"),
    ("ge_", ">="),
];

/// Derives the Actinide-visible name for a host function named `name`:
///
/// * a name in [`OPERATOR_NAMES`] becomes its operator spelling outright;
/// * a trailing `_p` becomes a trailing `?` (`integer_p` → `integer?`);
/// * a single trailing `_` (used to dodge a Rust keyword, e.g. `list_`) is
///   stripped;
/// * every remaining underscore becomes a dash (`string_to_symbol` →
///   `string-to-symbol`).
pub fn lisp_name(name: &str) -> String {
    if let Some((_, op)) = OPERATOR_NAMES.iter().find(|(rust, _)| *rust == name) {
        return op.to_string();
    }

    let mut name = name.to_string();
    if let Some(stem) = name.strip_suffix("_p") {
        name = format!("{stem}?");
    } else if name.ends_with('_') && !name.ends_with("__") {
        name.pop();
    }

    name.replace('_', "-")
}
