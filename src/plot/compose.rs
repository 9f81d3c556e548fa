//! Canonical variable names
//!
//! The canonical name is the lookup key of a variable's column in the output
//! table, minus the run prefix:
//!
//! ```text
//! module.variable                      no array dimensions
//! module.variable[tok0]                one dimension
//! module.variable[tok0, tok1, tok2]    first, middle..., last
//! ```
//!
//! It has to match the exported column name byte for byte.

/// Compose `module.variable[tok0, ..., tokN]`
pub fn compose_full_name<S: AsRef<str>>(module: &str, variable: &str, tokens: &[S]) -> String {
    match tokens.split_last() {
        Some((last, _)) => compose_with_last(module, variable, tokens, last.as_ref()),
        None => format!("{}.{}", module, variable),
    }
}

/// Compose the canonical name with the last token replaced by `last`
///
/// With no tokens this is the plain `module.variable` name and `last` is not
/// used.
pub fn compose_with_last<S: AsRef<str>>(
    module: &str,
    variable: &str,
    tokens: &[S],
    last: &str,
) -> String {
    let mut name = format!("{}.{}", module, variable);
    let Some((_, leading)) = tokens.split_last() else {
        return name;
    };

    name.push('[');
    for token in leading {
        name.push_str(token.as_ref());
        name.push_str(", ");
    }
    name.push_str(last);
    name.push(']');
    name
}

/// Column name of a variable in one run: `"<run>: <full_name>"`
pub fn column_name(run: &str, full_name: &str) -> String {
    format!("{}: {}", run, full_name)
}
