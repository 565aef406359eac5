/// Wrap a variable name in the `%NAME%` marker used by target files.
pub fn placeholder(name: &str) -> String {
    format!("%{name}%")
}

/// Replace the first `%NAME%` in `input` with `value`.
///
/// Later occurrences are left untouched. The flag is `false` when the
/// placeholder does not appear, in which case the returned string equals
/// `input`.
pub fn substitute_first(input: &str, name: &str, value: &str) -> (String, bool) {
    let token = placeholder(name);
    match input.find(&token) {
        Some(start) => {
            let mut result = String::with_capacity(input.len() - token.len() + value.len());
            result.push_str(&input[..start]);
            result.push_str(value);
            result.push_str(&input[start + token.len()..]);
            (result, true)
        },
        None => (input.to_owned(), false),
    }
}
