//! Small text helpers shared by encoders and the CLI.

/// Join items into a human-readable sentence.
///
/// `sentence(&["csv", "json", "xml"], ", ", Some(" and "))` gives
/// `"csv, json and xml"`. Without `last_delimiter` every item is joined with
/// `delimiter`.
pub fn sentence<S: AsRef<str>>(items: &[S], delimiter: &str, last_delimiter: Option<&str>) -> String {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    match (items.split_last(), last_delimiter) {
        (Some((last, init)), Some(last_delimiter)) if !init.is_empty() => {
            format!("{}{last_delimiter}{last}", init.join(delimiter))
        }
        _ => items.join(delimiter),
    }
}
