//! Joining of user-typed path fragments.
//!
//! The fragments come from the input field, not from the OS, so this
//! never touches the filesystem and always uses `/` as the separator.

/// Join path fragments with `/`, resolving `.` and `..` lexically.
///
/// Empty and `.` fragments are dropped. `..` removes the previous
/// segment, or is discarded when there is nothing left to remove. A
/// leading `/` survives only when the first kept fragment starts with one.
///
/// ```
/// use deskchat_core::path::join;
///
/// assert_eq!(join(["a", "b/c", "..", "d"]), "a/b/d");
/// assert_eq!(join([".", "x"]), "x");
/// assert_eq!(join(["a", "", "b"]), "a/b");
/// ```
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = parts
        .into_iter()
        .filter_map(|p| {
            let p = p.as_ref();
            (!p.is_empty() && p != ".").then(|| p.to_string())
        })
        .collect();

    let absolute = kept.first().is_some_and(|p| p.starts_with('/'));
    let joined = kept.join("/");

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    if absolute {
        format!("/{}", body)
    } else {
        body
    }
}
