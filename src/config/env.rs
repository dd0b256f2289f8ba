//! Environment variable expansion for raw configuration text.

/// Replace `$NAME` and `${NAME}` with values from the process environment.
///
/// Follows shell naming: `$NAME` takes the longest run of ASCII
/// alphanumerics and `_`, while `$0`..`$9`, `$*`, `$#`, `$$`, `$@`, `$!`,
/// `$?` and `$-` are one-character names. Unset variables expand to the empty
/// string. A `$` not followed by a name is kept; a malformed `${}` or an
/// unterminated `${` is dropped.
pub fn expand_env(text: &str) -> String {
    expand_with(text, |name| std::env::var(name).ok())
}

fn is_special(c: u8) -> bool {
    matches!(c, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-' | b'0'..=b'9')
}

fn is_name_char(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}

/// Name following a `$` and the number of bytes it spans.
///
/// An empty name with a non-zero width is malformed syntax to be dropped.
fn reference(s: &str) -> (&str, usize) {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'{') => {
            if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
                return (&s[1..2], 3);
            }
            match s[1..].find('}') {
                Some(0) => ("", 2),
                Some(end) => (&s[1..end + 1], end + 2),
                None => ("", 1),
            }
        }
        Some(&c) if is_special(c) => (&s[..1], 1),
        _ => {
            let len = bytes.iter().take_while(|&&c| is_name_char(c)).count();
            (&s[..len], len)
        }
    }
}

pub(crate) fn expand_with<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if after.is_empty() {
            out.push('$');
            rest = after;
            break;
        }

        let (name, width) = reference(after);
        if !name.is_empty() {
            out.push_str(&lookup(name).unwrap_or_default());
        } else if width == 0 {
            out.push('$');
        }
        rest = &after[width..];
    }

    out.push_str(rest);
    out
}
