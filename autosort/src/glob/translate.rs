//! Glob to regex translation.
//!
//! The translation is a single left-to-right pass over the pattern. Literal
//! characters are escaped individually, so the only regex syntax that reaches
//! the engine is what this module emits itself:
//!
//! | Glob      | Regex       |
//! |-----------|-------------|
//! | `*`       | `[^.]*`     |
//! | `?`       | `[^.]`      |
//! | `[abc]`   | `[abc]`     |
//! | `[^abc]`  | `[^abc]`    |
//! | `\x`, `x` | escaped `x` |

use super::error::PatternError;
use super::SEPARATOR;

/// Members collected for an open character class.
#[derive(Debug, Default)]
struct CharClass {
    negated: bool,
    members: String,
}

impl CharClass {
    /// True until the first member has been pushed.
    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn push(&mut self, c: char) {
        push_escaped(&mut self.members, c);
    }

    fn render(&self, out: &mut String) {
        out.push('[');
        if self.negated {
            out.push('^');
        }
        out.push_str(&self.members);
        out.push(']');
    }
}

/// Append `c` to `out` with any regex meaning removed.
fn push_escaped(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Translate a glob pattern into an anchored regex expression.
pub(super) fn translate(pattern: &str) -> Result<String, PatternError> {
    let separator = regex::escape(&SEPARATOR.to_string());
    let any_run = format!("[^{}]*", separator);
    let any_one = format!("[^{}]", separator);

    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');

    let mut class: Option<CharClass> = None;
    let mut escaped = false;

    for c in pattern.chars() {
        if escaped {
            escaped = false;
            match class.as_mut() {
                Some(cls) => cls.push(c),
                None => push_escaped(&mut regex, c),
            }
            continue;
        }

        match class.as_mut() {
            Some(cls) => match c {
                '\\' => escaped = true,
                '^' if cls.is_empty() && !cls.negated => cls.negated = true,
                ']' if !cls.is_empty() => {
                    cls.render(&mut regex);
                    class = None;
                }
                _ => cls.push(c),
            },
            None => match c {
                '\\' => escaped = true,
                '*' => regex.push_str(&any_run),
                '?' => regex.push_str(&any_one),
                '[' => class = Some(CharClass::default()),
                _ => push_escaped(&mut regex, c),
            },
        }
    }

    if class.is_some() {
        return Err(PatternError::UnclosedClass {
            pattern: pattern.to_string(),
        });
    }
    if escaped {
        return Err(PatternError::TrailingEscape {
            pattern: pattern.to_string(),
        });
    }

    regex.push('$');
    Ok(regex)
}
