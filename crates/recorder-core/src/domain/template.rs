//! VOD path templates.
//!
//! The user configures where recordings go with a template such as
//! `VODs/{platform}/{user}/{date}_{time}.mp4`.  Rendering replaces each
//! placeholder with a value taken from the streamer and the stream:
//!
//! | Placeholder                 | Value                                   |
//! |-----------------------------|-----------------------------------------|
//! | `{platform}`                | platform identifier, e.g. `tiktok`      |
//! | `{user}` `{username}` `{name}` | streamer's username                  |
//! | `{date}`                    | stream start date, `YYYY-MM-DD`         |
//! | `{time}` `{start_time}`     | stream start time, `HH-MM-SS` (24-hour) |
//! | `{title}`                   | stream title                            |
//!
//! Substituted values can never add path segments: separators inside a value
//! become `_`, and a value of exactly `.` or `..` becomes `_`.  The rendered
//! string still has to go through [`PathValidator`](crate::PathValidator).

use thiserror::Error;

/// Errors produced while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),
}

/// Values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    pub platform: String,
    pub username: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH-MM-SS`.
    pub time: String,
    pub title: String,
}

impl TemplateVars {
    fn lookup(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            "platform" => Some(&self.platform),
            "user" | "username" | "name" => Some(&self.username),
            "date" => Some(&self.date),
            "time" | "start_time" => Some(&self.time),
            "title" => Some(&self.title),
            _ => None,
        }
    }
}

/// Returns the placeholder names used by `template`, in order of appearance.
///
/// # Errors
///
/// Fails on an unterminated `{` or a stray `}`; unknown names are returned
/// as-is so the UI can highlight them.
pub fn placeholders(template: &str) -> Result<Vec<&str>, TemplateError> {
    let mut names = Vec::new();
    for_each_part(template, |part| {
        if let Part::Placeholder(name) = part {
            names.push(name);
        }
        Ok(())
    })?;
    Ok(names)
}

/// Renders `template` with `vars`.
///
/// # Errors
///
/// See [`TemplateError`].
pub fn render_template(template: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 32);
    for_each_part(template, |part| {
        match part {
            Part::Literal(text) => out.push_str(text),
            Part::Placeholder(name) => {
                let value = vars
                    .lookup(name)
                    .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
                out.push_str(&segment_safe(value));
            }
        }
        Ok(())
    })?;
    Ok(out)
}

enum Part<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn for_each_part<'a>(
    template: &'a str,
    mut f: impl FnMut(Part<'a>) -> Result<(), TemplateError>,
) -> Result<(), TemplateError> {
    let mut rest = template;
    let mut offset = 0;
    while !rest.is_empty() {
        let open = rest.find('{');
        let close = rest.find('}');
        match (open, close) {
            (_, Some(c)) if open.map_or(true, |o| c < o) => {
                return Err(TemplateError::UnmatchedBrace(offset + c));
            }
            (Some(o), _) => {
                if o > 0 {
                    f(Part::Literal(&rest[..o]))?;
                }
                let after = &rest[o + 1..];
                let end = after
                    .find('}')
                    .ok_or(TemplateError::Unterminated(offset + o))?;
                f(Part::Placeholder(&after[..end]))?;
                let consumed = o + 1 + end + 1;
                rest = &rest[consumed..];
                offset += consumed;
            }
            (None, _) => {
                f(Part::Literal(rest))?;
                break;
            }
        }
    }
    Ok(())
}

/// Makes `value` usable as (part of) a single path segment.
fn segment_safe(value: &str) -> String {
    if value == "." || value == ".." {
        return "_".to_string();
    }
    value
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}
