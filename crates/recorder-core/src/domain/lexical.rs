//! Lexical path operations over plain strings.
//!
//! Nothing in this module touches the file system: `..` is resolved against
//! the preceding segment by string rules alone, and symlinks are never
//! followed.  Two path styles are supported so that Windows paths can be
//! validated on a Linux build (and vice versa):
//!
//! | Style     | Separators  | Output separator | Volume names            |
//! |-----------|-------------|------------------|-------------------------|
//! | `Unix`    | `/`         | `/`              | none                    |
//! | `Windows` | `/` and `\` | `\`              | `C:` and `\\host\share` |
//!
//! # Examples
//!
//! ```rust
//! use recorder_core::domain::lexical::{clean, join, PathStyle};
//!
//! assert_eq!(clean(PathStyle::Unix, "a//b/./c/../d"), "a/b/d");
//! assert_eq!(join(PathStyle::Unix, "/home/me", "../x"), "/home/x");
//! assert_eq!(clean(PathStyle::Windows, "C:/Users//me"), r"C:\Users\me");
//! ```

/// The separator and volume rules applied to a path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    Unix,
    Windows,
}

impl PathStyle {
    /// The separator written by [`clean`], [`join`] and [`rel`].
    pub fn separator(self) -> char {
        match self {
            PathStyle::Unix => '/',
            PathStyle::Windows => '\\',
        }
    }

    /// Returns `true` if `c` separates path segments in this style.
    pub fn is_separator(self, c: char) -> bool {
        match self {
            PathStyle::Unix => c == '/',
            PathStyle::Windows => c == '/' || c == '\\',
        }
    }

    /// Length in bytes of the leading volume name, or 0 if there is none.
    ///
    /// Windows recognises a drive letter (`C:`) and a UNC prefix
    /// (`\\host\share`).  Unix paths never carry a volume.
    pub fn volume_len(self, path: &str) -> usize {
        if self == PathStyle::Unix {
            return 0;
        }
        let b = path.as_bytes();
        let sep = |byte: u8| byte == b'/' || byte == b'\\';

        if b.len() >= 2 && b[1] == b':' && b[0].is_ascii_alphabetic() {
            return 2;
        }

        // UNC: two separators, a host name, one separator, a share name.
        if b.len() >= 5 && sep(b[0]) && sep(b[1]) && !sep(b[2]) && b[2] != b'.' {
            let Some(host_end) = (3..b.len()).find(|&i| sep(b[i])) else {
                return 0;
            };
            let share_start = host_end + 1;
            if share_start >= b.len() || sep(b[share_start]) || b[share_start] == b'.' {
                return 0;
            }
            return (share_start..b.len())
                .find(|&i| sep(b[i]))
                .unwrap_or(b.len());
        }
        0
    }

    /// Compares two path segments the way the platform's file system would.
    fn same_segment(self, a: &str, b: &str) -> bool {
        match self {
            PathStyle::Unix => a == b,
            PathStyle::Windows => a
                .chars()
                .flat_map(char::to_lowercase)
                .eq(b.chars().flat_map(char::to_lowercase)),
        }
    }

    /// Rewrites every accepted separator to the canonical one.
    fn canonical(self, s: &str) -> String {
        s.chars()
            .map(|c| if self.is_separator(c) { self.separator() } else { c })
            .collect()
    }
}

/// Returns the shortest lexically equivalent form of `path`.
///
/// - Runs of separators collapse into one.
/// - `.` segments are dropped.
/// - `..` removes the preceding segment; at the root it is dropped, and at the
///   start of a relative path it is kept.
/// - An empty result becomes `.`.
pub fn clean(style: PathStyle, path: &str) -> String {
    let (volume, rest) = path.split_at(style.volume_len(path));
    let volume = style.canonical(volume);

    if rest.is_empty() {
        // A bare UNC volume is already clean; a bare drive letter is relative.
        if volume.len() > 2 {
            return volume;
        }
        return format!("{volume}.");
    }

    let rooted = rest.starts_with(|c: char| style.is_separator(c));
    let mut stack: Vec<&str> = Vec::new();
    for segment in rest.split(|c: char| style.is_separator(c)) {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(&last) if last != ".." => {
                    stack.pop();
                }
                _ if !rooted => stack.push(".."),
                _ => {}
            },
            _ => stack.push(segment),
        }
    }

    let sep = style.separator();
    let mut out = volume;
    if rooted {
        out.push(sep);
    }
    out.push_str(&stack.join(&sep.to_string()));
    if !rooted && stack.is_empty() {
        out.push('.');
    }
    out
}

/// Joins `base` and `elem` with the style's separator and cleans the result.
///
/// Empty arguments are ignored; joining two empty strings yields an empty
/// string.  A rooted `elem` is appended, not substituted: `join("/a", "/b")`
/// is `/a/b`.
pub fn join(style: PathStyle, base: &str, elem: &str) -> String {
    match (base.is_empty(), elem.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean(style, elem),
        (false, true) => clean(style, base),
        (false, false) => clean(style, &format!("{base}{}{elem}", style.separator())),
    }
}

/// Returns `path` without its volume and leading separators.
///
/// `/etc/x` becomes `etc/x`; on Windows `C:\x` and `\\host\share\x` both
/// become `x`.  A path that is only a root or volume yields `""`.
pub fn strip_root(style: PathStyle, path: &str) -> &str {
    path[style.volume_len(path)..].trim_start_matches(|c: char| style.is_separator(c))
}

/// Returns the last element of `path`.
///
/// Trailing separators are ignored.  An empty path yields `.`, and a path of
/// only separators yields a single separator.
pub fn base_name(style: PathStyle, path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(|c: char| style.is_separator(c));
    let without_volume = &trimmed[style.volume_len(trimmed)..];
    let last = match without_volume.rfind(|c: char| style.is_separator(c)) {
        Some(i) => &without_volume[i + 1..],
        None => without_volume,
    };
    if last.is_empty() {
        return style.separator().to_string();
    }
    last.to_string()
}

/// Returns the extension of the last element of `path`, including the dot.
///
/// The extension is everything from the final `.` of the last element, so
/// `clip.` has extension `.` and `archive.tar.mp4` has extension `.mp4`.
pub fn extension(style: PathStyle, path: &str) -> &str {
    for (i, c) in path.char_indices().rev() {
        if style.is_separator(c) {
            break;
        }
        if c == '.' {
            return &path[i..];
        }
    }
    ""
}

/// Returns a relative path that is lexically equivalent to `target` when
/// joined onto `base`.
///
/// Returns `None` when no such path can be computed: one side is rooted and
/// the other is not, the volumes differ, or `base` itself contains a `..`
/// that would have to be walked back.
pub fn rel(style: PathStyle, base: &str, target: &str) -> Option<String> {
    let base_vol_len = style.volume_len(base);
    let targ_vol_len = style.volume_len(target);
    let base_clean = clean(style, base);
    let targ_clean = clean(style, target);
    if style.same_segment(&targ_clean, &base_clean) {
        return Some(".".to_string());
    }

    let sep = style.separator();
    let (base_vol, mut base_rest) = base_clean.split_at(base_vol_len);
    let (targ_vol, targ_rest) = targ_clean.split_at(targ_vol_len);
    let unc_root = sep.to_string();
    if base_rest == "." {
        base_rest = "";
    } else if base_rest.is_empty() && base_vol_len > 2 {
        base_rest = &unc_root;
    }

    let base_rooted = base_rest.starts_with(sep);
    let targ_rooted = targ_rest.starts_with(sep);
    if base_rooted != targ_rooted || !style.same_segment(base_vol, targ_vol) {
        return None;
    }

    let segments = |s: &str| -> Vec<String> {
        s.split(sep)
            .filter(|seg| !seg.is_empty() && *seg != ".")
            .map(str::to_string)
            .collect()
    };
    let base_segs = segments(base_rest);
    let targ_segs = segments(targ_rest);

    let common = base_segs
        .iter()
        .zip(&targ_segs)
        .take_while(|(b, t)| style.same_segment(b, t))
        .count();
    if base_segs.get(common).map(String::as_str) == Some("..") {
        return None;
    }

    let mut parts: Vec<&str> = vec![".."; base_segs.len() - common];
    parts.extend(targ_segs[common..].iter().map(String::as_str));
    if parts.is_empty() {
        return Some(".".to_string());
    }
    Some(parts.join(&sep.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
