//! Validation of untrusted recording paths against a trusted base directory.
//!
//! The user types a VOD path such as `VODs/tiktok/alice/clip.mp4`; the
//! application owns the base directory it will be written under (the
//! "archive folder", usually the user's Downloads).  [`PathValidator`] decides
//! whether the typed path is safe to write to, purely by string rules.  No
//! file-system call is made, so the validator can run on every keystroke.
//!
//! # Checks (first failure wins)
//!
//! 1. Both inputs non-empty, else [`PathError::InvalidInput`].
//! 2. The candidate is cleaned lexically (see [`lexical::clean`]) and any
//!    volume or root is stripped, so `/etc/x` is treated as `etc/x`.
//! 3. The cleaned candidate is joined onto the base directory.
//! 4. The joined path must not exceed [`MAX_FULL_PATH_LEN`] bytes.
//! 5. A candidate that is itself `.` or `..` is an invalid file name.
//! 6. The joined path must stay inside the base directory.
//! 7. The joined path's last element must not be empty, `.` or `..`.
//! 8. Any extension must be `.mp4` (case-insensitive); none is also accepted.
//! 9. The last element must pass the platform's name rules.
//!
//! On success the **cleaned candidate** is returned, not the joined path.  It
//! is always relative, so [`PathValidator::resolve`] and `Path::join` onto the
//! base give the same target.
//!
//! # Platform policy
//!
//! Name rules differ between Windows (reserved device names and nine
//! forbidden characters) and everything else (only `/`).  The policy is a
//! constructor argument so both can be exercised on any build target;
//! [`Platform::current`] picks the one matching the compiled target.

use std::ffi::OsStr;

use thiserror::Error;
use tracing::debug;

use super::lexical::{self, PathStyle};

/// Upper bound, in bytes, on the joined base + candidate path.
pub const MAX_FULL_PATH_LEN: usize = 100;

/// The only extension accepted for recording files.
pub const RECORDING_EXTENSION: &str = ".mp4";

/// Device names Windows reserves regardless of extension.
const WINDOWS_RESERVED: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters Windows forbids anywhere in a file name.
const WINDOWS_FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Target platform whose path syntax and naming rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Lexical path rules for this platform.
    pub fn path_style(self) -> PathStyle {
        match self {
            Platform::Windows => PathStyle::Windows,
            Platform::Unix => PathStyle::Unix,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Why a file name failed the platform's name rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameViolation {
    #[error("not valid UTF-8")]
    NotUtf8,
    #[error("contains a NUL byte")]
    NulByte,
    #[error("reserved on Windows ({0})")]
    Reserved(String),
    #[error("forbidden character {0:?}")]
    ForbiddenChar(char),
}

/// Reasons a candidate path is rejected.
///
/// None of these are retriable: the user must be asked for a different path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The base directory or the candidate is empty.
    #[error("invalid file path (must be non-empty)")]
    InvalidInput,

    /// The joined path exceeds [`MAX_FULL_PATH_LEN`].
    #[error("path is too long ({len} > {max} chars)")]
    PathTooLong { len: usize, max: usize },

    /// The candidate resolves outside the base directory.
    #[error("path escapes the base directory")]
    PathEscape,

    /// The last path element is empty, `.` or `..`.
    #[error("invalid filename")]
    InvalidFilename,

    /// The extension is something other than `.mp4`.
    #[error("invalid file extension {ext:?} (must be .mp4 or none)")]
    InvalidExtension { ext: String },

    /// The file name breaks the platform's naming rules.
    #[error("invalid characters in filename: {0}")]
    InvalidCharacters(NameViolation),
}

/// Field-less classification of a [`PathError`], for callers that only need
/// to branch on the category (e.g. to pick a UI message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathErrorKind {
    InvalidInput,
    PathTooLong,
    PathEscape,
    InvalidFilename,
    InvalidExtension,
    InvalidCharacters,
}

impl PathError {
    pub fn kind(&self) -> PathErrorKind {
        match self {
            PathError::InvalidInput => PathErrorKind::InvalidInput,
            PathError::PathTooLong { .. } => PathErrorKind::PathTooLong,
            PathError::PathEscape => PathErrorKind::PathEscape,
            PathError::InvalidFilename => PathErrorKind::InvalidFilename,
            PathError::InvalidExtension { .. } => PathErrorKind::InvalidExtension,
            PathError::InvalidCharacters(_) => PathErrorKind::InvalidCharacters,
        }
    }
}

impl PathErrorKind {
    /// Stable snake_case identifier, used in UI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            PathErrorKind::InvalidInput => "invalid_input",
            PathErrorKind::PathTooLong => "path_too_long",
            PathErrorKind::PathEscape => "path_escape",
            PathErrorKind::InvalidFilename => "invalid_filename",
            PathErrorKind::InvalidExtension => "invalid_extension",
            PathErrorKind::InvalidCharacters => "invalid_characters",
        }
    }
}

/// Stateless validator for recording paths under a trusted base directory.
///
/// # Example
///
/// ```rust
/// use recorder_core::{PathError, PathValidator, Platform};
///
/// let v = PathValidator::new(Platform::Unix);
/// assert_eq!(v.validate("/home/me/Downloads", "VODs/./clip.mp4").unwrap(), "VODs/clip.mp4");
/// assert_eq!(v.validate("/home/me/Downloads", "../clip.mp4"), Err(PathError::PathEscape));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathValidator {
    platform: Platform,
}

impl PathValidator {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// A validator enforcing the rules of the compiled target.
    pub fn for_current_platform() -> Self {
        Self::new(Platform::current())
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Validates `candidate` as a recording path under `base_dir`.
    ///
    /// Returns the cleaned candidate, relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// See the module documentation for the order of checks and the
    /// [`PathError`] each one produces.
    pub fn validate(&self, base_dir: &str, candidate: &str) -> Result<String, PathError> {
        let result = self.check(base_dir, candidate);
        if let Err(e) = &result {
            debug!(candidate, kind = e.kind().as_str(), "rejected recording path: {e}");
        }
        result
    }

    /// Like [`validate`](Self::validate) for OS strings, such as a directory
    /// returned by a native picker.
    ///
    /// # Errors
    ///
    /// Input that is not valid UTF-8 is rejected with
    /// [`NameViolation::NotUtf8`]; otherwise as [`validate`](Self::validate).
    pub fn validate_os(&self, base_dir: &OsStr, candidate: &OsStr) -> Result<String, PathError> {
        if base_dir.is_empty() || candidate.is_empty() {
            return Err(PathError::InvalidInput);
        }
        match (base_dir.to_str(), candidate.to_str()) {
            (Some(base), Some(cand)) => self.validate(base, cand),
            _ => Err(PathError::InvalidCharacters(NameViolation::NotUtf8)),
        }
    }

    /// Joins a path previously returned by [`validate`](Self::validate) onto
    /// `base_dir`, using the same lexical rules the check was made with.
    pub fn resolve(&self, base_dir: &str, sanitized: &str) -> String {
        lexical::join(self.platform.path_style(), base_dir, sanitized)
    }

    fn check(&self, base_dir: &str, candidate: &str) -> Result<String, PathError> {
        let style = self.platform.path_style();

        if base_dir.is_empty() || candidate.is_empty() {
            return Err(PathError::InvalidInput);
        }

        let cleaned = match lexical::strip_root(style, &lexical::clean(style, candidate)) {
            "" => ".".to_string(),
            rest => rest.to_string(),
        };
        let full_path = lexical::join(style, base_dir, &cleaned);

        if full_path.len() > MAX_FULL_PATH_LEN {
            return Err(PathError::PathTooLong {
                len: full_path.len(),
                max: MAX_FULL_PATH_LEN,
            });
        }

        // "." and ".." collapse into the base directory or its parent once
        // joined, so their shape is judged on the candidate itself.
        if matches!(cleaned.as_str(), "." | "..") {
            return Err(PathError::InvalidFilename);
        }

        match lexical::rel(style, base_dir, &full_path) {
            Some(rel) if rel.split(style.separator()).next() != Some("..") => {}
            _ => return Err(PathError::PathEscape),
        }

        let base = lexical::base_name(style, &full_path);
        if is_dot_name(style, &base) {
            return Err(PathError::InvalidFilename);
        }

        let ext = lexical::extension(style, &base);
        if !ext.is_empty() && !ext.eq_ignore_ascii_case(RECORDING_EXTENSION) {
            return Err(PathError::InvalidExtension {
                ext: ext.to_string(),
            });
        }

        validate_name(self.platform, &base).map_err(PathError::InvalidCharacters)?;

        Ok(cleaned)
    }
}

/// Validates `candidate` under `base_dir` with the compiled target's rules.
///
/// # Errors
///
/// See [`PathValidator::validate`].
pub fn validate_recording_path(base_dir: &str, candidate: &str) -> Result<String, PathError> {
    PathValidator::for_current_platform().validate(base_dir, candidate)
}

/// Checks a single file name against the naming rules of `platform`.
///
/// # Errors
///
/// Returns the first [`NameViolation`] found.
pub fn validate_name(platform: Platform, name: &str) -> Result<(), NameViolation> {
    if name.contains('\0') {
        return Err(NameViolation::NulByte);
    }

    match platform {
        Platform::Windows => {
            let style = platform.path_style();
            let stem = name
                .strip_suffix(lexical::extension(style, name))
                .unwrap_or(name)
                .to_uppercase();
            if WINDOWS_RESERVED.contains(&stem.as_str()) {
                return Err(NameViolation::Reserved(stem));
            }
            if let Some(c) = WINDOWS_FORBIDDEN.iter().find(|c| name.contains(**c)) {
                return Err(NameViolation::ForbiddenChar(*c));
            }
        }
        Platform::Unix => {
            if name.contains('/') {
                return Err(NameViolation::ForbiddenChar('/'));
            }
        }
    }
    Ok(())
}

/// Empty, `.`, `..`, or a bare separator (what `base_name` yields for a root).
fn is_dot_name(style: PathStyle, name: &str) -> bool {
    matches!(name, "" | "." | "..") || name.chars().all(|c| style.is_separator(c))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
