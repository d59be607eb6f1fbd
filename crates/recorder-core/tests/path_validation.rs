//! Integration tests for recording-path validation.
//!
//! These exercise the public API the desktop backend uses: validate a
//! user-typed path, then resolve the sanitized result under the base
//! directory, for both platform policies.

use recorder_core::domain::lexical::{self, PathStyle};
use recorder_core::{
    render_template, PathError, PathErrorKind, PathValidator, Platform, TemplateVars,
};

const UNIX_BASE: &str = "/home/alice/Downloads";
const WIN_BASE: &str = r"C:\Users\alice\Downloads";

/// Builds candidates mixing normal segments with every arrangement of `..`
/// up to `depth` segments long.
fn traversal_candidates(sep: char, depth: usize) -> Vec<String> {
    let alphabet = ["..", "a", ".", "", "b.mp4"];
    let mut out = vec![String::new()];
    for _ in 0..depth {
        let mut next = Vec::new();
        for prefix in &out {
            for seg in alphabet {
                next.push(if prefix.is_empty() {
                    seg.to_string()
                } else {
                    format!("{prefix}{sep}{seg}")
                });
            }
        }
        out.extend(next);
    }
    out.sort();
    out.dedup();
    out.retain(|c| c.contains(".."));
    out
}

fn assert_never_escapes(platform: Platform, base: &str, sep: char) {
    let validator = PathValidator::new(platform);
    let style = platform.path_style();
    let mut accepted = 0;

    for candidate in traversal_candidates(sep, 4) {
        if let Ok(sanitized) = validator.validate(base, &candidate) {
            accepted += 1;
            let resolved = validator.resolve(base, &sanitized);
            let rel = lexical::rel(style, base, &resolved)
                .unwrap_or_else(|| panic!("{candidate:?} resolved to unrelated {resolved:?}"));
            assert!(
                !rel.starts_with(".."),
                "{candidate:?} escaped: resolved to {resolved:?}"
            );
        }
    }

    assert!(accepted > 0, "some candidates must stay inside the base");
}

#[test]
fn test_no_accepted_candidate_resolves_outside_base_unix() {
    assert_never_escapes(Platform::Unix, UNIX_BASE, '/');
}

#[test]
fn test_no_accepted_candidate_resolves_outside_base_windows() {
    assert_never_escapes(Platform::Windows, WIN_BASE, '\\');
    assert_never_escapes(Platform::Windows, WIN_BASE, '/');
}

#[test]
fn test_documented_examples() {
    let v = PathValidator::new(Platform::Unix);

    assert_eq!(v.validate(UNIX_BASE, "."), Err(PathError::InvalidFilename));
    assert_eq!(v.validate(UNIX_BASE, ".."), Err(PathError::InvalidFilename));
    assert_eq!(
        v.validate(UNIX_BASE, "a/b/../../../etc/passwd"),
        Err(PathError::PathEscape)
    );
    assert_eq!(v.validate(UNIX_BASE, "clip.mp4").unwrap(), "clip.mp4");
    assert!(v.validate(UNIX_BASE, "clip.MP4").is_ok());
    assert_eq!(
        v.validate(UNIX_BASE, "clip.avi").unwrap_err().kind(),
        PathErrorKind::InvalidExtension
    );
    assert_eq!(
        v.validate(UNIX_BASE, &format!("{}.mp4", "a".repeat(200)))
            .unwrap_err()
            .kind(),
        PathErrorKind::PathTooLong
    );
}

#[test]
fn test_reserved_name_policy_is_selected_by_platform() {
    let windows = PathValidator::new(Platform::Windows);
    let unix = PathValidator::new(Platform::Unix);

    assert_eq!(
        windows.validate(WIN_BASE, "CON.mp4").unwrap_err().kind(),
        PathErrorKind::InvalidCharacters
    );
    assert!(unix.validate(UNIX_BASE, "CON.mp4").is_ok());
}

#[test]
fn test_windows_resolve_uses_backslashes() {
    let v = PathValidator::new(Platform::Windows);
    let sanitized = v.validate(WIN_BASE, "VODs/tiktok/clip.mp4").unwrap();
    assert_eq!(sanitized, r"VODs\tiktok\clip.mp4");
    assert_eq!(
        v.resolve(WIN_BASE, &sanitized),
        r"C:\Users\alice\Downloads\VODs\tiktok\clip.mp4"
    );
}

#[test]
fn test_rendered_template_passes_validation() {
    let vars = TemplateVars {
        platform: "tiktok".to_string(),
        username: "alice".to_string(),
        date: "2024-05-01".to_string(),
        time: "20-15-00".to_string(),
        title: String::new(),
    };
    let rendered = render_template("VODs/{platform}/{user}/{date}_{time}.mp4", &vars).unwrap();

    let v = PathValidator::new(Platform::Unix);
    assert_eq!(
        v.validate(UNIX_BASE, &rendered).unwrap(),
        "VODs/tiktok/alice/2024-05-01_20-15-00.mp4"
    );
}

#[test]
fn test_raw_template_is_a_valid_path() {
    // The settings screen validates the template text itself before saving.
    let v = PathValidator::new(Platform::Unix);
    assert!(v
        .validate(UNIX_BASE, "VODs/{platform}/{name}/{date}_{time}.mp4")
        .is_ok());
    assert_eq!(lexical::clean(PathStyle::Unix, "VODs//x"), "VODs/x");
}
