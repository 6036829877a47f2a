//! URL path → filesystem path.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Turn a raw request path into an absolute, lexically normalised filesystem path.
///
/// The path is percent-decoded first. A leading `/X:` is treated as a drive
/// root and loses its slash, so `/C:/Users` resolves exactly like `C:/Users`.
/// Relative results are anchored at the current working directory. Nothing
/// here touches the filesystem; existence is the caller's problem.
pub fn resolve(request_path: &str) -> PathBuf {
    let decoded = percent_decode_str(request_path).decode_utf8_lossy();
    let trimmed = strip_drive_slash(&decoded);
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    absolutize(&base, Path::new(trimmed))
}

/// `/C:/x` → `C:/x`; anything else is returned untouched.
fn strip_drive_slash(path: &str) -> &str {
    match path.as_bytes() {
        [b'/', letter, b':', ..] if letter.is_ascii_alphabetic() => &path[1..],
        _ => path,
    }
}

/// Join `path` onto `base` when relative, then fold `.` and `..` away.
///
/// `..` never climbs above the root (or drive prefix) it starts from.
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_slash_is_stripped() {
        assert_eq!(strip_drive_slash("/C:/Users"), "C:/Users");
        assert_eq!(strip_drive_slash("/d:"), "d:");
        assert_eq!(strip_drive_slash("/tmp/a:b"), "/tmp/a:b");
        assert_eq!(strip_drive_slash("/1:/x"), "/1:/x");
        assert_eq!(strip_drive_slash("/"), "/");
    }

    #[test]
    fn drive_style_request_matches_bare_drive_path() {
        assert_eq!(resolve("/X:/sub/path"), resolve("X:/sub/path"));
        assert_eq!(resolve("/c:/"), resolve("c:/"));
    }

    #[test]
    fn percent_escapes_are_decoded() {
        let resolved = resolve("/tmp/my%20file.txt");
        assert!(resolved.ends_with("my file.txt"), "{}", resolved.display());
    }

    #[test]
    fn result_is_absolute() {
        assert!(resolve("/").is_absolute());
        assert!(resolve("/X:/sub").is_absolute());
        assert!(resolve("relative/bit").is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn dot_segments_are_folded() {
        assert_eq!(resolve("/usr/./lib/../bin"), PathBuf::from("/usr/bin"));
        assert_eq!(resolve("/../../etc"), PathBuf::from("/etc"));
        assert_eq!(resolve("/tmp/%2E%2E/var"), PathBuf::from("/var"));
    }

    #[cfg(unix)]
    #[test]
    fn relative_paths_anchor_at_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve("X:/sub"), cwd.join("X:").join("sub"));
    }
}
