//! HTML rendering for directory listings and the root page.
//!
//! Listings follow the OS enumeration order. Each child is stat'ed on its own
//! so an unreadable entry degrades to an inline marker instead of failing the
//! whole page.

use std::fmt::Write as _;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use common::ServiceError;
use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::fs;
use tracing::{debug, warn};

/// Bytes that must be escaped inside a single path segment of an `href`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\');

/// Stat results for one child of a listed directory.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// One line of a directory listing.
#[derive(Debug, Clone)]
pub enum ListedEntry {
    Ok(EntryInfo),
    /// The child was enumerated but could not be stat'ed.
    Inaccessible(String),
}

/// Enumerate `dir` and stat every child.
///
/// # Errors
///
/// Returns [`ServiceError::AccessDenied`] if the directory itself cannot be read.
pub async fn list_entries(dir: &Path) -> Result<Vec<ListedEntry>, ServiceError> {
    let denied = |e: std::io::Error| {
        warn!(path = %dir.display(), error = %e, "cannot read directory");
        ServiceError::AccessDenied("Cannot read this directory.".into())
    };

    let mut read_dir = fs::read_dir(dir).await.map_err(denied)?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(denied)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        match fs::metadata(entry.path()).await {
            Ok(meta) => entries.push(ListedEntry::Ok(EntryInfo {
                name,
                size: meta.len(),
                modified: meta.modified().ok(),
            })),
            Err(e) => {
                debug!(name = %name, error = %e, "cannot stat entry");
                entries.push(ListedEntry::Inaccessible(name));
            }
        }
    }
    Ok(entries)
}

/// Render the listing page for `dir`, linking children under `request_path`.
///
/// # Errors
///
/// Returns [`ServiceError::AccessDenied`] if the directory cannot be enumerated.
pub async fn render_directory(dir: &Path, request_path: &str) -> Result<String, ServiceError> {
    let entries = list_entries(dir).await?;
    let prefix = request_path.trim_end_matches('/');

    let mut items = String::new();
    for entry in &entries {
        match entry {
            ListedEntry::Ok(info) => {
                let _ = writeln!(
                    items,
                    "<li><a href=\"{}\">{}</a> - {} | Last Modified: {}</li>",
                    encode_double_quoted_attribute(&child_href(prefix, &info.name)),
                    encode_text(&info.name),
                    format_size(info.size),
                    info.modified.map(format_modified).unwrap_or_else(|| "unknown".into()),
                );
            }
            ListedEntry::Inaccessible(name) => {
                let _ = writeln!(
                    items,
                    "<li><span style=\"color:red;\">Cannot Access: {}</span></li>",
                    encode_text(name),
                );
            }
        }
    }

    let heading = format!("Browsing: {}", dir.display());
    Ok(page(&heading, &items))
}

/// Render the page served for `/`.
///
/// On Windows this lists the drive letters whose root currently exists.
/// Elsewhere it lists the immediate children of `/`.
///
/// # Errors
///
/// Returns [`ServiceError::AccessDenied`] if the filesystem root cannot be read.
pub async fn render_roots() -> Result<String, ServiceError> {
    let (heading, names) = root_entries().await?;
    let mut items = String::new();
    for (href, label) in &names {
        let _ = writeln!(
            items,
            "<li><a href=\"{}\">{}</a></li>",
            encode_double_quoted_attribute(href),
            encode_text(label),
        );
    }
    Ok(page(heading, &items))
}

#[cfg(windows)]
async fn root_entries() -> Result<(&'static str, Vec<(String, String)>), ServiceError> {
    let mut drives = Vec::new();
    for letter in b'A'..=b'Z' {
        let letter = letter as char;
        if fs::metadata(format!("{letter}:\\")).await.is_ok() {
            drives.push((format!("/{letter}:/"), format!("{letter}:/")));
        }
    }
    Ok(("Select a Drive", drives))
}

#[cfg(not(windows))]
async fn root_entries() -> Result<(&'static str, Vec<(String, String)>), ServiceError> {
    let mut read_dir = fs::read_dir("/")
        .await
        .map_err(|e| ServiceError::from_io(&e, "the filesystem root"))?;
    let mut children = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| ServiceError::from_io(&e, "the filesystem root"))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        children.push((child_href("", &name), name));
    }
    Ok(("Root Directory", children))
}

/// `prefix` + `/` + encoded `name`; always forward slashes.
fn child_href(prefix: &str, name: &str) -> String {
    format!("{prefix}/{}", utf8_percent_encode(name, SEGMENT))
}

/// Size in kilobytes, two decimals: `10` → `"0.01 KB"`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Local wall-clock time in a `M/D/YYYY, h:mm:ss AM` layout.
pub fn format_modified(at: SystemTime) -> String {
    DateTime::<Local>::from(at)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

fn page(heading: &str, items: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h2>{title}</h2>\n<ul>\n{items}</ul>\n</body>\n</html>\n",
        title = encode_text(heading),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn sizes_use_two_decimals() {
        assert_eq!(format_size(0), "0.00 KB");
        assert_eq!(format_size(10), "0.01 KB");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
    }

    #[test]
    fn modified_time_has_date_and_clock() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let rendered = format_modified(at);
        assert!(rendered.contains("/2023, "), "{rendered}");
        assert!(rendered.ends_with("AM") || rendered.ends_with("PM"), "{rendered}");
    }

    #[test]
    fn hrefs_join_with_forward_slash_and_encode_name() {
        assert_eq!(child_href("/tmp", "a.txt"), "/tmp/a.txt");
        assert_eq!(child_href("", "etc"), "/etc");
        assert_eq!(child_href("/C:", "My Docs#1"), "/C:/My%20Docs%231");
        assert_eq!(child_href("/x", "été"), "/x/%C3%A9t%C3%A9");
    }

    #[tokio::test]
    async fn listing_has_one_item_per_child() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.bin", "nested"] {
            if name == "nested" {
                std::fs::create_dir(dir.path().join(name)).unwrap();
            } else {
                std::fs::write(dir.path().join(name), b"0123456789").unwrap();
            }
        }

        let html = render_directory(dir.path(), "/base/").await.unwrap();
        assert_eq!(html.matches("<li>").count(), 3, "{html}");
        assert!(html.contains("<a href=\"/base/a.txt\">a.txt</a> - 0.01 KB"), "{html}");
        assert!(html.contains("href=\"/base/nested\""), "{html}");
        assert!(html.contains(&format!("Browsing: {}", dir.path().display())));
    }

    #[tokio::test]
    async fn empty_directory_renders_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let html = render_directory(dir.path(), "/empty").await.unwrap();
        assert_eq!(html.matches("<li>").count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn broken_symlink_is_marked_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), b"hi").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let entries = list_entries(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .any(|e| matches!(e, ListedEntry::Inaccessible(n) if n == "dangling")));

        let html = render_directory(dir.path(), "/d").await.unwrap();
        assert!(html.contains("Cannot Access: dangling"), "{html}");
        assert!(html.contains("href=\"/d/ok.txt\""), "{html}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn markup_in_names_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("<i>&\"q\".txt"), b"x").unwrap();

        let html = render_directory(dir.path(), "/d").await.unwrap();
        assert!(
            html.contains("<a href=\"/d/%3Ci%3E&amp;%22q%22.txt\">&lt;i&gt;&amp;\"q\".txt</a>"),
            "{html}"
        );
        assert!(!html.contains("<i>"), "{html}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_directory_is_access_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::write(locked.join("inner.txt"), b"x").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users (root, CAP_DAC_OVERRIDE) read through mode 000.
        let privileged = std::fs::read_dir(&locked).is_ok();
        let result = render_directory(&locked, "/locked").await;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        if privileged {
            return;
        }

        let err = result.unwrap_err();
        assert_eq!(err.http_status(), 403);
        assert_eq!(err.to_string(), "Access Denied: Cannot read this directory.");
    }

    #[tokio::test]
    async fn vanished_directory_is_access_denied() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_directory(&dir.path().join("nope"), "/nope")
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 403);
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn root_page_lists_every_root_child() {
        let expected = std::fs::read_dir("/").unwrap().count();
        let html = render_roots().await.unwrap();
        assert!(html.contains("Root Directory"));
        assert_eq!(html.matches("<li>").count(), expected);
    }
}
