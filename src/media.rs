//! The media root: token → path resolution and content-type derivation.
//!
//! The media root is the security boundary. Upload ingestion writes flat
//! files into it; this module is the only code that turns an untrusted URL
//! token back into a path, and nothing it returns ever lies outside the root.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::error::StreamError;

/// A configured, canonicalized media root directory.
pub struct MediaLibrary {
    root: PathBuf,
}

/// A resolved, stat-ed media file. Length is captured at resolution time;
/// uploaded files are never mutated in place, so it stays true for the
/// lifetime of the request.
pub struct MediaFile {
    pub path: PathBuf,
    pub len: u64,
}

impl MediaLibrary {
    /// Opens the media root, canonicalizing it once.
    ///
    /// Fails if the directory is missing — a service pointed at nothing
    /// should refuse to start, not 404 forever.
    pub fn open(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(root)?;
        if !root.is_dir() {
            return Err(std::io::Error::other("media root is not a directory"));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a filename token from the URL to a file under the root.
    ///
    /// The token is percent-decoded, screened, joined to the root, and the
    /// result canonicalized and prefix-checked — so neither an encoded
    /// `..%2F` nor a symlink planted inside the root can reach outside it.
    /// Every rejection collapses to [`StreamError::NotFound`]; the client
    /// learns nothing about why.
    pub async fn resolve(&self, token: &str) -> Result<MediaFile, StreamError> {
        let name = sanitize(token).ok_or(StreamError::NotFound)?;
        let path = tokio::fs::canonicalize(self.root.join(name))
            .await
            .map_err(io_to_stream)?;
        if !path.starts_with(&self.root) {
            return Err(StreamError::NotFound);
        }
        let meta = tokio::fs::metadata(&path).await.map_err(io_to_stream)?;
        if !meta.is_file() {
            return Err(StreamError::NotFound);
        }
        Ok(MediaFile { path, len: meta.len() })
    }
}

/// Decodes and screens a filename token. `None` means "pretend it doesn't
/// exist".
///
/// Rejects path separators in both flavors, NUL bytes, empties, and anything
/// starting with a dot — which covers `.` and `..` and also denies dotfiles,
/// matching the upload side (it never produces them).
fn sanitize(token: &str) -> Option<String> {
    let decoded = percent_decode_str(token).decode_utf8().ok()?;
    let name = decoded.as_ref();
    if name.is_empty()
        || name.starts_with('.')
        || name.contains('\0')
        || name.contains('/')
        || name.contains('\\')
    {
        return None;
    }
    Some(name.to_owned())
}

fn io_to_stream(e: std::io::Error) -> StreamError {
    if e.kind() == std::io::ErrorKind::NotFound {
        StreamError::NotFound
    } else {
        StreamError::Io(e)
    }
}

/// Derives the response content type from the file extension.
///
/// Small fixed table for the formats upload ingestion accepts; anything else
/// falls back to a generic binary type rather than failing — the browser's
/// decoder is the final authority anyway.
pub fn content_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "opus" => "audio/opus",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_table() {
        assert_eq!(content_type(Path::new("track.mp3")), "audio/mpeg");
        assert_eq!(content_type(Path::new("track.MP3")), "audio/mpeg");
        assert_eq!(content_type(Path::new("take.flac")), "audio/flac");
        assert_eq!(content_type(Path::new("loop.oga")), "audio/ogg");
        assert_eq!(content_type(Path::new("voice.m4a")), "audio/mp4");
        assert_eq!(content_type(Path::new("weird.xyz")), "application/octet-stream");
        assert_eq!(content_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn sanitize_rejects_traversal_and_separators() {
        for token in [
            "",
            ".",
            "..",
            "../secret.mp3",
            "..%2Fsecret.mp3", // decodes to ../secret.mp3
            "%2e%2e%2fsecret.mp3",
            "sub/track.mp3",
            "sub%2Ftrack.mp3",
            "back\\slash.mp3",
            ".hidden.mp3",
            "nul\0byte.mp3",
            "/etc/passwd",
            "%2Fetc%2Fpasswd",
        ] {
            assert_eq!(sanitize(token), None, "token {token:?} must be rejected");
        }
    }

    #[test]
    fn sanitize_decodes_ordinary_names() {
        assert_eq!(sanitize("track.mp3").as_deref(), Some("track.mp3"));
        assert_eq!(sanitize("my%20song.mp3").as_deref(), Some("my song.mp3"));
    }

    #[tokio::test]
    async fn resolve_finds_files_and_reports_length() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("track.mp3"), b"abcdef").unwrap();
        let library = MediaLibrary::open(dir.path()).unwrap();

        let file = library.resolve("track.mp3").await.unwrap();
        assert_eq!(file.len, 6);
        assert!(file.path.starts_with(library.root()));
    }

    #[tokio::test]
    async fn resolve_never_escapes_the_root() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"no").unwrap();
        let root = outer.path().join("media");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("track.mp3"), b"ok").unwrap();
        let library = MediaLibrary::open(&root).unwrap();

        for token in [
            "../secret.txt",
            "..%2Fsecret.txt",
            "%2e%2e/secret.txt",
            "secret.txt", // exists only outside the root
            "missing.mp3",
        ] {
            assert!(
                matches!(library.resolve(token).await, Err(StreamError::NotFound)),
                "token {token:?} must resolve to NotFound"
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn resolve_rejects_symlinks_leaving_the_root() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"no").unwrap();
        let root = outer.path().join("media");
        std::fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), root.join("link.mp3"))
            .unwrap();
        let library = MediaLibrary::open(&root).unwrap();

        assert!(matches!(
            library.resolve("link.mp3").await,
            Err(StreamError::NotFound)
        ));
    }

    #[tokio::test]
    async fn resolve_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("album")).unwrap();
        let library = MediaLibrary::open(dir.path()).unwrap();

        assert!(matches!(
            library.resolve("album").await,
            Err(StreamError::NotFound)
        ));
    }
}
