use crate::error::{ErrorKind, Result};
use crate::{Renderer, TempFile};
use exn::ResultExt;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

impl Renderer {
    /// Renders `html` to a temporary PDF, removed when the returned file is
    /// dropped.
    ///
    /// The document is first written to a temporary `.html` file with the
    /// configured stylesheets spliced in as `<style>` blocks just before the
    /// first `</head>`; a document without one is printed unstyled. Chrome then
    /// prints that file headless into a second temporary file.
    ///
    /// # Errors
    ///
    /// [`ChromeFailed`](ErrorKind::ChromeFailed) when the browser exits
    /// unsuccessfully, [`ChromeTimeout`](ErrorKind::ChromeTimeout) when it
    /// outlives the configured timeout (it is killed), and
    /// [`Io`](ErrorKind::Io) when the temporary files cannot be written.
    pub fn render<R: Read>(&self, html: R) -> Result<TempFile> {
        let input = self.persist_html(html)?;
        let output = tempfile::Builder::new().suffix(".pdf").tempfile().or_raise(|| ErrorKind::Io)?;
        self.chrome.execute(input.path(), output.path(), self.timeout)?;
        Ok(output)
    }

    /// Renders `html` and copies the PDF to `save_to`, replacing any existing
    /// file. Chrome never writes to the destination directly, so a locked
    /// destination is detected without losing the render.
    #[instrument(skip_all, fields(save_to = %save_to.as_ref().display()))]
    pub fn render_to<R: Read>(&self, html: R, save_to: impl AsRef<Path>) -> Result<PathBuf> {
        let save_to = save_to.as_ref();
        let pdf = self.render(html)?;
        persist(&pdf, save_to)?;
        tracing::info!(path = %save_to.display(), "Wrote PDF report");
        Ok(save_to.to_path_buf())
    }

    pub fn render_slice_to(&self, html: &[u8], save_to: impl AsRef<Path>) -> Result<PathBuf> {
        self.render_to(Cursor::new(html), save_to)
    }

    fn persist_html<R: Read>(&self, mut html: R) -> Result<TempFile> {
        // Chrome decides how to load a file:// URL by its extension.
        let mut tmp = tempfile::Builder::new().suffix(".html").tempfile().or_raise(|| ErrorKind::Io)?;
        const NEEDLE: &[u8] = b"</head";
        const CARRY_SIZE: usize = NEEDLE.len() - 1;
        const BUFFER_CAPACITY: usize = 8192;
        const BUFFER_WINDOW: usize = BUFFER_CAPACITY - CARRY_SIZE;
        // Stream the document, keeping CARRY_SIZE bytes between reads so a
        // closing head tag split across two reads is still found.
        let mut buffer = vec![0; BUFFER_WINDOW + CARRY_SIZE];
        let mut carry: usize = 0;
        'chunk: loop {
            let bytes = html.read(&mut buffer[carry..carry + BUFFER_WINDOW]).or_raise(|| ErrorKind::Io)?;
            if bytes == 0 {
                tmp.write_all(&buffer[..carry]).or_raise(|| ErrorKind::Io)?;
                break 'chunk;
            }
            let filled = carry + bytes;
            if let Some(pos) = buffer[..filled].windows(NEEDLE.len()).position(|w| w.eq_ignore_ascii_case(NEEDLE)) {
                tmp.write_all(&buffer[..pos]).or_raise(|| ErrorKind::Io)?;
                let blocks = self.styles.write_all_to(&mut tmp).or_raise(|| ErrorKind::Io)?;
                tmp.write_all(&buffer[pos..filled]).or_raise(|| ErrorKind::Io)?;
                tracing::debug!(position = pos, blocks = blocks, "CSS stylesheets injected into HTML");
                io::copy(&mut html, &mut tmp).or_raise(|| ErrorKind::Io)?;
                tmp.flush().or_raise(|| ErrorKind::Io)?;
                return Ok(tmp);
            }
            let safe = filled.saturating_sub(CARRY_SIZE);
            tmp.write_all(&buffer[..safe]).or_raise(|| ErrorKind::Io)?;
            buffer.copy_within(safe..filled, 0);
            carry = filled - safe;
        }
        tmp.flush().or_raise(|| ErrorKind::Io)?;
        tracing::warn!("CSS stylesheets not injected; closing head tag not found");
        Ok(tmp)
    }
}

/// Copies a finished PDF to its destination.
fn persist(pdf: &TempFile, save_to: &Path) -> Result<()> {
    let mut source = pdf.reopen().or_raise(|| ErrorKind::Io)?;
    let mut destination = File::create(save_to).or_raise(|| ErrorKind::OutputLocked(save_to.to_path_buf()))?;
    io::copy(&mut source, &mut destination).or_raise(|| ErrorKind::Io)?;
    destination.flush().or_raise(|| ErrorKind::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleConfig;
    use crate::chrome::Chrome;
    use std::time::Duration;

    fn renderer(styles: StyleConfig) -> Renderer {
        Renderer {
            chrome: Chrome::Binary { path: PathBuf::from("true") },
            styles,
            timeout: Duration::from_secs(10),
        }
    }

    fn injected(html: &str) -> String {
        let renderer = renderer(StyleConfig::new().with_content("td{}"));
        let tmp = renderer.persist_html(Cursor::new(html.as_bytes())).unwrap();
        std::fs::read_to_string(tmp.path()).unwrap()
    }

    #[test]
    fn injects_before_head_close() {
        assert_eq!(
            injected("<html><head><title>x</title></head><body></body></html>"),
            "<html><head><title>x</title><style>td{}</style>\n</head><body></body></html>"
        );
    }

    #[test]
    fn injects_across_buffer_boundary() {
        let padding = "x".repeat(8192 - 20);
        let html = format!("<html><head>{padding}</HEAD><body></body></html>");
        let expected = format!("<html><head>{padding}<style>td{{}}</style>\n</HEAD><body></body></html>");
        assert_eq!(injected(&html), expected);
    }

    #[test]
    fn leaves_headless_documents_alone() {
        assert_eq!(injected("<p>no head</p>"), "<p>no head</p>");
    }

    #[test]
    fn persists_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let mut pdf = TempFile::new().unwrap();
        pdf.write_all(b"%PDF-1.4").unwrap();
        let destination = dir.path().join("report.pdf");
        persist(&pdf, &destination).unwrap();
        assert_eq!(std::fs::read(&destination).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn locked_destination() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = TempFile::new().unwrap();
        let err = persist(&pdf, dir.path()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::OutputLocked(_)));
    }

    #[cfg(unix)]
    #[test]
    fn render_to_copies_output() {
        // `true` exits successfully without writing anything, leaving an
        // empty PDF to be copied.
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("Overview.pdf");
        let path = renderer(StyleConfig::new()).render_slice_to(b"<html></html>", &destination).unwrap();
        assert_eq!(path, destination);
        assert!(destination.is_file());
    }
}
