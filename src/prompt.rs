//! Console interaction: asking for paths and waiting before exit.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

pub const INPUT_QUESTION: &str = "Please type path to db folder (for example D:\\db): ";
pub const OUTPUT_QUESTION: &str = "Please type path where pdf files should be created: ";

/// Uses `given` or asks for a path; either way it must exist.
pub fn resolve_path(
    given: Option<PathBuf>,
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf> {
    let path = match given {
        Some(path) => path,
        None => ask(question, input, output)?,
    };
    if !path.exists() {
        exn::bail!(ErrorKind::InvalidPath(path));
    }
    Ok(path)
}

fn ask(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<PathBuf> {
    write!(output, "\n{question}").or_raise(|| ErrorKind::Console)?;
    output.flush().or_raise(|| ErrorKind::Console)?;
    let mut line = String::new();
    input.read_line(&mut line).or_raise(|| ErrorKind::Console)?;
    Ok(PathBuf::from(clean(&line)))
}

/// Drops the line ending and the quotes added when a folder is dragged onto
/// a Windows console.
fn clean(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('"').and_then(|l| l.strip_suffix('"')).unwrap_or(line)
}

/// Keeps a double-clicked console window open until ENTER is pressed.
pub struct Pause {
    enabled: bool,
}
impl Pause {
    /// Only pauses when asked to and stdin is an interactive terminal.
    pub fn new(requested: bool) -> Self {
        Self { enabled: requested && std::io::stdin().is_terminal() }
    }

    pub fn wait(&self, input: &mut impl BufRead, output: &mut impl Write) {
        if !self.enabled {
            return;
        }
        let _ = write!(output, "Press ENTER to exit.");
        let _ = output.flush();
        let mut line = String::new();
        let _ = input.read_line(&mut line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case("D:\\db\r\n", "D:\\db")]
    #[case("  /media/db  \n", "/media/db")]
    #[case("\"C:\\My Maps\\db\"\n", "C:\\My Maps\\db")]
    #[case("\"\n", "\"")]
    fn test_clean(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(clean(line), expected);
    }

    #[test]
    fn asks_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut input = Cursor::new(format!("{}\n", dir.path().display()));
        let mut output = Vec::new();
        let path = resolve_path(None, INPUT_QUESTION, &mut input, &mut output).unwrap();
        assert_eq!(path, dir.path());
        assert!(String::from_utf8(output).unwrap().contains(INPUT_QUESTION));
    }

    #[test]
    fn does_not_ask_when_given() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        let path = resolve_path(Some(dir.path().to_path_buf()), OUTPUT_QUESTION, &mut Cursor::new(""), &mut output).unwrap();
        assert_eq!(path, dir.path());
        assert!(output.is_empty());
    }

    #[test]
    fn rejects_missing_path() {
        let mut input = Cursor::new("/definitely/not/a/db\n");
        let err = resolve_path(None, INPUT_QUESTION, &mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
        assert_eq!(err.user_message(), "Invalid path");
    }

    #[test]
    fn empty_answer_is_invalid() {
        let err = resolve_path(None, INPUT_QUESTION, &mut Cursor::new("\n"), &mut Vec::new()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn disabled_pause_reads_nothing() {
        let mut input = Cursor::new("left over\n");
        let mut output = Vec::new();
        Pause { enabled: false }.wait(&mut input, &mut output);
        assert!(output.is_empty());
        assert_eq!(input.position(), 0);
    }
}
