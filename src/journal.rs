//! Event journal: one JSON object per game event, newline-delimited.
//!
//! Lines look like:
//! `{"seq":3,"type":"move","piece":{"kind":"o","row":1,"col":0,"cells":[[6,6],[6,6]]}}`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use term_tetris::core::{Output, Piece};
use term_tetris::types::Cell;

#[derive(Debug, Clone, Serialize)]
pub struct PieceEntry {
    pub kind: &'static str,
    pub row: i32,
    pub col: i32,
    pub cells: Vec<Vec<Cell>>,
}

impl From<&Piece> for PieceEntry {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind.as_str(),
            row: piece.row,
            col: piece.col,
            cells: piece.to_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub seq: u64,
    #[serde(rename = "type")]
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece: Option<PieceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<usize>>,
}

impl JournalEntry {
    pub fn new(seq: u64, output: &Output) -> Self {
        let mut entry = Self {
            seq,
            event: output.as_str(),
            piece: output.piece().map(PieceEntry::from),
            width: None,
            height: None,
            rows: None,
        };
        match output {
            Output::Welcome { width, height } => {
                entry.width = Some(*width);
                entry.height = Some(*height);
            }
            Output::LineClear(rows) => entry.rows = Some(rows.to_vec()),
            _ => {}
        }
        entry
    }
}

pub struct Journal<W: Write = BufWriter<File>> {
    out: W,
    seq: u64,
}

impl Journal {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("create journal file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self { out, seq: 0 }
    }

    pub fn record(&mut self, output: &Output) -> Result<()> {
        let entry = JournalEntry::new(self.seq, output);
        serde_json::to_writer(&mut self.out, &entry).context("serialize journal entry")?;
        self.out.write_all(b"\n")?;
        self.seq += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush journal")
    }

    /// Flush at the end of a session. An error from the session itself wins
    /// over a flush error.
    pub fn close(mut self, session: Result<()>) -> Result<()> {
        let flushed = self.flush();
        session.and(flushed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use term_tetris::core::ClearedRows;
    use term_tetris::types::PieceKind;

    fn lines(journal: Journal<Vec<u8>>) -> Vec<Value> {
        String::from_utf8(journal.out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn entries_are_numbered_json_lines() {
        let mut journal = Journal::new(Vec::new());
        journal
            .record(&Output::Welcome {
                width: 10,
                height: 20,
            })
            .unwrap();
        journal.record(&Output::RemoveWelcome).unwrap();
        journal
            .record(&Output::Materialize(Piece::new(PieceKind::O, 0, 0)))
            .unwrap();

        let lines = lines(journal);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["seq"], 0);
        assert_eq!(lines[0]["type"], "welcome");
        assert_eq!(lines[0]["width"], 10);
        assert_eq!(lines[0]["height"], 20);
        assert_eq!(lines[1]["type"], "removeWelcome");
        assert!(lines[1].get("piece").is_none());
        assert_eq!(lines[2]["seq"], 2);
        assert_eq!(lines[2]["piece"]["kind"], "o");
        assert_eq!(lines[2]["piece"]["cells"], serde_json::json!([[6, 6], [6, 6]]));
    }

    #[test]
    fn line_clear_lists_rows() {
        let mut journal = Journal::new(Vec::new());
        let rows: ClearedRows = [2, 3].into_iter().collect();
        journal.record(&Output::LineClear(rows)).unwrap();

        let lines = lines(journal);
        assert_eq!(lines[0]["type"], "lineClear");
        assert_eq!(lines[0]["rows"], serde_json::json!([2, 3]));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn close_keeps_session_error_over_flush_error() {
        let journal = Journal::new(BrokenPipe);
        let err = journal
            .close(Err(anyhow::anyhow!("terminal went away")))
            .unwrap_err();
        assert_eq!(err.to_string(), "terminal went away");
    }

    #[test]
    fn close_reports_flush_error_after_clean_session() {
        let journal = Journal::new(BrokenPipe);
        let err = journal.close(Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "flush journal");
    }

    #[test]
    fn file_journal_is_flushed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let mut journal = Journal::create(&path).unwrap();
        journal
            .record(&Output::Move(Piece::new(PieceKind::I, 3, 1)))
            .unwrap();
        journal.flush().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["type"], "move");
        assert_eq!(value["piece"]["row"], 3);
        assert_eq!(value["piece"]["col"], 1);
    }
}
