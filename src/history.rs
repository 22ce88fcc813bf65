//! Frame history tracking for debugging and diagnostics.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::frame;

/// Kind of frame in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    Handshake,
    HandshakeReply,
    Command,
    Ack,
}

/// A recorded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameEntry {
    pub kind: FrameKind,
    /// Space separated hex bytes
    pub hex: String,
    pub sequence: Option<u8>,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Bounded log of the frames exchanged with a bridge.
#[derive(Debug, Clone)]
pub struct FrameHistory {
    counts: HashMap<FrameKind, usize>,
    last_error: Option<String>,
    start_time: Instant,
    entries: Vec<FrameEntry>,
    max_entries: usize,
}

impl Default for FrameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            last_error: None,
            start_time: Instant::now(),
            entries: Vec::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::new()
        }
    }

    pub fn record(&mut self, kind: FrameKind, bytes: &[u8], sequence: Option<u8>) {
        *self.counts.entry(kind).or_default() += 1;

        self.entries.push(FrameEntry {
            kind,
            hex: frame::to_hex(bytes),
            sequence,
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn record_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    pub fn last(&self, kind: FrameKind) -> Option<&FrameEntry> {
        self.entries.iter().rev().find(|e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.entries.clear();
        self.last_error = None;
    }

    pub fn summary(&self) -> HistorySummary {
        let count = |k: FrameKind| self.counts.get(&k).copied().unwrap_or(0);
        HistorySummary {
            handshake_count: count(FrameKind::Handshake),
            handshake_reply_count: count(FrameKind::HandshakeReply),
            command_count: count(FrameKind::Command),
            ack_count: count(FrameKind::Ack),
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Summary of frame history for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub handshake_count: usize,
    pub handshake_reply_count: usize,
    pub command_count: usize,
    pub ack_count: usize,
    pub total_entries: usize,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_frame() {
        let mut history = FrameHistory::new();
        history.record(FrameKind::Command, &[0x80, 0x00, 0x11], Some(3));

        assert_eq!(history.len(), 1);
        let entry = history.last(FrameKind::Command).unwrap();
        assert_eq!(entry.hex, "80 00 11");
        assert_eq!(entry.sequence, Some(3));
        assert!(history.last(FrameKind::Ack).is_none());
    }

    #[test]
    fn test_record_error() {
        let mut history = FrameHistory::new();
        history.record_error("timed out waiting for acknowledgment");
        assert_eq!(
            history.last_error(),
            Some("timed out waiting for acknowledgment")
        );
        history.clear();
        assert!(history.last_error().is_none());
    }

    #[test]
    fn test_max_entries() {
        let mut history = FrameHistory::with_max_entries(2);
        for i in 0..5 {
            history.record(FrameKind::Handshake, &[i], None);
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].hex, "03");
        assert_eq!(history.summary().handshake_count, 5);
    }
}
