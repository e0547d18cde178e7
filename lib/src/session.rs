//! The trace currently on display
//!
//! A [`Session`] owns at most one loaded trace, along with the cursor stepping through it.
//! Loading a new trace replaces the old one wholesale, but only once the new trace has loaded
//! successfully: a failed load leaves whatever was on display untouched, and is remembered so
//! that it can be reported (as opposed to there simply being nothing loaded).
//!
//! Loads may also be split into [`Session::begin_load`] and [`Session::finish_load`], so that the
//! actual loading can happen elsewhere (eg. on a worker thread). Only the result of the most
//! recently started load is ever applied; results of older loads are discarded.

use crate::cursor::Cursor;
use crate::loader::{self, ParseError};
use crate::trace::Trace;
use std::path::Path;
use std::sync::Arc;

/// What a session has on display
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    /// Nothing has been loaded yet (or the session was closed)
    Empty,

    /// A trace is loaded and the last load succeeded
    Loaded,

    /// The last load failed (a previously loaded trace may still be on display)
    Failed,
}

/// Result of applying a finished load to a session
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoadOutcome {
    /// The new trace is now on display
    Loaded,

    /// The load failed, and nothing on display changed
    Failed,

    /// A newer load was started in the meantime, so this result was dropped
    Superseded,
}

/// Handle for a load that has been started but not finished
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[must_use]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct Session {
    cursor: Option<Cursor>,
    last_error: Option<ParseError>,

    /// Most recently issued ticket number
    latest_ticket: u64,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn state(&self) -> SessionState {
        match (&self.last_error, &self.cursor) {
            (Some(_), _) => SessionState::Failed,
            (None, Some(_)) => SessionState::Loaded,
            (None, None) => SessionState::Empty,
        }
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut Cursor> {
        self.cursor.as_mut()
    }

    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.cursor.as_ref().map(Cursor::trace)
    }

    /// Why the last load failed, if it did
    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// Start a load, superseding any load still in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        LoadTicket(self.latest_ticket)
    }

    /// Apply the result of a load started with [`Self::begin_load`]
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Trace, ParseError>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            log::warn!(
                "Discarding result of load #{} (superseded by load #{})",
                ticket.0,
                self.latest_ticket
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(trace) => {
                log::debug!(
                    "Replacing displayed trace with {} methods",
                    trace.method_count()
                );
                self.cursor = Some(Cursor::new(Arc::new(trace)));
                self.last_error = None;
                LoadOutcome::Loaded
            }
            Err(err) => {
                log::warn!("Failed to load trace: {}", err);
                self.last_error = Some(err);
                LoadOutcome::Failed
            }
        }
    }

    pub fn load_slice(&mut self, bytes: &[u8]) -> LoadOutcome {
        let ticket = self.begin_load();
        self.finish_load(ticket, loader::load_slice(bytes))
    }

    pub fn load_str(&mut self, source: &str) -> LoadOutcome {
        self.load_slice(source.as_bytes())
    }

    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> LoadOutcome {
        let ticket = self.begin_load();
        self.finish_load(ticket, loader::load_path(path))
    }

    /// Discard the trace on display (and any load in flight)
    pub fn close(&mut self) {
        self.latest_ticket += 1;
        self.cursor = None;
        self.last_error = None;
    }
}
