//! A navigator behind a FIFO job queue.
//!
//! [`NavigatorHandle`] moves one [`Navigator`] onto a worker thread. Each
//! call becomes a job on an mpsc channel; the worker runs jobs one at a time
//! in the order they were sent, so every movement reads and writes the
//! cursor without interleaving. Handles are cheap to clone and may be used
//! from any thread.

use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::navigator::Navigator;
use super::types::error::{BibleError, Result};
use super::types::models::{Cursor, Snapshot};

type Job = Box<dyn FnOnce(&mut Navigator) + Send>;

/// Joins the worker once the last handle is gone.
///
/// Handles drop their sender before their worker reference, so by the time
/// this runs every sender is gone and the worker loop has ended.
struct Worker {
    thread: Option<JoinHandle<()>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Navigator worker panicked");
            }
        }
    }
}

#[derive(Clone)]
pub struct NavigatorHandle {
    sender: Sender<Job>,
    _worker: Arc<Worker>,
}

impl NavigatorHandle {
    /// Starts the worker thread that owns `navigator`.
    pub fn spawn(mut navigator: Navigator) -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let thread = thread::spawn(move || {
            for job in receiver {
                job(&mut navigator);
            }
            debug!("Navigator queue closed");
        });
        Self {
            sender,
            _worker: Arc::new(Worker {
                thread: Some(thread),
            }),
        }
    }

    /// Queues `f` behind every earlier job and blocks until it has run.
    pub fn submit<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Navigator) -> R + Send + 'static,
    {
        let (reply, response) = mpsc::channel();
        let job: Job = Box::new(move |navigator| {
            // The caller may have given up waiting; nothing to do then.
            let _ = reply.send(f(navigator));
        });
        self.sender
            .send(job)
            .map_err(|_| BibleError::NavigatorStopped)?;
        response.recv().map_err(|_| BibleError::NavigatorStopped)
    }

    pub fn load_chapter(&self, book: &str, chapter: u32) -> Result<Cursor> {
        let book = book.to_owned();
        self.submit(move |navigator| navigator.load_chapter(&book, chapter))?
    }

    pub fn select_verse(&self, verse: u32) -> Result<Cursor> {
        self.submit(move |navigator| navigator.select_verse(verse))?
    }

    pub fn next(&self) -> Result<Cursor> {
        self.submit(|navigator| navigator.next())?
    }

    pub fn previous(&self) -> Result<Cursor> {
        self.submit(|navigator| navigator.previous())?
    }

    pub fn jump_to(&self, reference: &str) -> Result<Cursor> {
        let reference = reference.to_owned();
        self.submit(move |navigator| navigator.jump_to(&reference))?
    }

    pub fn find_last_chapter(&self, book: &str) -> Result<u32> {
        let book = book.to_owned();
        self.submit(move |navigator| navigator.find_last_chapter(&book))?
    }

    pub fn find_last_verse(&self, book: &str, chapter: u32) -> Result<u32> {
        let book = book.to_owned();
        self.submit(move |navigator| navigator.find_last_verse(&book, chapter))?
    }

    pub fn snapshot(&self) -> Result<Option<Snapshot>> {
        self.submit(|navigator| navigator.snapshot())
    }
}
