use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;

/// Identifies one issued request so its completion can be routed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// Transport-level response to a document request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// HTTP-like status code.
    pub status: u16,
    /// Raw document bytes.
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: Vec::new(),
        }
    }

    /// Success means any status below 400.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Finished request, delivered by [`DocumentSource::drain`].
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub result: anyhow::Result<Response>,
}

/// Non-blocking document fetcher.
///
/// `request` only records the request; completions surface later through `drain`,
/// always on the caller's thread and never before `request` has returned.
pub trait DocumentSource {
    fn request(&mut self, ticket: Ticket, path: &str);

    fn drain(&mut self) -> Vec<Completion>;
}

/// Reads documents from a directory, one read per drained request.
#[derive(Debug)]
pub struct FsSource {
    root: PathBuf,
    pending: VecDeque<(Ticket, PathBuf)>,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pending: VecDeque::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(path: &Path) -> anyhow::Result<Response> {
        match std::fs::read(path) {
            Ok(body) => Ok(Response::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Response::not_found()),
            Err(e) => Err(e).with_context(|| format!("read '{}'", path.display())),
        }
    }
}

impl DocumentSource for FsSource {
    fn request(&mut self, ticket: Ticket, path: &str) {
        self.pending.push_back((ticket, self.root.join(path)));
    }

    fn drain(&mut self) -> Vec<Completion> {
        self.pending
            .drain(..)
            .map(|(ticket, path)| Completion {
                ticket,
                result: Self::read(&path),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    docs: HashMap<String, Vec<u8>>,
    pending: VecDeque<(Ticket, String)>,
    held: bool,
    newest_first: bool,
    requested: Vec<String>,
}

/// In-memory documents with controllable completion timing.
///
/// Clones share state, so a caller can keep a handle after boxing one into a manager.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.inner
            .borrow_mut()
            .docs
            .insert(path.into(), body.into());
    }

    pub fn insert_json(&self, path: impl Into<String>, value: &serde_json::Value) {
        self.insert(path, value.to_string());
    }

    pub fn remove(&self, path: &str) {
        self.inner.borrow_mut().docs.remove(path);
    }

    /// While held, `drain` delivers nothing.
    pub fn set_held(&self, held: bool) {
        self.inner.borrow_mut().held = held;
    }

    /// Deliver completions newest-first instead of in request order.
    pub fn set_newest_first(&self, newest_first: bool) {
        self.inner.borrow_mut().newest_first = newest_first;
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Every path requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.inner.borrow().requested.clone()
    }
}

impl DocumentSource for MemorySource {
    fn request(&mut self, ticket: Ticket, path: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.requested.push(path.to_string());
        inner.pending.push_back((ticket, path.to_string()));
    }

    fn drain(&mut self) -> Vec<Completion> {
        let mut inner = self.inner.borrow_mut();
        if inner.held {
            return Vec::new();
        }
        let mut batch: Vec<(Ticket, String)> = inner.pending.drain(..).collect();
        if inner.newest_first {
            batch.reverse();
        }
        batch
            .into_iter()
            .map(|(ticket, path)| Completion {
                ticket,
                result: Ok(inner
                    .docs
                    .get(&path)
                    .map_or_else(Response::not_found, |body| Response::ok(body.clone()))),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/source.rs"]
mod tests;
