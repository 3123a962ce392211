//! Listener registry and element dispatch
//!
//! Listeners run in registration order. Registration changes requested
//! while an element is being dispatched take effect once that dispatch is
//! finished, so every dispatch sees a fixed set of listeners.
//!
//! A failing listener does not stop the others: all failures of one
//! dispatch are collected into a single [`Error::Listener`].

use crate::element::Element;
use crate::error::{Error, Result};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Result returned by listener callbacks
pub type ListenerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListenerId(u64);

/// Progress after a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub description: String,
    pub processed: usize,
    pub total: usize,
}

/// One listener's failure during a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    pub listener: ListenerId,
    pub message: String,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener {} failed: {}", self.listener.0, self.message)
    }
}

/// Receiver of parsed elements
pub trait ParserListener {
    fn on_element(
        &mut self,
        element: &Element,
        subscriptions: &mut Subscriptions<'_>,
    ) -> ListenerResult;

    fn on_progress(&mut self, _progress: &Progress) {}
}

/// Registration changes requested from inside a listener
pub struct Subscriptions<'a> {
    next_id: &'a mut u64,
    current: ListenerId,
    pending: Vec<Pending>,
}

enum Pending {
    Register(ListenerId, Box<dyn ParserListener>),
    Unregister(ListenerId),
}

impl Subscriptions<'_> {
    /// Id of the listener currently being called
    pub fn current(&self) -> ListenerId {
        self.current
    }

    /// Register a listener starting with the next dispatch
    pub fn register<L: ParserListener + 'static>(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(*self.next_id);
        *self.next_id += 1;
        self.pending.push(Pending::Register(id, Box::new(listener)));
        id
    }

    /// Unregister a listener starting with the next dispatch
    pub fn unregister(&mut self, id: ListenerId) {
        self.pending.push(Pending::Unregister(id));
    }
}

/// Adapter turning a closure into a listener
pub struct FnListener<F>(F);

impl<F> FnListener<F>
where
    F: FnMut(&Element) -> ListenerResult,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ParserListener for FnListener<F>
where
    F: FnMut(&Element) -> ListenerResult,
{
    fn on_element(
        &mut self,
        element: &Element,
        _subscriptions: &mut Subscriptions<'_>,
    ) -> ListenerResult {
        (self.0)(element)
    }
}

/// Listener that records every element and progress report
///
/// Clones share the same storage, so a clone can be registered while the
/// original is kept to read the results.
#[derive(Debug, Clone, Default)]
pub struct ElementCollector {
    elements: Rc<RefCell<Vec<Element>>>,
    progress: Rc<RefCell<Vec<Progress>>>,
}

impl ElementCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> Vec<Element> {
        self.elements.borrow().clone()
    }

    pub fn progress(&self) -> Vec<Progress> {
        self.progress.borrow().clone()
    }

    pub fn take(&self) -> Vec<Element> {
        std::mem::take(&mut *self.elements.borrow_mut())
    }
}

impl ParserListener for ElementCollector {
    fn on_element(
        &mut self,
        element: &Element,
        _subscriptions: &mut Subscriptions<'_>,
    ) -> ListenerResult {
        self.elements.borrow_mut().push(element.clone());
        Ok(())
    }

    fn on_progress(&mut self, progress: &Progress) {
        self.progress.borrow_mut().push(progress.clone());
    }
}

/// Ordered set of listeners
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(ListenerId, Box<dyn ParserListener>)>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<L: ParserListener + 'static>(&mut self, listener: L) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an element to every listener
    pub fn dispatch(&mut self, element: &Element) -> Result<()> {
        let mut subscriptions = Subscriptions {
            next_id: &mut self.next_id,
            current: ListenerId(0),
            pending: Vec::new(),
        };
        let mut failures = Vec::new();

        for (id, listener) in self.listeners.iter_mut() {
            subscriptions.current = *id;
            if let Err(e) = listener.on_element(element, &mut subscriptions) {
                failures.push(ListenerFailure {
                    listener: *id,
                    message: e.to_string(),
                });
            }
        }

        let pending = subscriptions.pending;
        for change in pending {
            match change {
                Pending::Register(id, listener) => self.listeners.push((id, listener)),
                Pending::Unregister(id) => {
                    self.unregister(id);
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Listener(failures))
        }
    }

    pub fn progress(&mut self, progress: &Progress) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_progress(progress);
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
