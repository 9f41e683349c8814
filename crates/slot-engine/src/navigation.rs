//! Navigation collaborators the drivers move the UI through.
//!
//! Two styles coexist: a stack of views (push a view to go forward, pop it to go
//! back) and a route dispatcher (push a path). The traits are the seams; the
//! in-memory implementations back the CLI, the WASM bindings and the tests.

use tracing::debug;

use crate::engine::{BookingRequest, SelectionState};

/// Route of the slot picker.
pub const AVAILABLE_SLOTS_ROUTE: &str = "/available_slots";

/// Route of the booking submission form.
pub const BOOK_ROUTE: &str = "/book";

/// A view a stack navigator can show.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// The slot picker for one flow instance.
    Slots(SelectionState),
    /// The booking form for a completed interval.
    BookingForm(BookingRequest),
}

pub trait StackNavigator {
    fn push_view(&mut self, view: View);
    fn pop_view(&mut self) -> Option<View>;
    /// The view on top of the stack.
    fn current(&self) -> Option<&View>;
}

pub trait Router {
    fn push(&mut self, path: &str);
    fn go_back(&mut self);
    fn current_path(&self) -> Option<&str>;
}

/// An in-memory view stack.
#[derive(Debug, Clone, Default)]
pub struct ViewStack {
    views: Vec<View>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }
}

impl StackNavigator for ViewStack {
    fn push_view(&mut self, view: View) {
        debug!(depth = self.views.len() + 1, "push view");
        self.views.push(view);
    }

    fn pop_view(&mut self) -> Option<View> {
        let popped = self.views.pop();
        debug!(depth = self.views.len(), "pop view");
        popped
    }

    fn current(&self) -> Option<&View> {
        self.views.last()
    }
}

/// An in-memory route history.
#[derive(Debug, Clone, Default)]
pub struct RouteHistory {
    paths: Vec<String>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

impl Router for RouteHistory {
    fn push(&mut self, path: &str) {
        debug!(path, "route push");
        self.paths.push(path.to_string());
    }

    fn go_back(&mut self) {
        self.paths.pop();
        debug!(path = self.current_path(), "route back");
    }

    fn current_path(&self) -> Option<&str> {
        self.paths.last().map(String::as_str)
    }
}
