//! Observable project store.
//!
//! # Responsibility
//! - Own the authoritative, insertion-ordered project sequence.
//! - Notify subscribers with a full snapshot after every mutation.
//!
//! # Invariants
//! - Projects are only appended, never reordered or removed.
//! - Listeners run synchronously, in subscription order, before
//!   `add_project` returns.
//! - Each listener receives its own copy of the sequence.
//! - No state borrow is held while a listener runs, so listeners may read
//!   the store again.
//!
//! The store is single-threaded (`!Send`). One instance is built by
//! `App` and shared by reference with every view that needs it.

use crate::model::project::{Project, ProjectId};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback receiving a snapshot of the store contents.
pub type Listener<T> = Rc<dyn Fn(Vec<T>)>;

/// Ordered listener registry shared by observable stores.
pub struct Subscribers<T> {
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T: Clone> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It is not called until the next notification.
    pub fn add(&self, listener: Listener<T>) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Calls every listener, in registration order, with a copy of `items`.
    pub fn notify(&self, items: &[T]) {
        // Listeners registered during this pass only see later notifications.
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(items.to_vec());
        }
    }
}

/// In-memory project store.
#[derive(Default)]
pub struct ProjectState {
    projects: RefCell<Vec<Project>>,
    subscribers: Subscribers<Project>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every future mutation.
    ///
    /// There is no replay: a new listener does not see the current contents
    /// until something is added.
    pub fn subscribe(&self, listener: impl Fn(Vec<Project>) + 'static) {
        self.subscribers.add(Rc::new(listener));
        debug!(
            "event=store_subscribe module=state status=ok listeners={}",
            self.subscribers.len()
        );
    }

    /// Appends a new active project and notifies every listener.
    ///
    /// Performs no validation; callers validate input first.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let project = Project::new(title, description, people);
        let id = project.id;
        let snapshot = {
            let mut projects = self.projects.borrow_mut();
            projects.push(project);
            projects.clone()
        };

        info!(
            "event=project_added module=state status=ok id={} total={} listeners={}",
            id,
            snapshot.len(),
            self.subscribers.len()
        );
        self.subscribers.notify(&snapshot);
        id
    }

    /// Returns a copy of every project in insertion order.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Looks up one project by id.
    pub fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|project| project.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectState, Subscribers};
    use crate::model::project::{Project, ProjectStatus};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[test]
    fn add_project_appends_active_projects_in_order() {
        let state = ProjectState::new();
        let first = state.add_project("one", "first", 1);
        let second = state.add_project("two", "second", 2);

        let projects = state.projects();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, first);
        assert_eq!(projects[1].id, second);
        assert!(projects
            .iter()
            .all(|project| project.status == ProjectStatus::Active));
    }

    #[test]
    fn ids_are_unique() {
        let state = ProjectState::new();
        for index in 0..50 {
            state.add_project(format!("p{index}"), "d", 1);
        }
        let ids: HashSet<_> = state.projects().iter().map(|project| project.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn subscribe_does_not_replay_current_state() {
        let state = ProjectState::new();
        state.add_project("before", "d", 1);

        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        state.subscribe(move |_| *seen.borrow_mut() += 1);
        assert_eq!(*calls.borrow(), 0);

        state.add_project("after", "d", 1);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn listeners_run_in_subscription_order_with_full_snapshot() {
        let state = ProjectState::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            state.subscribe(move |projects: Vec<Project>| {
                log.borrow_mut().push((name, projects.len()));
            });
        }

        state.add_project("a", "d", 1);
        state.add_project("b", "d", 1);

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 1),
                ("second", 1),
                ("third", 1),
                ("first", 2),
                ("second", 2),
                ("third", 2),
            ]
        );
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let state = Rc::new(ProjectState::new());
        let reader = Rc::clone(&state);
        state.subscribe(move |mut projects: Vec<Project>| {
            projects.clear();
            assert_eq!(reader.len(), 1);
        });

        state.add_project("a", "d", 1);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn project_lookup_by_id() {
        let state = ProjectState::new();
        let id = state.add_project("find me", "d", 4);
        assert_eq!(state.project(id).map(|p| p.title), Some("find me".to_string()));
        assert!(state.project(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn subscribers_registry_is_generic() {
        let subscribers = Subscribers::<u8>::new();
        assert!(subscribers.is_empty());
        let total = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&total);
        subscribers.add(Rc::new(move |items: Vec<u8>| {
            *sink.borrow_mut() += items.iter().map(|v| u32::from(*v)).sum::<u32>();
        }));
        subscribers.notify(&[1, 2, 3]);
        assert_eq!(*total.borrow(), 6);
        assert_eq!(subscribers.len(), 1);
    }
}
