//! 部件生命周期监听器
//!
//! Listeners are notified in insertion order. Each fan-out iterates over a
//! snapshot, so adding or removing listeners from inside a callback only
//! affects later notifications.

use super::PartService;
use crate::models::ElementId;
use std::cell::RefCell;
use std::rc::Rc;

/// Observer of part lifecycle transitions.
///
/// Callbacks run synchronously on the caller's stack and may call back into
/// the service.
pub trait PartListener {
    fn part_activated(&self, _service: &mut PartService, _part: ElementId) {}
    fn part_deactivated(&self, _service: &mut PartService, _part: ElementId) {}
    fn part_hidden(&self, _service: &mut PartService, _part: ElementId) {}
    fn part_visible(&self, _service: &mut PartService, _part: ElementId) {}
    fn part_brought_to_top(&self, _service: &mut PartService, _part: ElementId) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartEvent {
    Activated(ElementId),
    Deactivated(ElementId),
    Hidden(ElementId),
    Visible(ElementId),
    BroughtToTop(ElementId),
}

impl PartEvent {
    pub fn part(&self) -> ElementId {
        match *self {
            PartEvent::Activated(p)
            | PartEvent::Deactivated(p)
            | PartEvent::Hidden(p)
            | PartEvent::Visible(p)
            | PartEvent::BroughtToTop(p) => p,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PartEvent::Activated(_) => "activated",
            PartEvent::Deactivated(_) => "deactivated",
            PartEvent::Hidden(_) => "hidden",
            PartEvent::Visible(_) => "visible",
            PartEvent::BroughtToTop(_) => "brought_to_top",
        }
    }

    pub(crate) fn deliver(self, listener: &dyn PartListener, service: &mut PartService) {
        match self {
            PartEvent::Activated(p) => listener.part_activated(service, p),
            PartEvent::Deactivated(p) => listener.part_deactivated(service, p),
            PartEvent::Hidden(p) => listener.part_hidden(service, p),
            PartEvent::Visible(p) => listener.part_visible(service, p),
            PartEvent::BroughtToTop(p) => listener.part_brought_to_top(service, p),
        }
    }
}

/// Records every event it receives.
#[derive(Debug, Default)]
pub struct PartEventLog {
    events: RefCell<Vec<PartEvent>>,
}

impl PartEventLog {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<PartEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<PartEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: PartEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PartListener for PartEventLog {
    fn part_activated(&self, _service: &mut PartService, part: ElementId) {
        self.push(PartEvent::Activated(part));
    }

    fn part_deactivated(&self, _service: &mut PartService, part: ElementId) {
        self.push(PartEvent::Deactivated(part));
    }

    fn part_hidden(&self, _service: &mut PartService, part: ElementId) {
        self.push(PartEvent::Hidden(part));
    }

    fn part_visible(&self, _service: &mut PartService, part: ElementId) {
        self.push(PartEvent::Visible(part));
    }

    fn part_brought_to_top(&self, _service: &mut PartService, part: ElementId) {
        self.push(PartEvent::BroughtToTop(part));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub(crate) struct PartListeners {
    entries: Vec<(ListenerId, Rc<dyn PartListener>)>,
    next_id: u64,
}

impl PartListeners {
    pub(crate) fn add(&mut self, listener: Rc<dyn PartListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<Rc<dyn PartListener>> {
        self.entries.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/part_service/listeners.rs"]
mod tests;
