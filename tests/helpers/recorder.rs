//! Buffer event recording.

use std::cell::RefCell;
use std::rc::Rc;

use parsework::document::{BufferEvent, BufferObserver, Document};

#[derive(Default)]
pub struct Recorder {
    events: RefCell<Vec<BufferEvent>>,
}

impl Recorder {
    pub fn attach(document: &Document) -> Rc<Self> {
        let recorder = Rc::new(Self::default());
        document.subscribe(&recorder);
        recorder
    }

    pub fn formatted(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| **event == BufferEvent::Formatted)
            .count()
    }

    pub fn events(&self) -> Vec<BufferEvent> {
        self.events.borrow().clone()
    }
}

impl BufferObserver for Recorder {
    fn on_buffer_event(&self, _document: &Document, event: BufferEvent) {
        self.events.borrow_mut().push(event);
    }
}
