//! Delivery of DOM callbacks into the page dispatcher

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use shared_types::PageEvent;

use crate::host::PageHost;
use crate::page::GraphPage;
use crate::wrappers::dom_host::DomHost;

pub type SharedPage<H = DomHost> = Rc<RefCell<GraphPage<H>>>;

/// Cloneable handle every listener and timer callback sends through.
///
/// A callback can fire while the page is mid-dispatch (a DOM call made by a
/// handler synchronously raising another event); such events wait in the
/// backlog and run, in order, once the current handler returns.
pub struct EventSink<H: PageHost = DomHost> {
    page: Weak<RefCell<GraphPage<H>>>,
    backlog: Rc<RefCell<VecDeque<PageEvent>>>,
}

impl<H: PageHost> Clone for EventSink<H> {
    fn clone(&self) -> Self {
        Self {
            page: Weak::clone(&self.page),
            backlog: Rc::clone(&self.backlog),
        }
    }
}

impl<H: PageHost> EventSink<H> {
    pub fn new(page: Weak<RefCell<GraphPage<H>>>) -> Self {
        Self {
            page,
            backlog: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn send(&self, event: PageEvent) {
        self.backlog.borrow_mut().push_back(event);
        self.flush();
    }

    /// Dispatch everything waiting in the backlog, unless the page is busy.
    pub fn flush(&self) {
        let Some(shared) = self.page.upgrade() else {
            log::debug!("Page dropped; discarding events");
            self.backlog.borrow_mut().clear();
            return;
        };
        let Ok(mut page) = shared.try_borrow_mut() else {
            return;
        };

        loop {
            let next = self.backlog.borrow_mut().pop_front();
            match next {
                Some(event) => page.dispatch(event),
                None => break,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.backlog.borrow().len()
    }
}
