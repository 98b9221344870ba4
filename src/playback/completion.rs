use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Pending,
    Resolved,
    Rejected(String),
}

/// The eventual result of a suspending command, as handed back by the host.
///
/// Single-threaded one-shot slot: the host keeps the [`Resolver`] and settles it when the
/// operation ends; the scheduler polls the `Completion`. The first settle wins.
#[derive(Debug, Clone)]
pub struct Completion {
    slot: Rc<RefCell<Settlement>>,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    slot: Rc<RefCell<Settlement>>,
}

impl Completion {
    pub fn pending() -> (Self, Resolver) {
        let slot = Rc::new(RefCell::new(Settlement::Pending));
        (Self { slot: slot.clone() }, Resolver { slot })
    }

    pub fn resolved() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Settlement::Resolved)),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Settlement::Rejected(reason.into()))),
        }
    }

    pub fn state(&self) -> Settlement {
        self.slot.borrow().clone()
    }

    pub fn is_settled(&self) -> bool {
        !matches!(*self.slot.borrow(), Settlement::Pending)
    }
}

impl Resolver {
    /// Returns `false` when the slot had already settled.
    pub fn resolve(&self) -> bool {
        self.settle(Settlement::Resolved)
    }

    pub fn reject(&self, reason: impl Into<String>) -> bool {
        self.settle(Settlement::Rejected(reason.into()))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(*self.slot.borrow(), Settlement::Pending)
    }

    fn settle(&self, to: Settlement) -> bool {
        let mut slot = self.slot.borrow_mut();
        if !matches!(*slot, Settlement::Pending) {
            return false;
        }
        *slot = to;
        true
    }
}
