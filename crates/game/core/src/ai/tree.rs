//! Composite nodes for monster brains.
//!
//! A tick always finishes within the turn it started in, so a node reports
//! only success or failure.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn from_bool(value: bool) -> Self {
        if value { Status::Success } else { Status::Failure }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

/// One node of a brain, evaluated against a context `C`.
pub trait Behavior<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Succeeds when every child succeeds; stops at the first failure.
/// An empty sequence succeeds.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.children.iter().all(|child| child.tick(ctx).is_success()))
    }
}

/// Succeeds with the first child that succeeds. An empty selector fails.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool(self.children.iter().any(|child| child.tick(ctx).is_success()))
    }
}
