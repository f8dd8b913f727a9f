#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use mock_fetch::{Rejection, Response, ResponseFuture};

type Outcome = Result<Response, Rejection>;

/// Attaches named continuations to response futures and runs them on a
/// local pool, so tests can check which ones fired and in what order.
pub struct Continuations {
    pool: LocalPool,
    fired: Rc<RefCell<Vec<&'static str>>>,
    outcomes: Rc<RefCell<HashMap<&'static str, Outcome>>>,
}

impl Continuations {
    pub fn new() -> Self {
        Self {
            pool: LocalPool::new(),
            fired: Rc::new(RefCell::new(Vec::new())),
            outcomes: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn attach(&self, name: &'static str, future: ResponseFuture) {
        let fired = Rc::clone(&self.fired);
        let outcomes = Rc::clone(&self.outcomes);
        self.pool
            .spawner()
            .spawn_local(async move {
                let outcome = future.await;
                fired.borrow_mut().push(name);
                outcomes.borrow_mut().insert(name, outcome);
            })
            .expect("spawn continuation");
    }

    pub fn run(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn fired(&self) -> Vec<&'static str> {
        self.fired.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.fired.borrow().iter().filter(|n| **n == name).count()
    }

    pub fn has_fired(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    pub fn take(&self, name: &str) -> Option<Outcome> {
        self.outcomes.borrow_mut().remove(name)
    }
}
