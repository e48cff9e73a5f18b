//! The single-threaded reactor: a readiness poller plus a ready queue.
//!
//! Unlike a work-stealing executor, there is exactly one of these per
//! thread, built lazily on first use and never moved or shared across
//! threads. [`block_on`] is the only entry point that actually drives it;
//! everything else (listeners, futures, spawned tasks) just registers
//! interest and waits to be woken.

use crate::error::{self, SystemError};
use crate::reactor::event::Event;
use crate::reactor::poller::Poller;
use crate::reactor::poller::common::Interest;
use crate::reactor::poller::platform::RawFd;
use crate::task::{self, Runnable};
use crate::utils::Slab;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;
use std::task::Waker;
use std::time::Duration;

pub(crate) struct Reactor {
    poller: Poller,
    listeners: Slab<Option<Waker>>,
    events: Vec<Event>,
    ready: VecDeque<Rc<dyn Runnable>>,
    registered: usize,
}

pub(crate) type ReactorHandle = Rc<RefCell<Reactor>>;

impl Reactor {
    fn new() -> error::Result<Self> {
        Ok(Self {
            poller: Poller::new().map_err(|e| SystemError::wrap("epoll_create1", e))?,
            listeners: Slab::new(64),
            events: Vec::with_capacity(256),
            ready: VecDeque::new(),
            registered: 0,
        })
    }

    pub(crate) fn register(&mut self, fd: RawFd, interest: Interest) -> error::Result<usize> {
        let token = self.listeners.insert(None);

        if let Err(e) = self.poller.register(fd, token, interest) {
            self.listeners.remove(token);
            return Err(SystemError::wrap("epoll_ctl(ADD)", e).into());
        }

        self.registered += 1;
        Ok(token)
    }

    pub(crate) fn unregister(&mut self, token: usize, fd: RawFd) {
        self.poller.deregister(fd);
        self.listeners.remove(token);
        self.registered -= 1;
    }

    pub(crate) fn install_waiter(&mut self, token: usize, waker: Waker) {
        let slot = self.listeners.get_mut(token);
        assert!(
            slot.is_none(),
            "at most one task may wait on a listener at a time"
        );
        *slot = Some(waker);
    }
}

thread_local! {
    static REACTOR: ReactorHandle = Rc::new(RefCell::new(
        Reactor::new().expect("failed to initialize the reactor for this thread")
    ));
}

/// Returns this thread's reactor, constructing it on first use.
pub(crate) fn current() -> ReactorHandle {
    REACTOR.with(|r| r.clone())
}

/// Pushes a woken task onto the ready queue, to be picked up by the next
/// [`drain_ready`] call.
pub(crate) fn push_ready(task: Rc<dyn Runnable>) {
    REACTOR.with(|r| r.borrow_mut().ready.push_back(task));
}

/// Runs every task currently in the ready queue, including ones a run
/// pushes back onto the queue while it is draining.
fn drain_ready() {
    loop {
        let next = REACTOR.with(|r| r.borrow_mut().ready.pop_front());
        match next {
            Some(task) => task.run(),
            None => break,
        }
    }
}

/// Blocks for readiness once, and wakes every listener the poller reports.
///
/// Collects the wakers while holding the reactor's borrow, then calls them
/// after releasing it — `Waker::wake` runs task code (potentially `spawn`ing
/// more work or re-registering a listener), which would otherwise re-enter
/// the same `RefCell` borrow.
fn poll_once(timeout: Option<Duration>) -> error::Result<()> {
    let wakers = REACTOR.with(|r| -> error::Result<Vec<Waker>> {
        let mut reactor = r.borrow_mut();
        let mut events = std::mem::take(&mut reactor.events);

        reactor
            .poller
            .poll(&mut events, timeout)
            .map_err(|e| SystemError::wrap("epoll_wait", e))?;

        let mut wakers = Vec::new();
        for ev in &events {
            if !ev.readable && !ev.writable {
                continue;
            }
            if let Some(slot) = reactor.listeners.try_get_mut(ev.token) {
                if let Some(waker) = slot.take() {
                    wakers.push(waker);
                }
            }
        }

        reactor.events = events;
        Ok(wakers)
    })?;

    for waker in wakers {
        waker.wake();
    }

    Ok(())
}

/// Runs `future` to completion on the current thread, driving the reactor
/// until it resolves.
///
/// This is the crate's synchronous entry point — typically called once,
/// from `main`, with a future that never resolves (an accept loop) or one
/// that drives a bounded amount of work and then returns.
pub fn block_on<F>(future: F) -> F::Output
where
    F: Future + 'static,
{
    let handle = task::spawn(future);

    loop {
        if handle.task.is_completed() {
            return handle.task.take_result().expect("task result already consumed");
        }

        drain_ready();

        if handle.task.is_completed() {
            return handle.task.take_result().expect("task result already consumed");
        }

        poll_once(None).expect("reactor poll failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactor::poller::common::Interest;
    use crate::task::{spawn, JoinHandle};

    #[test]
    fn block_on_resolves_an_already_ready_future() {
        assert_eq!(block_on(async { 1 + 1 }), 2);
    }

    #[test]
    fn chain_of_already_ready_tasks_does_not_overflow_the_stack() {
        // Each task here is spawned (eager-start) only after the task it
        // awaits has already completed, so every `JoinHandle::poll` in the
        // chain hits the immediate-completion fast path and nothing ever
        // suspends. Building 50,000 of them in a flat loop, rather than
        // nesting the spawn calls, is what keeps this from recursing.
        const DEPTH: usize = 50_000;

        let mut handle: Option<JoinHandle<usize>> = None;
        for _ in 0..DEPTH {
            let prev = handle.take();
            handle = Some(spawn(async move {
                match prev {
                    Some(h) => 1 + h.await,
                    None => 0,
                }
            }));
        }

        let result = block_on(async move { handle.unwrap().await });
        assert_eq!(result, DEPTH);
    }

    #[test]
    #[should_panic(expected = "at most one task may wait on a listener at a time")]
    fn install_waiter_rejects_a_second_concurrent_waiter() {
        let mut fds = [0 as RawFd; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

        REACTOR.with(|r| {
            let token = r.borrow_mut().register(fds[0], Interest::READ).unwrap();
            let waker = Waker::noop().clone();
            r.borrow_mut().install_waiter(token, waker.clone());
            r.borrow_mut().install_waiter(token, waker);
        });
    }
}
