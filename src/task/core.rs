use super::JoinHandle;
use super::state::{COMPLETED, IDLE, NOTIFIED, QUEUED, RUNNING};
use crate::reactor;
use crate::task::waker::make_waker;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// A runnable unit of work the reactor's ready queue can hold regardless of
/// the task's output type.
pub(crate) trait Runnable {
    fn run(self: Rc<Self>);
}

/// A spawned coroutine: a future plus the bookkeeping needed to poll it from
/// the ready queue and hand its result to a [`JoinHandle`].
///
/// Single-threaded, so the atomics and `Mutex<Vec<Waker>>` a work-stealing
/// executor needs collapse to a plain `Cell<u8>` state and a single
/// `Option<Waker>` — at most one `JoinHandle` ever awaits a given task.
pub(crate) struct Task<T> {
    future: RefCell<Pin<Box<dyn Future<Output = T>>>>,
    result: RefCell<Option<T>>,
    state: Cell<u8>,
    awaiter: RefCell<Option<Waker>>,
}

impl<T: 'static> Task<T> {
    fn new<F>(future: F) -> Self
    where
        F: Future<Output = T> + 'static,
    {
        Self {
            future: RefCell::new(Box::pin(future)),
            result: RefCell::new(None),
            state: Cell::new(QUEUED),
            awaiter: RefCell::new(None),
        }
    }

    /// Polls the task once, transitioning its state and, on completion,
    /// stashing the result and waking the `JoinHandle` awaiting it.
    pub(crate) fn run(self: Rc<Self>) {
        let current = self.state.get();
        if current != QUEUED && current != NOTIFIED {
            return;
        }
        self.state.set(RUNNING);

        let waker = make_waker(self.clone());
        let mut cx = Context::from_waker(&waker);

        let poll = self.future.borrow_mut().as_mut().poll(&mut cx);

        match poll {
            Poll::Pending => match self.state.get() {
                RUNNING => self.state.set(IDLE),
                NOTIFIED => {
                    self.state.set(QUEUED);
                    reactor::push_ready(self.clone() as Rc<dyn Runnable>);
                }
                _ => unreachable!("task state changed without going through run/wake"),
            },
            Poll::Ready(val) => {
                *self.result.borrow_mut() = Some(val);
                self.state.set(COMPLETED);

                if let Some(w) = self.awaiter.borrow_mut().take() {
                    w.wake();
                }
            }
        }
    }

    /// Reschedules the task, or marks it to be rescheduled once the poll
    /// currently in progress returns.
    pub(crate) fn wake(self: Rc<Self>) {
        match self.state.get() {
            IDLE => {
                self.state.set(QUEUED);
                reactor::push_ready(self.clone() as Rc<dyn Runnable>);
            }
            RUNNING => self.state.set(NOTIFIED),
            QUEUED | NOTIFIED | COMPLETED => {}
            _ => unreachable!(),
        }
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.state.get() == COMPLETED
    }

    pub(crate) fn take_result(&self) -> Option<T> {
        self.result.borrow_mut().take()
    }

    pub(crate) fn set_awaiter(&self, waker: Waker) {
        *self.awaiter.borrow_mut() = Some(waker);
    }
}

impl<T: 'static> Runnable for Task<T> {
    fn run(self: Rc<Self>) {
        Task::run(self)
    }
}

/// Spawns a future onto the current thread's reactor.
///
/// The task is polled once synchronously before `spawn` returns (eager
/// start), matching the way a plain `.await`ed async call begins running
/// immediately rather than waiting for a scheduler tick.
///
/// # Panics
///
/// Panics if called outside a reactor context (see [`reactor::block_on`]).
pub fn spawn<F, T>(future: F) -> JoinHandle<T>
where
    T: 'static,
    F: Future<Output = T> + 'static,
{
    let task = Rc::new(Task::new(future));
    task.clone().run();
    JoinHandle { task }
}
