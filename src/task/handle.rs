use crate::task::Task;

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// A handle to a spawned task's eventual result.
///
/// Obtained from [`spawn`](super::spawn). Implements [`Future`], so the
/// result is retrieved with `.await`; the task itself keeps running to
/// completion even if this handle is awaited later, or not at all — dropping
/// it only releases this reference, and the task's frame is torn down once
/// every `Rc` to it (this handle, the ready queue entry, any reactor
/// continuation waiting on its I/O) has gone away.
pub struct JoinHandle<T> {
    pub(crate) task: Rc<Task<T>>,
}

impl<T> Future for JoinHandle<T> {
    type Output = T;

    /// Double-checks completion around registering the waker, so a result
    /// produced between the first check and the registration is not missed.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.task.is_completed() {
            return Poll::Ready(
                self.task
                    .take_result()
                    .expect("task result already consumed; JoinHandle cannot be polled twice"),
            );
        }

        self.task.set_awaiter(cx.waker().clone());

        if self.task.is_completed() {
            return Poll::Ready(
                self.task
                    .take_result()
                    .expect("task result already consumed"),
            );
        }

        Poll::Pending
    }
}
