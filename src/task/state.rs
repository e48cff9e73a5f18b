/// Task is idle and not scheduled.
///
/// The task exists but is not currently queued or running.
pub(crate) const IDLE: u8 = 0;

/// Task is queued for execution.
///
/// The task has been pushed to the reactor's ready queue and is waiting
/// to be run.
pub(crate) const QUEUED: u8 = 1;

/// Task is currently being polled.
///
/// Set for the duration of a single call to `Task::run`.
pub(crate) const RUNNING: u8 = 2;

/// Task has completed execution.
///
/// The future has returned `Poll::Ready` and will not be polled again.
pub(crate) const COMPLETED: u8 = 3;

/// Task was woken while it was already running.
///
/// Recorded so `run` re-queues the task once the in-progress poll
/// returns, instead of losing the wakeup.
pub(crate) const NOTIFIED: u8 = 4;
