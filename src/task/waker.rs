use crate::task::Task;

use std::mem;
use std::rc::Rc;
use std::task::{RawWaker, RawWakerVTable, Waker};

/// Returns the `RawWakerVTable` for a task producing `T`.
fn vtable<T: 'static>() -> &'static RawWakerVTable {
    &RawWakerVTable::new(
        clone_raw::<T>,
        wake_raw::<T>,
        wake_by_ref_raw::<T>,
        drop_raw::<T>,
    )
}

/// Builds a [`Waker`] backed by `Rc<Task<T>>` instead of the `Arc` a
/// multi-threaded executor would need.
///
/// # Safety
///
/// The runtime never hands this waker to another thread — there is only
/// ever one thread driving the reactor's ready queue. Sending it across
/// threads and waking it there would race the `Rc` strong count, which is
/// not `Sync`. Nothing in the public API exposes a way to do that.
pub(crate) fn make_waker<T: 'static>(task: Rc<Task<T>>) -> Waker {
    unsafe { Waker::from_raw(RawWaker::new(Rc::into_raw(task) as *const (), vtable::<T>())) }
}

fn clone_raw<T: 'static>(ptr: *const ()) -> RawWaker {
    let rc = unsafe { Rc::<Task<T>>::from_raw(ptr as *const Task<T>) };
    let cloned = rc.clone();
    mem::forget(rc);

    RawWaker::new(Rc::into_raw(cloned) as *const (), vtable::<T>())
}

fn wake_raw<T: 'static>(ptr: *const ()) {
    let rc = unsafe { Rc::<Task<T>>::from_raw(ptr as *const Task<T>) };
    rc.wake();
}

fn wake_by_ref_raw<T: 'static>(ptr: *const ()) {
    let rc = unsafe { Rc::<Task<T>>::from_raw(ptr as *const Task<T>) };
    rc.clone().wake();
    mem::forget(rc);
}

fn drop_raw<T: 'static>(ptr: *const ()) {
    unsafe { Rc::<Task<T>>::from_raw(ptr as *const Task<T>) };
}
