use super::*;

#[test]
fn handles_are_monotonic_and_fifo() {
    let mut q = FrameQueue::default();
    let a = q.request();
    let b = q.request();
    assert!(a < b);
    assert_eq!(q.pending_len(), 2);
    assert_eq!(q.take_due(), Some(a));
    assert_eq!(q.take_due(), Some(b));
    assert_eq!(q.take_due(), None);
    assert_eq!(q.requested_total(), 2);
}

#[test]
fn cancel_removes_only_that_handle() {
    let mut q = FrameQueue::default();
    let a = q.request();
    let b = q.request();
    q.cancel(a);
    assert_eq!(q.pending_len(), 1);
    assert_eq!(q.take_due(), Some(b));
}

#[test]
fn cancel_unknown_handle_is_ignored() {
    let mut q = FrameQueue::default();
    let a = q.request();
    q.cancel(FrameHandle(999));
    assert_eq!(q.take_due(), Some(a));
    q.cancel(a);
    assert_eq!(q.pending_len(), 0);
}
