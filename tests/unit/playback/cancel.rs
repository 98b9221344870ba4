use super::*;

#[test]
fn passes_through_settlement_until_cancelled() {
    let (c, r) = Completion::pending();
    let w = Cancellable::new(c);
    assert_eq!(w.poll(), Outcome::Pending);

    assert!(r.resolve());
    assert_eq!(w.poll(), Outcome::Resolved);
    assert!(!r.reject("late"), "first settle wins");
    assert_eq!(w.poll(), Outcome::Resolved);
}

#[test]
fn rejection_is_delivered_with_reason() {
    let (c, r) = Completion::pending();
    let w = Cancellable::new(c);
    r.reject("texture missing");
    assert_eq!(w.poll(), Outcome::Rejected("texture missing".to_owned()));
}

#[test]
fn cancelled_wrapper_hides_later_resolution_and_rejection() {
    let (c, r) = Completion::pending();
    let w = Cancellable::new(c);
    let handle = w.handle();
    handle.cancel();

    r.resolve();
    assert_eq!(w.poll(), Outcome::Cancelled);
    // The underlying operation still settled; only its observation is suppressed.
    assert!(r.is_settled());

    let w2 = Cancellable::new(Completion::rejected("boom"));
    w2.cancel();
    assert_eq!(w2.poll(), Outcome::Cancelled);
}

#[test]
fn handles_compare_by_identity() {
    let a = Cancellable::new(Completion::resolved());
    let b = Cancellable::new(Completion::resolved());
    assert_eq!(a.handle(), a.handle());
    assert_ne!(a.handle(), b.handle());
    assert!(!b.handle().is_cancelled());
}
