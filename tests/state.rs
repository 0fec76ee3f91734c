use vow::{make_promise, make_rejected, make_resolved, PromiseError, State};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn starts_pending_and_empty() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    assert_eq!(p.state(), State::Pending);
    assert!(p.is_pending());
    assert!(!p.is_settled());
    assert_eq!(p.value(), None);
    assert!(p.error().is_none());
    assert!(!p.has_handler());
}

#[test]
fn resolve_is_terminal() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    p.resolve(7).unwrap();
    assert_eq!(p.state(), State::Resolved);
    assert_eq!(p.value(), Some(7));
    assert_eq!(p.resolve(8), Err(PromiseError::AlreadySettled));
    assert_eq!(p.reject("late"), Err(PromiseError::AlreadySettled));
    assert_eq!(p.value(), Some(7));
}

#[test]
fn reject_without_handler_is_loud_but_still_settles() {
    init();
    let p = make_promise::<(), _>(|_| {});
    assert_eq!(p.reject("x"), Err(PromiseError::UnhandledRejection));
    assert_eq!(p.state(), State::Rejected);
    assert_eq!(p.error().unwrap().downcast_ref::<&str>(), Some(&"x"));
    assert_eq!(p.resolve(()), Err(PromiseError::AlreadySettled));
}

#[test]
fn reject_with_handler_fires_it() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    let q = p.rescue(|error| if error.is::<&str>() { -1 } else { -2 });
    assert!(p.has_handler());
    p.reject("nope").unwrap();
    assert_eq!(q.value(), Some(-1));
}

#[test]
fn rejected_factory_skips_the_handler_check() {
    init();
    let p = make_rejected::<i32, _>("bad");
    assert_eq!(p.state(), State::Rejected);
    assert!(p.error().is_some());
    assert!(!p.has_handler());
}

#[test]
fn make_resolved_is_resolved_on_arrival() {
    init();
    let p = make_resolved(42);
    assert!(p.is_resolved());
    assert_eq!(p.value(), Some(42));
}

#[test]
fn launcher_may_settle_immediately() {
    init();
    let p = make_promise::<i32, _>(|p| p.resolve(3).unwrap());
    assert_eq!(p.value(), Some(3));
}

#[test]
fn launcher_may_stash_the_handle() {
    init();
    let mut stash = None;
    let p = make_promise::<String, _>(|p| stash = Some(p.clone()));
    assert!(p.is_pending());
    stash.unwrap().resolve("later".to_string()).unwrap();
    assert_eq!(p.value(), Some("later".to_string()));
}

#[test]
fn unit_promises_resolve_with_unit() {
    init();
    let p = make_promise::<(), _>(|_| {});
    p.resolve(()).unwrap();
    assert_eq!(p.value(), Some(()));
}

#[test]
fn reattach_overwrites_the_previous_continuation() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    let first = p.success(|v| v + 1);
    let second = p.success(|v| v * 10);
    p.resolve(4).unwrap();
    // the superseded chain never settles
    assert!(first.is_pending());
    assert_eq!(second.value(), Some(40));
}

#[test]
fn settling_from_inside_a_handler_reports_already_settled() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    let observed = p.success({
        let p = p.clone();
        move |v| {
            // upstream has settled by the time its handler runs
            assert_eq!(p.resolve(0), Err(PromiseError::AlreadySettled));
            v
        }
    });
    p.resolve(5).unwrap();
    assert_eq!(observed.value(), Some(5));
}

#[test]
fn rejection_reaching_a_bare_chain_end_is_loud() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    let q = p.success(|v| v + 1);
    assert!(q.is_pending());
    assert_eq!(p.reject("boom"), Err(PromiseError::UnhandledRejection));
    // the chain still settled on the way
    assert!(q.is_rejected());
}

#[test]
fn a_rescue_at_the_chain_end_keeps_rejection_quiet() {
    init();
    let p = make_promise::<i32, _>(|_| {});
    let q = p.success(|v| v + 1).rescue(|_| 0);
    p.reject("boom").unwrap();
    assert_eq!(q.value(), Some(0));
}
