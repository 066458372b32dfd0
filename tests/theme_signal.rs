use sheetviz::{ThemeMode, ThemeSignal};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn get_reflects_last_write() {
    let signal = ThemeSignal::new(ThemeMode::Light);
    assert_eq!(signal.get(), ThemeMode::Light);
    signal.set(ThemeMode::Dark);
    signal.set(ThemeMode::Light);
    signal.set(ThemeMode::Dark);
    assert_eq!(signal.get(), ThemeMode::Dark);
}

#[test]
fn subscribers_see_transitions_only() {
    let signal = ThemeSignal::new(ThemeMode::Light);
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let _sub = signal.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    signal.set(ThemeMode::Light); // no transition
    signal.set(ThemeMode::Dark);
    signal.set(ThemeMode::Dark); // no transition
    signal.set(ThemeMode::Light);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_the_subscription_stops_notifications() {
    let signal = ThemeSignal::new(ThemeMode::Light);
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let sub = signal.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    signal.set(ThemeMode::Dark);
    drop(sub);
    signal.set(ThemeMode::Light);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn callbacks_may_read_the_signal() {
    // notification runs outside the internal lock
    let signal = ThemeSignal::new(ThemeMode::Light);
    let observer = signal.clone();
    let observed = Arc::new(AtomicUsize::new(usize::MAX));
    let slot = observed.clone();
    let _sub = signal.subscribe(move |mode| {
        assert_eq!(observer.get(), mode);
        slot.store(mode as usize, Ordering::SeqCst);
    });

    signal.set(ThemeMode::Dark);
    assert_eq!(observed.load(Ordering::SeqCst), ThemeMode::Dark as usize);
}

#[test]
fn clones_share_state() {
    let signal = ThemeSignal::default();
    let clone = signal.clone();
    clone.set(ThemeMode::Dark);
    assert_eq!(signal.get(), ThemeMode::Dark);
}
