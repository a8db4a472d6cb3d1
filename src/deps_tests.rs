use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

struct CountingInstaller {
    calls: AtomicUsize,
    succeed: bool,
}

impl CountingInstaller {
    const fn new(succeed: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            succeed,
        }
    }
}

impl DependencyInstaller for CountingInstaller {
    fn ensure_available(&self, _capability: Capability) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.succeed
    }
}

#[test]
fn probe_matches_build_configuration() {
    let state = DependencyState::probe();
    let expected = cfg!(feature = "advanced-spreadsheet");
    assert_eq!(state.is_available(Capability::AdvancedSpreadsheet), expected);
}

#[test]
fn present_state_skips_the_installer() {
    let state = DependencyState::with_availability(Availability::Present);
    let installer = CountingInstaller::new(true);

    let availability = state.negotiate(Capability::AdvancedSpreadsheet, Some(&installer));
    assert_eq!(availability, Availability::Present);
    assert_eq!(installer.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn successful_install_transitions_to_present() {
    let state = DependencyState::with_availability(Availability::Absent);
    let installer = CountingInstaller::new(true);

    let availability = state.negotiate(Capability::AdvancedSpreadsheet, Some(&installer));
    assert_eq!(availability, Availability::Present);
    assert!(state.is_available(Capability::AdvancedSpreadsheet));
}

#[test]
fn installer_is_invoked_at_most_once() {
    let state = DependencyState::with_availability(Availability::Absent);
    let installer = CountingInstaller::new(false);

    assert_eq!(
        state.negotiate(Capability::AdvancedSpreadsheet, Some(&installer)),
        Availability::Absent
    );
    assert_eq!(
        state.negotiate(Capability::AdvancedSpreadsheet, Some(&installer)),
        Availability::Absent
    );
    assert_eq!(installer.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn no_installer_keeps_capability_absent() {
    let state = DependencyState::with_availability(Availability::Absent);
    assert_eq!(
        state.negotiate(Capability::AdvancedSpreadsheet, Some(&NoInstaller)),
        Availability::Absent
    );
    assert_eq!(
        state.negotiate(Capability::AdvancedSpreadsheet, None),
        Availability::Absent
    );
}
