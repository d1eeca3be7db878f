use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use minecoind_chainparams::{
    init, modifiable_params, params, reset_params, select_params, selected_network, try_params,
    ParamsError,
};
use minecoind_consensus::NetworkId;

// The active network is process-wide; tests that touch it run one at a time.
static GLOBAL: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    let guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    init().expect("chain parameters");
    reset_params();
    guard
}

#[test]
fn unselected_reads_fail() {
    let _guard = lock();
    assert_eq!(selected_network(), None);
    assert_eq!(try_params().map(|_| ()), Err(ParamsError::NotSelected));
    let panicked = thread::spawn(params).join();
    assert!(panicked.is_err());
}

#[test]
fn select_main() {
    let _guard = lock();
    select_params(NetworkId::Main).expect("select");
    let active = params();
    assert_eq!(active.network_id, NetworkId::Main);
    assert_eq!(active.default_port, 42511);
    assert_eq!(selected_network(), Some(NetworkId::Main));
}

#[test]
fn second_selection_is_rejected_until_reset() {
    let _guard = lock();
    select_params(NetworkId::Regtest).expect("select");
    assert_eq!(
        select_params(NetworkId::Main),
        Err(ParamsError::AlreadySelected {
            active: NetworkId::Regtest,
            requested: NetworkId::Main,
        })
    );
    reset_params();
    select_params(NetworkId::Main).expect("select after reset");
    assert_eq!(params().network_id, NetworkId::Main);
}

#[test]
fn readers_on_other_threads_see_selection() {
    let _guard = lock();
    select_params(NetworkId::Test).expect("select");
    let ports: Vec<u16> = (0..4)
        .map(|_| thread::spawn(|| params().default_port))
        .map(|handle| handle.join().expect("reader"))
        .collect();
    assert_eq!(ports, vec![43511; 4]);
}

#[test]
fn unit_test_mutation_leaves_main_alone() {
    let _guard = lock();
    select_params(NetworkId::UnitTest).expect("select");
    let original = params().subsidy_halving_interval;
    modifiable_params().set_subsidy_halving_interval(150);
    assert_eq!(params().subsidy_halving_interval, 150);

    reset_params();
    select_params(NetworkId::Main).expect("select main");
    assert_eq!(params().subsidy_halving_interval, 840_000);

    let panicked = thread::spawn(modifiable_params).join();
    assert!(panicked.is_err());

    reset_params();
    select_params(NetworkId::UnitTest).expect("reselect");
    modifiable_params().set_subsidy_halving_interval(original);
}
