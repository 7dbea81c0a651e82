//! Emergency lockdown effects across operations

use assert_matches::assert_matches;
use strongroom_core::RegistryError;
use strongroom_registry::EngageRequest;
use strongroom_testkit::{actors, Harness};

#[test]
fn lockdown_blocks_transfers_and_locks_only() {
    let h = Harness::new();
    let (alice, bob, admin) = (actors::alice(), actors::bob(), actors::admin());
    let id = h.create_vault(&alice, "Vault1").unwrap();
    let spare = h.create_vault(&alice, "Vault2").unwrap();

    assert_matches!(
        h.service().activate_lockdown(&h.ctx(&alice)),
        Err(RegistryError::AdminPrivileges { .. })
    );
    h.service().activate_lockdown(&h.ctx(&admin)).unwrap();
    assert!(h.service().global_state().emergency_lockdown_active);

    assert_matches!(
        h.service().transfer_ownership(&h.ctx(&alice), id, bob.clone()),
        Err(RegistryError::AdminPrivileges { .. })
    );
    assert_matches!(
        h.service()
            .secure_transfer_ownership(&h.ctx(&alice), id, bob.clone()),
        Err(RegistryError::AdminPrivileges { .. })
    );
    assert_matches!(
        h.service()
            .engage_timelock(&h.ctx(&alice), id, EngageRequest::new(5, "cold", "r")),
        Err(RegistryError::AdminPrivileges { .. })
    );

    // Reads, metadata edits and removal still work.
    assert!(h.service().get_details(&h.ctx(&alice), id).is_ok());
    h.service()
        .update_metadata(&h.ctx(&alice), id, "frozen".to_string())
        .unwrap();
    h.service()
        .administrative_removal(&h.ctx(&admin), spare)
        .unwrap();

    h.service().deactivate_lockdown(&h.ctx(&admin)).unwrap();
    h.service()
        .secure_transfer_ownership(&h.ctx(&alice), id, bob.clone())
        .unwrap();
    assert!(h.service().external_ownership_validation(id, &bob).unwrap());
}

#[test]
fn plain_transfer_does_not_check_owner() {
    let h = Harness::new();
    let (alice, carol) = (actors::alice(), actors::carol());
    let id = h.create_vault(&alice, "Vault1").unwrap();

    assert_matches!(
        h.service()
            .secure_transfer_ownership(&h.ctx(&carol), id, carol.clone()),
        Err(RegistryError::OwnerVerification { .. })
    );
    h.service()
        .transfer_ownership(&h.ctx(&carol), id, carol.clone())
        .unwrap();
    assert!(h.service().external_ownership_validation(id, &carol).unwrap());
}

#[test]
fn active_lock_does_not_block_transfer() {
    let h = Harness::new();
    let (alice, bob) = (actors::alice(), actors::bob());
    let id = h.create_vault(&alice, "Vault1").unwrap();
    h.service()
        .engage_timelock(&h.ctx(&alice), id, EngageRequest::new(100, "cold", "r"))
        .unwrap();

    h.service()
        .secure_transfer_ownership(&h.ctx(&alice), id, bob.clone())
        .unwrap();
    assert!(h.service().is_locked(&h.ctx(&bob), id).unwrap());
}
