//! End-to-end registry scenarios through the service facade

use assert_matches::assert_matches;
use strongroom_core::{LedgerState, PortfolioId, RegistryError, Tick};
use strongroom_registry::{EngageRequest, NewPortfolio, PhaseSpec};
use strongroom_testkit::{actors, Harness};

#[test]
fn vault_grant_lock_and_expiry() {
    let h = Harness::new();
    let (alice, bob) = (actors::alice(), actors::bob());

    let id = h
        .service()
        .create(&h.ctx(&alice), NewPortfolio::new("Vault1", 100, &["btc"]))
        .unwrap();
    assert_eq!(id, PortfolioId(1));
    assert!(h.service().external_ownership_validation(id, &alice).unwrap());

    assert_matches!(
        h.service().get_details(&h.ctx(&bob), id),
        Err(RegistryError::ViewPermissions { .. })
    );
    h.service()
        .grant_view_access(&h.ctx(&alice), id, bob.clone())
        .unwrap();
    let seen = h.service().get_details(&h.ctx(&bob), id).unwrap();
    assert_eq!(seen.name, "Vault1");
    assert_eq!(seen.owner, alice);

    h.service()
        .engage_timelock(&h.ctx(&alice), id, EngageRequest::new(10, "cold", "audit"))
        .unwrap();
    assert!(h.service().is_locked(&h.ctx(&alice), id).unwrap());
    assert_eq!(h.service().remaining_duration(&h.ctx(&alice), id), 10);

    h.advance(10);
    assert!(!h.service().is_locked(&h.ctx(&alice), id).unwrap());
    assert_eq!(h.service().remaining_duration(&h.ctx(&alice), id), 0);

    // The lapsed lock no longer blocks a new one.
    let unlock = h
        .service()
        .engage_timelock(&h.ctx(&alice), id, EngageRequest::new(5, "cold", "again"))
        .unwrap();
    assert_eq!(unlock, Tick(15));
}

#[test]
fn revoked_viewer_loses_access() {
    let h = Harness::new();
    let (alice, bob) = (actors::alice(), actors::bob());
    let id = h.create_vault(&alice, "Vault1").unwrap();

    h.service()
        .grant_view_access(&h.ctx(&alice), id, bob.clone())
        .unwrap();
    assert!(h.service().can_view(id, &bob));
    h.service()
        .revoke_view_access(&h.ctx(&alice), id, &bob)
        .unwrap();
    assert!(!h.service().can_view(id, &bob));
    assert_matches!(
        h.service().get_details(&h.ctx(&bob), id),
        Err(RegistryError::ViewPermissions { .. })
    );
}

#[test]
fn locksmith_delegation_lifecycle() {
    let h = Harness::new();
    let (alice, bob, carol) = (actors::alice(), actors::bob(), actors::carol());
    let id = h.create_vault(&alice, "Vault1").unwrap();

    assert_matches!(
        h.service()
            .engage_timelock(&h.ctx(&bob), id, EngageRequest::new(5, "hot", "r")),
        Err(RegistryError::UnauthorizedAccess { .. })
    );
    assert_matches!(
        h.service().authorize_locksmith(&h.ctx(&alice), id, bob.clone(), 6),
        Err(RegistryError::TagValidation { .. })
    );
    assert_matches!(
        h.service().authorize_locksmith(&h.ctx(&carol), id, bob.clone(), 1),
        Err(RegistryError::OwnerVerification { .. })
    );

    h.service()
        .authorize_locksmith(&h.ctx(&alice), id, bob.clone(), 5)
        .unwrap();
    assert!(h.service().verify_locksmith_authorization(id, &bob));
    h.service()
        .engage_timelock(&h.ctx(&bob), id, EngageRequest::new(5, "hot", "r"))
        .unwrap();

    // Only the initiator or the administrator may release.
    assert_matches!(
        h.service().release_timelock(&h.ctx(&alice), id),
        Err(RegistryError::UnauthorizedAccess { .. })
    );
    h.service().release_timelock(&h.ctx(&bob), id).unwrap();
    assert!(!h.service().is_locked(&h.ctx(&alice), id).unwrap());
    assert_matches!(
        h.service().release_timelock(&h.ctx(&bob), id),
        Err(RegistryError::NotFound { .. })
    );

    h.service()
        .revoke_locksmith_authorization(&h.ctx(&alice), id, &bob)
        .unwrap();
    assert!(!h.service().verify_locksmith_authorization(id, &bob));
}

#[test]
fn lock_status_follows_view_rules() {
    let h = Harness::new();
    let (alice, bob) = (actors::alice(), actors::bob());
    let id = h.create_vault(&alice, "Vault1").unwrap();

    assert_eq!(h.service().lock_status(&h.ctx(&alice), id).unwrap(), None);
    h.service()
        .engage_timelock(
            &h.ctx(&alice),
            id,
            EngageRequest::new(3, "cold", "audit").with_emergency_unlock("admin"),
        )
        .unwrap();

    assert_matches!(
        h.service().lock_status(&h.ctx(&bob), id),
        Err(RegistryError::ViewPermissions { .. })
    );
    let lock = h
        .service()
        .lock_status(&h.ctx(&actors::admin()), id)
        .unwrap()
        .unwrap();
    assert_eq!(lock.initiator, alice);
    assert_eq!(lock.emergency_unlock, Some(actors::admin()));
    assert_matches!(
        h.service().lock_status(&h.ctx(&alice), PortfolioId(7)),
        Err(RegistryError::NotFound { .. })
    );
}

#[test]
fn removal_leaves_orphaned_lock_releasable() {
    let h = Harness::new();
    let (alice, admin) = (actors::alice(), actors::admin());
    let id = h.create_vault(&alice, "Vault1").unwrap();
    h.service()
        .engage_timelock(&h.ctx(&alice), id, EngageRequest::new(50, "cold", "audit"))
        .unwrap();

    h.service()
        .administrative_removal(&h.ctx(&admin), id)
        .unwrap();
    assert!(!h.service().exists(id));
    assert_eq!(h.service().total_count(), 1);
    assert_matches!(
        h.service().is_locked(&h.ctx(&alice), id),
        Err(RegistryError::NotFound { .. })
    );
    assert_eq!(h.service().remaining_duration(&h.ctx(&alice), id), 50);

    h.service().release_timelock(&h.ctx(&alice), id).unwrap();
    assert_eq!(h.service().remaining_duration(&h.ctx(&alice), id), 0);
}

#[test]
fn vesting_schedule_is_validated_only() {
    let h = Harness::new();
    let (alice, bob) = (actors::alice(), actors::bob());
    let id = h.create_vault(&alice, "Vault1").unwrap();
    let phase = PhaseSpec {
        percentage: 25,
        unlock_tick: Tick(100),
        beneficiary: bob.clone(),
    };

    assert_eq!(
        h.service()
            .create_vesting_schedule(&h.ctx(&alice), id, &[phase.clone()])
            .unwrap(),
        1
    );
    assert_matches!(
        h.service().create_vesting_schedule(&h.ctx(&bob), id, &[phase]),
        Err(RegistryError::OwnerVerification { .. })
    );
    assert_matches!(
        h.service().create_vesting_schedule(&h.ctx(&alice), id, &[]),
        Err(RegistryError::TagValidation { .. })
    );
    assert_eq!(h.service().export().vesting_phase(id, 0), None);
}
