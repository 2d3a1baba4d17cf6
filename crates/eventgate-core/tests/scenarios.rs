//! # Gateway Scenarios
//!
//! End-to-end flows over the built-in seed set, grouped by concern.

use eventgate_core::{
    AddEventInput, AddUserInput, DanglingPolicy, EntityKind, EntityStore, EventField, Gateway,
    GatewayError, GatewayMode, SeedData, SequentialIdGenerator, UpdateEventInput, UpdateUserInput,
    integrity_report,
};

fn gateway(policy: DanglingPolicy) -> Gateway {
    Gateway::with_id_generator(
        EntityStore::from_seed(SeedData::builtin()),
        Box::new(SequentialIdGenerator::new("gen-")),
        policy,
    )
}

fn add_event_input(location_id: &str, user_id: &str) -> AddEventInput {
    AddEventInput {
        title: "T".into(),
        desc: "D".into(),
        date: None,
        from: None,
        to: None,
        location_id: location_id.into(),
        user_id: user_id.into(),
    }
}

// =============================================================================
// EVENT CREATION AND RESOLUTION
// =============================================================================

mod event_resolution {
    use super::*;

    #[test]
    fn added_event_resolves_owner_and_empty_participants() {
        let mut gateway = gateway(DanglingPolicy::Strict);

        let created = gateway
            .add_event(add_event_input("l1", "u1"))
            .expect("add event");
        assert_eq!(created.id, "gen-1");

        let resolved = gateway
            .get_event(&created.id, &EventField::ALL)
            .expect("resolve")
            .expect("created event is readable");

        let owner = resolved.user.flatten().expect("owner");
        assert_eq!(owner.id, "u1");
        assert_eq!(Some(&owner), gateway.get_user("u1"));
        assert_eq!(resolved.location.flatten().map(|l| l.id), Some("l1".into()));
        assert_eq!(resolved.participants, Some(vec![]));
    }

    #[test]
    fn event_with_missing_location_fails_strict_read() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        let created = gateway
            .add_event(add_event_input("nowhere", "u1"))
            .expect("add does not validate references");

        let result = gateway.get_event(&created.id, &[EventField::Location]);

        assert_eq!(
            result,
            Err(GatewayError::DanglingReference {
                field: EventField::Location,
                id: "nowhere".into()
            })
        );
    }

    #[test]
    fn event_with_missing_location_is_null_when_lenient() {
        let mut gateway = gateway(DanglingPolicy::Lenient);
        let created = gateway
            .add_event(add_event_input("nowhere", "u1"))
            .expect("add");

        let resolved = gateway
            .get_event(&created.id, &EventField::ALL)
            .expect("lenient read")
            .expect("event");

        assert_eq!(resolved.location, Some(None));
        assert!(resolved.user.flatten().is_some());
    }

    #[test]
    fn reassigning_owner_changes_resolved_user() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        gateway
            .update_event(
                "e1",
                UpdateEventInput {
                    user_id: Some("u3".into()),
                    ..UpdateEventInput::default()
                },
            )
            .expect("update");

        let resolved = gateway
            .get_event("e1", &[EventField::User])
            .expect("resolve")
            .expect("event");

        assert_eq!(resolved.user.flatten().map(|u| u.username), Some("linus".into()));
    }
}

// =============================================================================
// USER MUTATIONS
// =============================================================================

mod user_mutations {
    use super::*;

    #[test]
    fn update_missing_user_is_not_found() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        let before = gateway.get_users().to_vec();

        let result = gateway.update_user(
            "missing",
            UpdateUserInput {
                username: Some("x".into()),
                email: None,
            },
        );

        assert_eq!(
            result,
            Err(GatewayError::NotFound {
                entity: EntityKind::User,
                id: "missing".into()
            })
        );
        assert_eq!(gateway.get_users(), before.as_slice());
    }

    #[test]
    fn delete_all_users_on_seed() {
        let mut gateway = gateway(DanglingPolicy::Strict);

        assert_eq!(gateway.delete_all_users().expect("delete all").count, 3);
        assert!(gateway.get_users().is_empty());
        assert_eq!(gateway.delete_all_users().expect("delete all").count, 0);
    }

    #[test]
    fn deleted_user_leaves_dangling_owner() {
        let mut gateway = gateway(DanglingPolicy::Strict);

        let removed = gateway.delete_user("u2").expect("delete");
        assert_eq!(removed.username, "grace");

        // No cascade: e2 still points at u2
        assert_eq!(gateway.get_events(&[]).expect("bare").len(), 3);
        assert!(!integrity_report(gateway.store()).is_clean());
        assert!(matches!(
            gateway.get_event("e2", &[EventField::User]),
            Err(GatewayError::DanglingReference { .. })
        ));
    }

    #[test]
    fn added_users_keep_insertion_order() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        for name in ["x", "y"] {
            gateway
                .add_user(AddUserInput {
                    username: name.into(),
                    email: format!("{name}@example.com"),
                })
                .expect("add");
        }

        let ids: Vec<&str> = gateway.get_users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3", "gen-1", "gen-2"]);
    }
}

// =============================================================================
// EVENT MUTATIONS
// =============================================================================

mod event_mutations {
    use super::*;

    #[test]
    fn update_missing_event_is_not_found() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        let before = gateway.store().events.clone();

        let result = gateway.update_event(
            "missing",
            UpdateEventInput {
                title: Some("x".into()),
                ..UpdateEventInput::default()
            },
        );

        assert_eq!(
            result,
            Err(GatewayError::NotFound {
                entity: EntityKind::Event,
                id: "missing".into()
            })
        );
        assert_eq!(gateway.store().events, before);
    }

    #[test]
    fn delete_missing_event_is_not_found() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        let before = gateway.store().events.clone();

        let result = gateway.delete_event("missing");

        assert!(matches!(
            result,
            Err(GatewayError::NotFound {
                entity: EntityKind::Event,
                ..
            })
        ));
        assert_eq!(gateway.store().events, before);
    }

    #[test]
    fn delete_all_events_on_seed() {
        let mut gateway = gateway(DanglingPolicy::Strict);

        assert_eq!(gateway.delete_all_events().expect("delete all").count, 3);
        assert!(gateway.get_events(&EventField::ALL).expect("empty").is_empty());
        assert_eq!(gateway.delete_all_events().expect("delete all").count, 0);
        // Participants are not cascaded
        assert_eq!(gateway.counts().participants, 6);
    }

    #[test]
    fn dangling_field_aborts_add_before_insert() {
        let mut gateway = gateway(DanglingPolicy::Strict);

        let result =
            gateway.add_event_resolved(add_event_input("nowhere", "u1"), &[EventField::Location]);

        assert!(matches!(
            result,
            Err(GatewayError::DanglingReference { ref id, .. }) if id == "nowhere"
        ));
        assert_eq!(gateway.counts().events, 3);
    }

    #[test]
    fn dangling_field_aborts_update_before_write() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        let before = gateway.store().clone();

        let result = gateway.update_event_resolved(
            "e1",
            UpdateEventInput {
                location_id: Some("nowhere".into()),
                ..UpdateEventInput::default()
            },
            &[EventField::Location],
        );

        assert!(result.is_err());
        assert_eq!(gateway.store(), &before);
    }

    #[test]
    fn dangling_field_aborts_delete_before_removal() {
        let mut gateway = gateway(DanglingPolicy::Strict);
        gateway.delete_user("u1").expect("delete owner");
        let before = gateway.store().clone();

        let result = gateway.delete_event_resolved("e1", &[EventField::User]);

        assert!(matches!(result, Err(GatewayError::DanglingReference { .. })));
        assert_eq!(gateway.store(), &before);
        assert!(gateway.get_event("e1", &[]).expect("bare").is_some());
    }

    #[test]
    fn lenient_mutation_commits_with_null_field() {
        let mut gateway = gateway(DanglingPolicy::Lenient);

        let resolved = gateway
            .add_event_resolved(add_event_input("nowhere", "u1"), &[EventField::Location])
            .expect("lenient add");

        assert_eq!(resolved.location, Some(None));
        assert_eq!(gateway.counts().events, 4);
    }
}

// =============================================================================
// DEPLOYMENT MODES
// =============================================================================

mod deployment_modes {
    use super::*;

    #[test]
    fn read_only_gateway_has_same_reads() {
        let full = gateway(DanglingPolicy::Strict);
        let read_only = Gateway::new(
            EntityStore::from_seed(SeedData::builtin()),
            GatewayMode::ReadOnly,
            DanglingPolicy::Strict,
        );

        assert_eq!(full.get_users(), read_only.get_users());
        assert_eq!(full.get_locations(), read_only.get_locations());
        assert_eq!(full.get_participants(), read_only.get_participants());
        assert_eq!(
            full.get_events(&EventField::ALL),
            read_only.get_events(&EventField::ALL)
        );
    }

    #[test]
    fn read_only_names_rejected_operation() {
        let mut read_only = Gateway::new(
            EntityStore::from_seed(SeedData::builtin()),
            GatewayMode::ReadOnly,
            DanglingPolicy::Strict,
        );

        let err = read_only.delete_all_events().expect_err("read-only");
        assert_eq!(
            err.to_string(),
            "Operation 'deleteAllEvent' is not available on a read-only gateway"
        );
        assert_eq!(read_only.counts().events, 3);
    }
}
