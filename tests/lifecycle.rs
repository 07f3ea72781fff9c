use laundry_link::{
    api::{
        ticket::{ItemCounts, Status},
        user::Role,
    },
    lifecycle::{self, Error},
};

#[test]
fn staff_only_targets_pending_and_washed() {
    assert_eq!(
        lifecycle::permitted_targets(Role::Staff),
        [Status::Pending, Status::Washed]
    );
    for from in Status::ALL {
        for to in [Status::PickedUp, Status::Delivered] {
            assert_eq!(
                lifecycle::check_transition(Role::Staff, from, to),
                Err(Error::TargetNotPermitted {
                    role: Role::Staff,
                    to
                }),
            );
        }
    }
}

#[test]
fn staff_moves_between_pending_and_washed() {
    assert!(lifecycle::can_transition(
        Role::Staff,
        Status::Pending,
        Status::Washed
    ));
    assert!(lifecycle::can_transition(
        Role::Staff,
        Status::Washed,
        Status::Pending
    ));
}

#[test]
fn staff_cannot_touch_collected_tickets() {
    assert_eq!(
        lifecycle::check_transition(
            Role::Staff,
            Status::PickedUp,
            Status::Pending
        ),
        Err(Error::SourceNotPermitted {
            role: Role::Staff,
            from: Status::PickedUp,
            to: Status::Pending,
        }),
    );
    assert!(!lifecycle::can_transition(
        Role::Staff,
        Status::Delivered,
        Status::Washed
    ));
}

#[test]
fn student_picks_up_only_from_washed() {
    for from in Status::ALL {
        let allowed = lifecycle::can_transition(
            Role::Student,
            from,
            Status::PickedUp,
        );
        assert_eq!(allowed, from == Status::Washed, "from {from}");
    }
}

#[test]
fn student_cannot_set_other_statuses() {
    for to in [Status::Pending, Status::Washed, Status::Delivered] {
        for from in Status::ALL {
            assert!(!lifecycle::can_transition(Role::Student, from, to));
        }
    }
}

#[test]
fn nothing_reaches_delivered() {
    for role in [Role::Student, Role::Staff] {
        for from in Status::ALL {
            assert!(!lifecycle::can_transition(role, from, Status::Delivered));
        }
    }
}

#[test]
fn rejects_unchanged_status() {
    assert_eq!(
        lifecycle::check_transition(
            Role::Staff,
            Status::Washed,
            Status::Washed
        ),
        Err(Error::Unchanged {
            status: Status::Washed
        }),
    );
}

#[test]
fn offers_only_reachable_targets() {
    assert_eq!(
        lifecycle::offered_targets(Role::Staff, Status::Pending),
        [Status::Washed]
    );
    assert_eq!(
        lifecycle::offered_targets(Role::Staff, Status::Washed),
        [Status::Pending]
    );
    assert!(lifecycle::offered_targets(Role::Staff, Status::PickedUp)
        .is_empty());
    assert_eq!(
        lifecycle::offered_targets(Role::Student, Status::Washed),
        [Status::PickedUp]
    );
    assert!(lifecycle::offered_targets(Role::Student, Status::Pending)
        .is_empty());
}

#[test]
fn rejects_empty_ticket() {
    assert_eq!(
        lifecycle::check_new_ticket(&ItemCounts::default()),
        Err(Error::NoItems)
    );
}

#[test]
fn accepts_any_single_positive_count() {
    let singles = [
        ItemCounts {
            shirts: 1,
            ..ItemCounts::default()
        },
        ItemCounts {
            bottoms: 1,
            ..ItemCounts::default()
        },
        ItemCounts {
            towels: 1,
            ..ItemCounts::default()
        },
        ItemCounts {
            bedsheets: 1,
            ..ItemCounts::default()
        },
        ItemCounts {
            others: 1,
            ..ItemCounts::default()
        },
    ];
    for items in singles {
        assert_eq!(lifecycle::check_new_ticket(&items), Ok(()));
        assert_eq!(items.total(), 1);
    }
}

#[test]
fn total_is_sum_of_counts() {
    let items = ItemCounts {
        shirts: 3,
        bottoms: 4,
        towels: 1,
        bedsheets: 2,
        others: 5,
    };
    assert_eq!(items.total(), 15);
}

#[test]
fn blank_issue_clears() {
    assert_eq!(lifecycle::normalize_issue("  "), None);
    assert_eq!(lifecycle::normalize_issue(""), None);
    assert_eq!(
        lifecycle::normalize_issue("  missing sock \n"),
        Some("missing sock")
    );
}

#[test]
fn only_owning_student_deletes() {
    assert_eq!(lifecycle::check_delete(Role::Student, true), Ok(()));
    assert_eq!(
        lifecycle::check_delete(Role::Student, false),
        Err(Error::DeleteNotPermitted)
    );
    assert_eq!(
        lifecycle::check_delete(Role::Staff, true),
        Err(Error::DeleteNotPermitted)
    );
}
