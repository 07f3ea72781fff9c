use laundry_link::api::{
    ticket::{Id, Status},
    user::{self, Gender},
    Ticket,
};
use serde_json::json;
use time::macros::datetime;

#[test]
fn decodes_backend_ticket() {
    let ticket = serde_json::from_value::<Ticket>(json!({
        "id": 7,
        "bagNumber": "A-17",
        "pickupDate": "2024-03-04T10:15:00.000Z",
        "deliveryDate": null,
        "status": "PICKED_UP",
        "shirts": 3,
        "bottoms": 0,
        "towels": 0,
        "bedsheets": 0,
        "others": 2,
        "totalItems": 5,
        "issue": null,
        "studentId": 1,
        "student": {
            "name": "Alice",
            "email": "alice@rishihood.edu.in",
            "gender": "FEMALE",
            "bagNumber": "A-17"
        }
    }))
    .unwrap();

    assert_eq!(ticket.id, Id::from(7));
    assert_eq!(ticket.status, Status::PickedUp);
    assert_eq!(ticket.total_items(), 5);
    assert_eq!(ticket.pickup_date, datetime!(2024-03-04 10:15 UTC));
    assert_eq!(ticket.delivery_date, None);
    assert_eq!(ticket.issue, None);
    assert_eq!(ticket.student.id, user::Id::from(1));
    assert_eq!(ticket.student.name(), Some("Alice"));
    assert_eq!(
        ticket.student.details.as_ref().and_then(|d| d.gender),
        Some(Gender::Female)
    );
}

#[test]
fn normalizes_capitalized_student_key() {
    let ticket = serde_json::from_value::<Ticket>(json!({
        "id": 3,
        "bagNumber": "B-42",
        "pickupDate": "2024-03-04T10:15:00Z",
        "status": "WASHED",
        "shirts": 1,
        "bottoms": 1,
        "towels": 0,
        "bedsheets": 0,
        "others": 0,
        "totalItems": 2,
        "studentId": 2,
        "Student": {
            "name": "Bob",
            "email": "bob@rishihood.edu.in",
            "gender": "MALE",
            "bagNumber": "B-42"
        }
    }))
    .unwrap();

    assert_eq!(ticket.student.id, user::Id::from(2));
    assert_eq!(ticket.student.name(), Some("Bob"));

    let encoded = serde_json::to_value(&ticket).unwrap();
    assert_eq!(encoded["student"]["name"], "Bob");
    assert!(encoded.get("Student").is_none());
    assert_eq!(encoded["totalItems"], 2);
}

#[test]
fn missing_student_details_are_tolerated() {
    let ticket = serde_json::from_value::<Ticket>(json!({
        "id": 3,
        "bagNumber": "B-42",
        "pickupDate": "2024-03-04T10:15:00Z",
        "status": "PENDING",
        "shirts": 1,
        "studentId": 2
    }))
    .unwrap();

    assert_eq!(ticket.student.details, None);
    assert_eq!(ticket.total_items(), 1);
}

#[test]
fn numeric_bag_number_decodes_as_text() {
    let ticket = serde_json::from_value::<Ticket>(json!({
        "id": 4,
        "bagNumber": 42,
        "pickupDate": "2024-03-04T10:15:00Z",
        "status": "PENDING",
        "shirts": 1,
        "studentId": 2,
        "Student": {
            "name": "Bob",
            "email": "bob@rishihood.edu.in",
            "gender": "MALE",
            "bagNumber": 42
        }
    }))
    .unwrap();

    assert_eq!(ticket.bag_number, "42");
    assert_eq!(
        ticket
            .student
            .details
            .and_then(|d| d.bag_number)
            .as_deref(),
        Some("42")
    );
}

#[test]
fn rejects_inconsistent_total() {
    let err = serde_json::from_value::<Ticket>(json!({
        "id": 3,
        "bagNumber": "B-42",
        "pickupDate": "2024-03-04T10:15:00Z",
        "status": "PENDING",
        "shirts": 1,
        "bottoms": 1,
        "totalItems": 3,
        "studentId": 2
    }))
    .unwrap_err();

    assert!(err.to_string().contains("totalItems"), "{err}");
}

#[test]
fn rejects_unknown_status() {
    let res = serde_json::from_value::<Ticket>(json!({
        "id": 3,
        "bagNumber": "B-42",
        "pickupDate": "2024-03-04T10:15:00Z",
        "status": "LOST",
        "shirts": 1,
        "studentId": 2
    }));

    assert!(res.is_err());
}

#[test]
fn blank_issue_decodes_as_none() {
    let ticket = serde_json::from_value::<Ticket>(json!({
        "id": 3,
        "bagNumber": "B-42",
        "pickupDate": "2024-03-04T10:15:00Z",
        "status": "PENDING",
        "shirts": 1,
        "issue": "",
        "studentId": 2
    }))
    .unwrap();

    assert_eq!(ticket.issue, None);
}

#[test]
fn parses_status_names() {
    assert_eq!("washed".parse::<Status>().ok(), Some(Status::Washed));
    assert_eq!("picked up".parse::<Status>().ok(), Some(Status::PickedUp));
    assert_eq!("PICKED_UP".parse::<Status>().ok(), Some(Status::PickedUp));
    assert!("lost".parse::<Status>().is_err());
    assert_eq!(Status::PickedUp.label(), "PICKED UP");
}
