use std::time::Duration;

use axum::Router;
use laundry_link::{
    api::{
        ticket::{Id, ItemCounts, Status},
        user::{self, Gender, StudentDetails},
        Student, Ticket,
    },
    config,
};
use time::{macros::datetime, OffsetDateTime};
use tokio::net::TcpListener;
use url::Url;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;

pub fn details(name: &str, bag_number: &str) -> StudentDetails {
    StudentDetails {
        name: name.into(),
        email: format!("{}@rishihood.edu.in", name.to_lowercase()),
        gender: Some(Gender::Female),
        bag_number: Some(bag_number.into()),
    }
}

pub fn alice() -> StudentDetails {
    details("Alice", "A-17")
}

pub fn bob() -> StudentDetails {
    details("Bob", "B-42")
}

/// Pickup time `day` days after a fixed origin.
pub fn day(day: i64) -> OffsetDateTime {
    datetime!(2024-03-01 09:30 UTC) + time::Duration::days(day)
}

pub fn ticket(
    id: u64,
    owner: u64,
    bag_number: &str,
    status: Status,
    pickup_date: OffsetDateTime,
) -> Ticket {
    Ticket {
        id: Id::from(id),
        bag_number: bag_number.into(),
        status,
        items: ItemCounts {
            shirts: 2,
            towels: 1,
            ..ItemCounts::default()
        },
        pickup_date,
        delivery_date: None,
        issue: None,
        student: Student {
            id: user::Id::from(owner),
            details: None,
        },
    }
}

pub fn dashboard_config() -> config::Dashboard {
    config::Dashboard::default()
}

/// Serves `app` on an ephemeral port and returns its `/api/` base URL.
pub async fn serve(app: Router) -> config::Api {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    config::Api {
        base_url: Url::parse(&format!("http://{addr}/api/"))
            .expect("invalid url"),
        timeout: Duration::from_secs(5),
    }
}
