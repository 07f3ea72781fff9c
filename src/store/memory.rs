//! In-process [`RemoteStore`] that enforces the same ownership and lifecycle
//! rules as the backend. Backs the dashboard in tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use time::OffsetDateTime;

use crate::{
    api::{
        ticket::{Id, ItemCounts, Status},
        user::{self, Role, StudentDetails},
        Student, Ticket,
    },
    lifecycle,
};

use super::{Error, RemoteStore};

#[derive(Default)]
struct Tickets {
    next_id: u64,
    by_id: BTreeMap<Id, Ticket>,
}

/// Shared ticket table. Hand out [`Handle`]s to act as a given user.
#[derive(Clone, Default)]
pub struct Store(Arc<Mutex<Tickets>>);

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student(&self, id: user::Id, details: StudentDetails) -> Handle {
        Handle {
            store: self.clone(),
            actor: Actor::Student(Student {
                id,
                details: Some(details),
            }),
        }
    }

    pub fn staff(&self) -> Handle {
        Handle {
            store: self.clone(),
            actor: Actor::Staff,
        }
    }

    /// Inserts `ticket` as is, bypassing every check.
    pub fn insert(&self, ticket: Ticket) {
        let mut tickets = self.lock();
        let id = ticket.id.as_u64();
        tickets.next_id = tickets.next_id.max(id);
        tickets.by_id.insert(ticket.id, ticket);
    }

    pub fn get(&self, id: Id) -> Option<Ticket> {
        self.lock().by_id.get(&id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Tickets> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone)]
enum Actor {
    Student(Student),
    Staff,
}

#[derive(Clone)]
pub struct Handle {
    store: Store,
    actor: Actor,
}

impl Handle {
    fn role(&self) -> Role {
        match self.actor {
            Actor::Student(_) => Role::Student,
            Actor::Staff => Role::Staff,
        }
    }

    fn student(&self) -> Result<&Student, Error> {
        match &self.actor {
            Actor::Student(student) => Ok(student),
            Actor::Staff => {
                Err(Error::rejected(StatusCode::FORBIDDEN, "Students only"))
            }
        }
    }

    /// Applies `f` to a ticket visible to this handle.
    fn modify(
        &self,
        id: Id,
        f: impl FnOnce(&mut Ticket) -> Result<(), Error>,
    ) -> Result<Ticket, Error> {
        let mut tickets = self.store.lock();
        let ticket = tickets
            .by_id
            .get_mut(&id)
            .filter(|t| self.can_see(t))
            .ok_or_else(not_found)?;
        f(ticket)?;
        Ok(ticket.clone())
    }

    fn can_see(&self, ticket: &Ticket) -> bool {
        match &self.actor {
            Actor::Student(student) => ticket.student.id == student.id,
            Actor::Staff => true,
        }
    }
}

fn not_found() -> Error {
    Error::rejected(StatusCode::NOT_FOUND, "Laundry ticket not found")
}

fn bad_request(e: lifecycle::Error) -> Error {
    Error::rejected(StatusCode::BAD_REQUEST, e.to_string())
}

#[async_trait]
impl RemoteStore for Handle {
    async fn fetch_own_tickets(&self) -> Result<Vec<Ticket>, Error> {
        let me = self.student()?;
        Ok(self
            .store
            .lock()
            .by_id
            .values()
            .filter(|t| t.student.id == me.id)
            .cloned()
            .collect())
    }

    async fn fetch_all_tickets(&self) -> Result<Vec<Ticket>, Error> {
        if self.role() != Role::Staff {
            return Err(Error::rejected(StatusCode::FORBIDDEN, "Staff only"));
        }
        Ok(self.store.lock().by_id.values().cloned().collect())
    }

    async fn create_ticket(&self, items: ItemCounts) -> Result<Ticket, Error> {
        let me = self.student()?;
        lifecycle::check_new_ticket(&items).map_err(bad_request)?;

        let mut tickets = self.store.lock();
        tickets.next_id += 1;
        let id = Id::from(tickets.next_id);
        let ticket = Ticket {
            id,
            bag_number: me
                .details
                .as_ref()
                .and_then(|d| d.bag_number.clone())
                .unwrap_or_else(|| me.id.to_string()),
            status: Status::Pending,
            items,
            pickup_date: OffsetDateTime::now_utc(),
            delivery_date: None,
            issue: None,
            student: me.clone(),
        };
        tickets.by_id.insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn set_status(
        &self,
        id: Id,
        status: Status,
    ) -> Result<Ticket, Error> {
        let role = self.role();
        self.modify(id, |ticket| {
            lifecycle::check_transition(role, ticket.status, status)
                .map_err(bad_request)?;
            ticket.status = status;
            Ok(())
        })
    }

    async fn set_issue(&self, id: Id, issue: &str) -> Result<Ticket, Error> {
        let issue = lifecycle::normalize_issue(issue).map(str::to_owned);
        self.modify(id, |ticket| {
            ticket.issue = issue;
            Ok(())
        })
    }

    async fn delete_ticket(&self, id: Id) -> Result<(), Error> {
        let me = self.student()?;
        let mut tickets = self.store.lock();
        let owned = tickets
            .by_id
            .get(&id)
            .is_some_and(|t| t.student.id == me.id);
        if !owned {
            return Err(not_found());
        }
        tickets.by_id.remove(&id);
        Ok(())
    }
}
