//! Per-role dashboard: the fetched ticket list, the current selection, a
//! loading flag and a transient banner.
//!
//! Local state only changes from what the store returns. Every accepted
//! mutation is followed by a re-fetch of the authoritative list.

use std::time::Duration;

use derive_more::derive::{Display, Error, From};
use tokio::time::Instant;

use crate::{
    api::{
        ticket::{Id, ItemCounts, Status},
        user::Role,
        Ticket,
    },
    config, lifecycle,
    store::{self, RemoteStore},
    view::{self, Selection, Summary},
};

/// Asks the user to approve a destructive or irreversible step.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Done,
    Declined,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    shown_at: Instant,
}

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("{_0}")]
    #[from]
    Invalid(lifecycle::Error),

    #[display("ticket #{id} is not on this dashboard")]
    UnknownTicket { id: Id },

    #[display("only staff can set a status directly")]
    StaffOnly,

    #[display("{message}")]
    Remote {
        message: String,
        source: store::Error,
    },
}

pub struct Dashboard<S> {
    store: S,
    role: Role,
    tickets: Vec<Ticket>,
    pub selection: Selection,
    loading: bool,
    banner: Option<Banner>,
    banner_ttl: Duration,
}

impl<S: RemoteStore> Dashboard<S> {
    pub fn new(store: S, role: Role, config: &config::Dashboard) -> Self {
        Self {
            store,
            role,
            tickets: Vec::new(),
            selection: Selection::default(),
            loading: false,
            banner: None,
            banner_ttl: config.banner_ttl,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Every ticket of this dashboard, unfiltered.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: Id) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Tickets to display under the current selection.
    pub fn view(&self) -> Vec<&Ticket> {
        view::derive(&self.tickets, &self.selection)
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.tickets)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current banner, unless it has expired.
    pub fn banner(&self) -> Option<&Banner> {
        self.banner
            .as_ref()
            .filter(|b| b.shown_at.elapsed() < self.banner_ttl)
    }

    /// Status options to present for ticket `id`.
    pub fn offered_targets(&self, id: Id) -> Vec<Status> {
        self.ticket(id)
            .map(|t| lifecycle::offered_targets(self.role, t.status))
            .unwrap_or_default()
    }

    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.loading = true;
        let res = match self.role {
            Role::Student => self.store.fetch_own_tickets().await,
            Role::Staff => self.store.fetch_all_tickets().await,
        };
        self.loading = false;

        match res {
            Ok(tickets) => {
                tracing::debug!(count = tickets.len(), "tickets fetched");
                self.tickets = tickets;
                Ok(())
            }
            Err(e) => Err(self.remote_failure(
                "Failed to fetch laundry items",
                e,
                false,
            )),
        }
    }

    pub async fn create(&mut self, items: ItemCounts) -> Result<(), Error> {
        self.validate(lifecycle::check_new_ticket(&items))?;

        self.loading = true;
        let res = self.store.create_ticket(items).await;
        self.loading = false;

        let ticket = res.map_err(|e| {
            self.remote_failure("Failed to create laundry ticket", e, true)
        })?;
        tracing::info!(
            id = %ticket.id,
            total = ticket.total_items(),
            "ticket created"
        );
        self.accepted("Laundry ticket created successfully!").await;
        Ok(())
    }

    /// Staff control: move ticket `id` to `to`.
    pub async fn set_status(
        &mut self,
        id: Id,
        to: Status,
    ) -> Result<(), Error> {
        if self.role != Role::Staff {
            return Err(self.invalid(Error::StaffOnly));
        }
        let from = self.find(id)?.status;
        self.validate(lifecycle::check_transition(self.role, from, to))?;

        self.update_status(id, to, "Status updated successfully!").await
    }

    /// Student control: confirm that washed ticket `id` was collected.
    pub async fn confirm_pickup(
        &mut self,
        id: Id,
        confirm: &mut impl Confirm,
    ) -> Result<Outcome, Error> {
        let ticket = self.find(id)?;
        let (from, bag) = (ticket.status, ticket.bag_number.clone());
        self.validate(lifecycle::check_transition(
            self.role,
            from,
            Status::PickedUp,
        ))?;

        let prompt =
            format!("Are you sure you want to mark Bag #{bag} as picked up?");
        if !confirm.confirm(&prompt) {
            return Ok(Outcome::Declined);
        }

        self.update_status(
            id,
            Status::PickedUp,
            "Successfully marked as picked up!",
        )
        .await
        .map(|()| Outcome::Done)
    }

    /// Attaches, replaces or (with blank `text`) clears the issue of `id`.
    pub async fn set_issue(&mut self, id: Id, text: &str) -> Result<(), Error> {
        self.find(id)?;
        let issue = lifecycle::normalize_issue(text);

        self.loading = true;
        let res = self.store.set_issue(id, issue.unwrap_or_default()).await;
        self.loading = false;

        res.map_err(|e| {
            self.remote_failure("Failed to update issue", e, true)
        })?;
        tracing::info!(%id, cleared = issue.is_none(), "issue updated");
        self.accepted(if issue.is_some() {
            "Issue reported successfully!"
        } else {
            "Issue cleared."
        })
        .await;
        Ok(())
    }

    pub async fn delete(
        &mut self,
        id: Id,
        confirm: &mut impl Confirm,
    ) -> Result<Outcome, Error> {
        // A student's dashboard only ever holds that student's tickets.
        let owned = self.ticket(id).is_some();
        self.validate(lifecycle::check_delete(self.role, owned))?;

        let prompt = format!(
            "Are you sure you want to delete ticket #{id}? \
             This cannot be undone."
        );
        if !confirm.confirm(&prompt) {
            return Ok(Outcome::Declined);
        }

        self.loading = true;
        let res = self.store.delete_ticket(id).await;
        self.loading = false;

        res.map_err(|e| {
            self.remote_failure("Failed to delete ticket", e, true)
        })?;
        tracing::info!(%id, "ticket deleted");
        self.accepted("Laundry ticket deleted.").await;
        Ok(Outcome::Done)
    }

    async fn update_status(
        &mut self,
        id: Id,
        to: Status,
        success: &str,
    ) -> Result<(), Error> {
        self.loading = true;
        let res = self.store.set_status(id, to).await;
        self.loading = false;

        res.map_err(|e| {
            self.remote_failure("Failed to update status", e, true)
        })?;
        tracing::info!(%id, status = %to, "status updated");
        self.accepted(success).await;
        Ok(())
    }

    fn find(&mut self, id: Id) -> Result<&Ticket, Error> {
        if self.ticket(id).is_none() {
            return Err(self.invalid(Error::UnknownTicket { id }));
        }
        self.ticket(id).ok_or(Error::UnknownTicket { id })
    }

    fn validate(
        &mut self,
        res: Result<(), lifecycle::Error>,
    ) -> Result<(), Error> {
        res.map_err(|e| self.invalid(e.into()))
    }

    fn invalid(&mut self, e: Error) -> Error {
        tracing::debug!(error = %e, "rejected locally");
        self.show(BannerKind::Error, e.to_string());
        e
    }

    fn remote_failure(
        &mut self,
        fallback: &str,
        source: store::Error,
        verbatim: bool,
    ) -> Error {
        tracing::warn!(error = %source, "{fallback}");
        let message = source
            .message()
            .filter(|_| verbatim)
            .unwrap_or(fallback)
            .to_owned();
        self.show(BannerKind::Error, message.clone());
        Error::Remote { message, source }
    }

    /// The mutation already went through, so a failed re-fetch only leaves
    /// the list stale and does not replace the success banner.
    async fn accepted(&mut self, message: &str) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "change accepted, ticket list is stale");
        }
        self.show(BannerKind::Success, message.to_owned());
    }

    fn show(&mut self, kind: BannerKind, text: String) {
        self.banner = Some(Banner {
            kind,
            text,
            shown_at: Instant::now(),
        });
    }
}
