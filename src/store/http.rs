use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    api::{
        self,
        ticket::{Id, IssueUpdate, ItemCounts, Status, StatusUpdate},
        user::Role,
        Ticket,
    },
    config,
    session::Session,
};

use super::{Error, RemoteStore};

const STUDENT_LAUNDRY: &str = "students/laundry";
const STAFF_LAUNDRY: &str = "laundry";

/// Base URL plus a configured HTTP client.
#[derive(Clone, Debug)]
pub(crate) struct Endpoint {
    http: reqwest::Client,
    base_url: Url,
}

impl Endpoint {
    pub(crate) fn new(config: &config::Api) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, Error> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%method, %url, "sending request");
        Ok(self.http.request(method, url))
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        req: RequestBuilder,
    ) -> Result<T, Error> {
        Ok(Self::send(req).await?.json::<T>().await?)
    }

    pub(crate) async fn send(req: RequestBuilder) -> Result<Response, Error> {
        let res = req.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = res
            .json::<api::ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        tracing::warn!(%status, ?message, "request rejected");
        Err(Error::Rejected { status, message })
    }
}

/// [`RemoteStore`] speaking to the laundry backend over HTTP.
#[derive(Clone, Debug)]
pub struct Client {
    endpoint: Endpoint,
    session: Session,
}

impl Client {
    pub fn new(config: &config::Api, session: Session) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new(config)?,
            session,
        })
    }

    fn laundry(&self) -> &'static str {
        match self.session.role {
            Role::Student => STUDENT_LAUNDRY,
            Role::Staff => STAFF_LAUNDRY,
        }
    }

    fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, Error> {
        Ok(self
            .endpoint
            .request(method, path)?
            .bearer_auth(&self.session.token))
    }
}

#[async_trait]
impl RemoteStore for Client {
    async fn fetch_own_tickets(&self) -> Result<Vec<Ticket>, Error> {
        Endpoint::json(self.request(Method::GET, STUDENT_LAUNDRY)?).await
    }

    async fn fetch_all_tickets(&self) -> Result<Vec<Ticket>, Error> {
        Endpoint::json(self.request(Method::GET, STAFF_LAUNDRY)?).await
    }

    async fn create_ticket(&self, items: ItemCounts) -> Result<Ticket, Error> {
        let req = self.request(Method::POST, STUDENT_LAUNDRY)?.json(&items);
        Endpoint::json(req).await
    }

    async fn set_status(
        &self,
        id: Id,
        status: Status,
    ) -> Result<Ticket, Error> {
        let path = format!("{}/{id}", self.laundry());
        let req = self
            .request(Method::PATCH, &path)?
            .json(&StatusUpdate { status });
        Endpoint::json(req).await
    }

    async fn set_issue(&self, id: Id, issue: &str) -> Result<Ticket, Error> {
        let path = format!("{}/{id}/issue", self.laundry());
        let req = self.request(Method::PATCH, &path)?.json(&IssueUpdate {
            issue: issue.to_owned(),
        });
        Endpoint::json(req).await
    }

    async fn delete_ticket(&self, id: Id) -> Result<(), Error> {
        let path = format!("{STUDENT_LAUNDRY}/{id}");
        Endpoint::send(self.request(Method::DELETE, &path)?)
            .await
            .map(drop)
    }
}
