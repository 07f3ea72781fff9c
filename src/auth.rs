//! Registration and login against the backend's `auth` endpoints.

use constcat::concat;
use derive_more::derive::{Display, Error, From};
use reqwest::Method;

use crate::{
    api::user::{
        Credentials, LoginResponse, Role, StaffRegistration,
        StudentRegistration,
    },
    config,
    session::Session,
    store::{self, http::Endpoint},
};

const AUTH: &str = "auth";
const STUDENT_REGISTER: &str = concat!(AUTH, "/student/register");
const STUDENT_LOGIN: &str = concat!(AUTH, "/student/login");
const STAFF_REGISTER: &str = concat!(AUTH, "/staff/register");
const STAFF_LOGIN: &str = concat!(AUTH, "/staff/login");

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("Passwords do not match")]
    PasswordMismatch,

    #[display("Please use your university email ({domain})")]
    EmailDomain { domain: String },

    #[display("login response carries no token")]
    MissingToken,

    #[display("{_0}")]
    #[from]
    Store(store::Error),
}

pub struct Client {
    endpoint: Endpoint,
    email_domain: String,
}

impl Client {
    pub fn new(
        api: &config::Api,
        registration: &config::Registration,
    ) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Endpoint::new(api)?,
            email_domain: registration.email_domain.clone(),
        })
    }

    /// Checks the form locally, then registers the student.
    pub async fn register_student(
        &self,
        registration: &StudentRegistration,
        password_confirmation: &str,
    ) -> Result<(), Error> {
        check_passwords(&registration.password, password_confirmation)?;
        if !registration.email.ends_with(&self.email_domain) {
            return Err(Error::EmailDomain {
                domain: self.email_domain.clone(),
            });
        }

        let req = self
            .endpoint
            .request(Method::POST, STUDENT_REGISTER)?
            .json(registration);
        Endpoint::send(req).await?;
        tracing::info!(email = %registration.email, "student registered");
        Ok(())
    }

    pub async fn register_staff(
        &self,
        registration: &StaffRegistration,
        password_confirmation: &str,
    ) -> Result<(), Error> {
        check_passwords(&registration.password, password_confirmation)?;

        let req = self
            .endpoint
            .request(Method::POST, STAFF_REGISTER)?
            .json(registration);
        Endpoint::send(req).await?;
        tracing::info!(email = %registration.email, "staff registered");
        Ok(())
    }

    pub async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
    ) -> Result<Session, Error> {
        let path = match role {
            Role::Student => STUDENT_LOGIN,
            Role::Staff => STAFF_LOGIN,
        };
        let req = self
            .endpoint
            .request(Method::POST, path)?
            .json(credentials);
        let LoginResponse { token } = Endpoint::json(req).await?;
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingToken)?;

        tracing::info!(%role, "logged in");
        Ok(Session::new(token, role))
    }
}

fn check_passwords(password: &str, confirmation: &str) -> Result<(), Error> {
    if password != confirmation {
        return Err(Error::PasswordMismatch);
    }
    Ok(())
}
