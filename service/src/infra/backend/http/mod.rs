//! [`Http`] [`Backend`] implementation.

mod dto;

use std::time::Duration;

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError};
use reqwest::{header, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        contract::{self, Contract},
        employee, position, Document, Session,
    },
    infra::backend::{self, Authorized, Backend},
};

/// [`Http`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the REST API.
    #[default("http://localhost:8080/api")]
    pub url: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(30))]
    pub timeout: Duration,
}

/// [`Backend`] talking to a REST API over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL all the endpoints are resolved against.
    base_url: Url,
}

impl Http {
    /// Creates a new [`Http`] [`Backend`] with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::url`] is invalid or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, Traced<backend::Error>> {
        let mut url = config.url.clone();
        if !url.ends_with('/') {
            url.push('/');
        }
        let base_url = Url::parse(&url).map_err(|e| {
            tracerr::new!(backend::Error::from(Error::InvalidUrl(e.to_string())))
        })?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| tracerr::new!(backend::Error::from(Error::Request(e))))?;
        Ok(Self { client, base_url })
    }

    /// Starts a request to the provided `path` on behalf of the provided
    /// [`Session`].
    fn request(
        &self,
        method: Method,
        path: &str,
        session: &Session,
    ) -> Result<RequestBuilder, Traced<backend::Error>> {
        let url = self.base_url.join(path).map_err(|e| {
            tracerr::new!(backend::Error::from(Error::InvalidUrl(e.to_string())))
        })?;
        log::debug!("{method} {url}");
        let req = self.client.request(method, url);
        Ok(match session.token() {
            Some(token) => req.bearer_auth(token.expose()),
            None => req,
        })
    }

    /// Sends the provided request, turning unsuccessful responses into a
    /// [`backend::Rejection`].
    async fn send(
        req: RequestBuilder,
    ) -> Result<Response, Traced<backend::Error>> {
        let resp = req
            .send()
            .await
            .map_err(|e| tracerr::new!(backend::Error::from(Error::Request(e))))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(tracerr::new!(backend::Error::Rejected(dto::rejection(
            status.as_u16(),
            &body,
        ))))
    }

    /// Reads the enveloped payload of the provided [`Response`].
    async fn data<T: DeserializeOwned>(
        resp: Response,
    ) -> Result<T, Traced<backend::Error>> {
        resp.json::<dto::Envelope<T>>()
            .await
            .map(|env| env.data)
            .map_err(|e| tracerr::new!(backend::Error::from(Error::Request(e))))
    }
}

impl Backend<Authorized<Select<By<Vec<Contract>, employee::Id>>>> for Http {
    type Ok = Vec<Contract>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Select(by) }: Authorized<
            Select<By<Vec<Contract>, employee::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();
        let req = self.request(
            Method::GET,
            &format!("contracts/employee/{employee_id}"),
            &session,
        )?;
        let rows = Self::data(Self::send(req).await?).await?;
        Ok(dto::flatten(rows))
    }
}

impl Backend<Authorized<Select<By<position::Catalog, position::Active>>>>
    for Http
{
    type Ok = position::Catalog;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, .. }: Authorized<
            Select<By<position::Catalog, position::Active>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::GET, "positions/findActive", &session)?;
        let rows: Vec<dto::Position> =
            Self::data(Self::send(req).await?).await?;
        Ok(rows.into_iter().filter_map(dto::Position::into_domain).collect())
    }
}

impl Backend<Authorized<Insert<contract::New>>> for Http {
    type Ok = Contract;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Insert(new) }: Authorized<
            Insert<contract::New>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let parent_id = new.parent_id;
        let req = self
            .request(Method::POST, "contracts", &session)?
            .json(&dto::Contract::from_new(new));
        let created: dto::Contract = Self::data(Self::send(req).await?).await?;
        created
            .into_domain(parent_id)
            .map_err(|e| tracerr::new!(backend::Error::from(e)))
    }
}

impl Backend<Authorized<Update<contract::Revision>>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Update(revision) }: Authorized<
            Update<contract::Revision>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::PUT, "contracts", &session)?
            .json(&dto::Contract::from_revision(revision));
        _ = Self::send(req).await?;
        Ok(())
    }
}

impl Backend<Authorized<Delete<By<Contract, contract::Id>>>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Delete(by) }: Authorized<
            Delete<By<Contract, contract::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self.request(
            Method::DELETE,
            &format!("contracts/{id}"),
            &session,
        )?;
        _ = Self::send(req).await?;
        Ok(())
    }
}

impl Backend<Authorized<Select<By<Document, contract::Id>>>> for Http {
    type Ok = Document;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Authorized { session, op: Select(by) }: Authorized<
            Select<By<Document, contract::Id>>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let req = self.request(
            Method::GET,
            &format!("contracts/generate/{id}"),
            &session,
        )?;
        let resp = Self::send(req).await?;
        let file_name = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|h| h.to_str().ok())
            .and_then(file_name);
        let content = resp
            .bytes()
            .await
            .map_err(|e| tracerr::new!(backend::Error::from(Error::Request(e))))?;
        Ok(Document {
            file_name,
            content: content.to_vec(),
        })
    }
}

/// Extracts a file name out of a `Content-Disposition` header value.
fn file_name(disposition: &str) -> Option<String> {
    let (_, rest) = disposition.split_once("filename=")?;
    let name = rest.split(';').next()?.trim().trim_matches('"').trim();
    (!name.is_empty()).then(|| name.to_owned())
}

/// [`Http`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// [`Config::url`] or an endpoint URL is invalid.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),

    /// Performing an HTTP request failed.
    #[display("HTTP request failed: {_0}")]
    Request(reqwest::Error),

    /// Backend responded with a [`Contract`] missing the named field.
    #[display("`Contract` without `{_0}` received")]
    IncompleteContract(#[error(not(source))] &'static str),
}
