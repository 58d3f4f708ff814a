//! [PayByPhone] [`Parking`] provider implementation.
//!
//! [PayByPhone]: https://www.paybyphone.com
//! [`Parking`]: crate::infra::Parking

mod impls;

use std::time::Duration;

use derive_more::{Display, Error as StdError, From};
use reqwest::{header, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;
use tokio::sync::OnceCell;
use tracerr::Traced;
use tracing as log;

use crate::{domain::account, infra::parking};

/// [`PayByPhone`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Root URL of the authentication API.
    #[default("https://auth.paybyphoneapis.com".to_owned())]
    pub auth_root: String,

    /// Root URL of the consumer API.
    #[default("https://consumer.paybyphoneapis.com".to_owned())]
    pub api_root: String,

    /// Timeout of the authentication request.
    #[default(Duration::from_secs(2))]
    pub auth_timeout: Duration,

    /// Timeout of a single consumer API request.
    #[default(Duration::from_secs(5))]
    pub request_timeout: Duration,
}

/// Credentials of a [`PayByPhone`] user.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Login of the user, usually a phone number.
    pub username: String,

    /// Password of the user.
    pub password: SecretString,
}

/// Authenticated [PayByPhone] API client.
///
/// [PayByPhone]: https://www.paybyphone.com
#[derive(Debug)]
pub struct PayByPhone {
    /// Underlying HTTP client.
    http: reqwest::Client,

    /// [`Config`] of this client.
    config: Config,

    /// Bearer token obtained on login.
    token: SecretString,

    /// ID of the user's parking account, resolved on first use.
    account_id: OnceCell<account::Id>,
}

impl PayByPhone {
    /// Client identifier the web application authenticates with.
    const CLIENT_ID: &'static str = "paybyphone_web";

    /// Value of the `X-Pbp-ClientType` header on authentication.
    const CLIENT_TYPE: &'static str = "WebApp";

    /// Value of the `Accept` header on API requests.
    const ACCEPT: &'static str = "application/json, text/plain, */*";

    /// Value of the `Accept-Language` header on API requests.
    const ACCEPT_LANGUAGE: &'static str =
        "fr-FR,fr;q=0.8,en-US;q=0.5,en;q=0.3";

    /// Logs in with the provided [`Credentials`] and creates a new
    /// [`PayByPhone`] client.
    ///
    /// # Errors
    ///
    /// If the authentication request fails, is rejected, or its response
    /// carries no access token.
    pub async fn login(
        config: Config,
        credentials: &Credentials,
    ) -> Result<Self, Traced<parking::Error>> {
        #[derive(Deserialize)]
        struct Token {
            access_token: String,
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let url = format!("{}/token", config.auth_root.trim_end_matches('/'));
        log::debug!("authenticating `{}` at `{url}`", credentials.username);

        let Token { access_token } = http
            .post(url)
            .header("X-Pbp-ClientType", Self::CLIENT_TYPE)
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.expose_secret()),
                ("client_id", Self::CLIENT_ID),
            ])
            .timeout(config.auth_timeout)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?
            .json::<Token>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self {
            http,
            config,
            token: SecretString::from(access_token),
            account_id: OnceCell::new(),
        })
    }

    /// Forgets the memoized [`account::Id`], so the next operation needing it
    /// resolves it again.
    pub fn forget_account_id(&mut self) {
        drop(self.account_id.take());
    }

    /// Prepares an authenticated request to the `path` relative to the API
    /// root.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.config.api_root.trim_end_matches('/'),
            path.trim_start_matches('/'),
        );
        self.http
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
            .header(header::ACCEPT, Self::ACCEPT)
            .header(header::ACCEPT_LANGUAGE, Self::ACCEPT_LANGUAGE)
            .timeout(self.config.request_timeout)
    }

    /// Sends the provided request, failing on any non-success status.
    async fn send(request: RequestBuilder) -> Result<Response, Traced<Error>> {
        let response = request
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        log::debug!(
            "`{}` responded with `{}`",
            response.url().path(),
            response.status(),
        );
        response
            .error_for_status()
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// [`PayByPhone`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed or was rejected.
    #[display("HTTP request failed: {_0}")]
    #[from]
    Http(reqwest::Error),

    /// User has no parking account.
    #[display("No parking account found")]
    NoAccounts,

    /// Session creation response points to no workflow.
    #[display("Session creation response has no `Location` header")]
    MissingWorkflowLocation,
}
