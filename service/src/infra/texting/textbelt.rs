//! [Textbelt] [`Texting`] provider implementation.
//!
//! [Textbelt]: https://textbelt.com
//! [`Texting`]: crate::infra::Texting

use std::time::Duration;

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use reqwest::Response;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::text,
    infra::{texting, Texting},
};

/// [`Textbelt`] client configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Root URL of the API.
    #[default("https://textbelt.com".to_owned())]
    pub root: String,

    /// Key messages are sent with.
    ///
    /// `textbelt` is the shared free-tier key.
    #[default("textbelt".to_owned())]
    pub sending_key: String,

    /// Timeout of a single API request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// [Textbelt] API client.
///
/// [Textbelt]: https://textbelt.com
#[derive(Debug)]
pub struct Textbelt {
    /// Underlying HTTP client.
    http: reqwest::Client,

    /// [`Config`] of this client.
    config: Config,

    /// Caller's own API key, used for quota lookups.
    key: Option<SecretString>,
}

impl Textbelt {
    /// Creates a new [`Textbelt`] client.
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(
        config: Config,
        key: Option<SecretString>,
    ) -> Result<Self, Traced<texting::Error>> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self { http, config, key })
    }

    /// Returns the caller's API key, or a placeholder if there is none.
    fn key_hint(&self) -> String {
        self.key.as_ref().map_or_else(
            || "<none>".to_owned(),
            |k| k.expose_secret().to_owned(),
        )
    }

    /// Builds a URL of the provided `path` relative to the API root.
    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.root.trim_end_matches('/'))
    }

    /// Decodes the JSON body of the provided [`Response`].
    ///
    /// Textbelt reports failures inside the body, so the status code is not
    /// checked.
    async fn decode<T: DeserializeOwned>(
        response: Result<Response, reqwest::Error>,
    ) -> Result<T, Traced<Error>> {
        let response = response.map_err(tracerr::from_and_wrap!(=> Error))?;
        log::debug!(
            "`{}` responded with `{}`",
            response.url().path(),
            response.status(),
        );
        response
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Texting<Insert<text::Message>> for Textbelt {
    type Ok = text::Id;
    type Err = Traced<texting::Error>;

    async fn execute(
        &self,
        Insert(msg): Insert<text::Message>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Sent {
            success: bool,
            text_id: Option<text::Id>,
            error: Option<String>,
        }

        let text::Message { number, body } = msg;
        let response = self
            .http
            .post(self.url("text"))
            .form(&[
                ("phone", number.as_ref()),
                ("message", body.as_str()),
                ("key", self.config.sending_key.as_str()),
            ])
            .send()
            .await;
        let sent = Self::decode::<Sent>(response)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        match sent {
            Sent {
                success: true,
                text_id: Some(id),
                ..
            } => {
                log::debug!("text message `{id}` sent to `{number}`");
                Ok(id)
            }
            Sent { error, .. } => Err(tracerr::new!(Error::SendFailed {
                number,
                key: self.key_hint(),
                message: error
                    .unwrap_or_else(|| "no `textId` in response".to_owned()),
            }))
            .map_err(tracerr::map_from_and_wrap!()),
        }
    }
}

impl Texting<Select<By<text::Status, text::Id>>> for Textbelt {
    type Ok = text::Status;
    type Err = Traced<texting::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<text::Status, text::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        struct Status {
            status: text::Status,
        }

        let response = self
            .http
            .get(self.url(&format!("status/{}", by.into_inner())))
            .send()
            .await;
        Self::decode::<Status>(response)
            .await
            .map(|s| s.status)
            .map_err(tracerr::map_from_and_wrap!())
    }
}

impl Texting<Select<By<text::Quota, ()>>> for Textbelt {
    type Ok = text::Quota;
    type Err = Traced<texting::Error>;

    async fn execute(
        &self,
        _: Select<By<text::Quota, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Quota {
            success: bool,
            quota_remaining: Option<text::Quota>,
        }

        let key = self
            .key
            .as_ref()
            .ok_or(Error::MissingKey)
            .map_err(tracerr::from_and_wrap!(=> texting::Error))?;
        let response = self
            .http
            .get(self.url(&format!("quota/{}", key.expose_secret())))
            .send()
            .await;

        match Self::decode::<Quota>(response)
            .await
            .map_err(tracerr::map_from_and_wrap!())?
        {
            Quota {
                success: true,
                quota_remaining: Some(quota),
            } => Ok(quota),
            Quota { .. } => Err(tracerr::new!(Error::QuotaFailed {
                key: self.key_hint(),
            }))
            .map_err(tracerr::map_from_and_wrap!()),
        }
    }
}

/// [`Textbelt`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request failed or its response is malformed.
    #[display("HTTP request failed: {_0}")]
    #[from]
    Http(reqwest::Error),

    /// Provider refused to send a text message.
    #[display("Could not send SMS to `{number}` with API key `{key}`: {message}")]
    SendFailed {
        /// Number the message was sent to.
        number: text::Number,

        /// Caller's own API key, to look its quota up.
        key: String,

        /// Error reported by the provider.
        message: String,
    },

    /// Provider refused to report the remaining quota.
    #[display("Could not check Textbelt quota for API key `{key}`")]
    QuotaFailed {
        /// Caller's own API key.
        key: String,
    },

    /// Quota lookup requires the caller's own API key.
    #[display("No Textbelt API key configured")]
    MissingKey,
}

#[cfg(test)]
mod tests {
    use common::operations::{By, Insert, Select};
    use secrecy::SecretString;
    use wiremock::{
        matchers::{body_string_contains, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        domain::text,
        infra::{Textbelt, Texting as _},
    };

    use super::Config;

    fn client(server: &MockServer, key: Option<&str>) -> Textbelt {
        Textbelt::new(
            Config {
                root: server.uri(),
                ..Config::default()
            },
            key.map(|k| SecretString::from(k.to_owned())),
        )
        .unwrap()
    }

    fn message() -> text::Message {
        text::Message {
            number: "+33600000000".to_owned().into(),
            body: "Parking ticket booked".to_owned(),
        }
    }

    #[tokio::test]
    async fn sends_with_shared_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text"))
            .and(body_string_contains("phone=%2B33600000000"))
            .and(body_string_contains("key=textbelt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"success": true, "textId": "123"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let id = client(&server, Some("own-key"))
            .execute(Insert(message()))
            .await
            .unwrap();

        assert_eq!(id.as_ref(), "123");
    }

    #[tokio::test]
    async fn send_failure_embeds_number_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "success": false,
                    "error": "Out of quota",
                }),
            ))
            .mount(&server)
            .await;

        let err = client(&server, Some("own-key"))
            .execute(Insert(message()))
            .await
            .unwrap_err()
            .to_string();

        assert!(err.contains("+33600000000"), "got: {err}");
        assert!(err.contains("own-key"), "got: {err}");
        assert!(err.contains("Out of quota"), "got: {err}");
    }

    #[tokio::test]
    async fn reads_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status/123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "SENT"})),
            )
            .mount(&server)
            .await;

        let status = client(&server, None)
            .execute(Select(By::<text::Status, _>::new(text::Id::from(
                "123".to_owned(),
            ))))
            .await
            .unwrap();

        assert_eq!(status.as_ref(), "SENT");
        assert!(!status.is_delivered());
    }

    #[tokio::test]
    async fn reads_quota() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quota/own-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"success": true, "quotaRemaining": 41}),
            ))
            .mount(&server)
            .await;

        let quota = client(&server, Some("own-key"))
            .execute(Select(By::<text::Quota, _>::new(())))
            .await
            .unwrap();

        assert_eq!(quota, text::Quota::from(41));
    }

    #[tokio::test]
    async fn quota_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quota/own-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": false})),
            )
            .mount(&server)
            .await;

        let res = client(&server, Some("own-key"))
            .execute(Select(By::<text::Quota, _>::new(())))
            .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn quota_requires_own_key() {
        let server = MockServer::start().await;

        let err = client(&server, None)
            .execute(Select(By::<text::Quota, _>::new(())))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("No Textbelt API key"), "got: {err}");
    }
}
