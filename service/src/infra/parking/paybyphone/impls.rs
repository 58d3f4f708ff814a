//! [`Parking`] operations of [`PayByPhone`].

use common::operations::{By, Insert, Select};
use reqwest::{header, Method};
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        account, location, quote, rate_option, session, ticket, vehicle,
        workflow, Quote, Ticket,
    },
    infra::{parking, Parking},
};

use super::{Error, PayByPhone};

impl Parking<Select<By<account::Id, ()>>> for PayByPhone {
    type Ok = account::Id;
    type Err = Traced<parking::Error>;

    async fn execute(
        &self,
        _: Select<By<account::Id, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Deserialize)]
        struct Account {
            id: account::Id,
        }

        self.account_id
            .get_or_try_init(|| async {
                // Only a single account per user is supported.
                let request = self.request(Method::GET, "parking/accounts");
                let id = Self::send(request)
                    .await?
                    .json::<Vec<Account>>()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> Error))?
                    .into_iter()
                    .next()
                    .map(|a| a.id)
                    .ok_or(Error::NoAccounts)
                    .map_err(tracerr::wrap!())?;
                log::debug!("resolved parking account `{id}`");
                Ok::<_, Traced<Error>>(id)
            })
            .await
            .cloned()
            .map_err(tracerr::map_from_and_wrap!())
    }
}

impl Parking<Select<By<Vec<Ticket>, account::Id>>> for PayByPhone {
    type Ok = Vec<Ticket>;
    type Err = Traced<parking::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Ticket>, account::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!(
            "parking/accounts/{}/sessions?periodType=Current",
            by.into_inner(),
        );
        Self::send(self.request(Method::GET, &path))
            .await
            .map_err(tracerr::map_from_and_wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl Parking<Select<By<Quote, quote::Request>>> for PayByPhone {
    type Ok = Quote;
    type Err = Traced<parking::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Quote, quote::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query<'r> {
            location_id: &'r location::Id,
            license_plate: &'r vehicle::LicensePlate,
            rate_option_id: &'r rate_option::Id,
            duration_time_unit: &'static str,
            duration_quantity: u32,
            is_park_until: bool,
            parking_account_id: &'r account::Id,
        }

        let quote::Request {
            account_id,
            target,
            duration,
        } = by.into_inner();

        let path = format!("parking/accounts/{account_id}/quote");
        let request = self.request(Method::GET, &path).query(&Query {
            location_id: &target.location_id,
            license_plate: &target.license_plate,
            rate_option_id: &target.rate_option_id,
            duration_time_unit: "Days",
            duration_quantity: duration.days.get(),
            is_park_until: false,
            parking_account_id: &account_id,
        });
        Self::send(request)
            .await
            .map_err(tracerr::map_from_and_wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl Parking<Insert<session::Request>> for PayByPhone {
    type Ok = workflow::Handle;
    type Err = Traced<parking::Error>;

    async fn execute(
        &self,
        Insert(req): Insert<session::Request>,
    ) -> Result<Self::Ok, Self::Err> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Duration {
            quantity: String,
            time_unit: &'static str,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'r> {
            expire_time: Option<()>,
            duration: Duration,
            license_plate: &'r vehicle::LicensePlate,
            location_id: &'r location::Id,
            rate_option_id: &'r rate_option::Id,
            #[serde(with = "common::datetime::serde::rfc3339")]
            start_time: ticket::StartDateTime,
            quote_id: &'r quote::Id,
            parking_account_id: &'r account::Id,
        }

        let session::Request {
            target,
            duration,
            start_time,
            quote_id,
            account_id,
        } = req;

        let path = format!("parking/accounts/{account_id}/sessions/");
        let request = self.request(Method::POST, &path).json(&Body {
            expire_time: None,
            duration: Duration {
                quantity: duration.days.to_string(),
                time_unit: "days",
            },
            license_plate: &target.license_plate,
            location_id: &target.location_id,
            rate_option_id: &target.rate_option_id,
            start_time,
            quote_id: &quote_id,
            parking_account_id: &account_id,
        });
        let response = Self::send(request)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(Error::MissingWorkflowLocation)
            .map_err(tracerr::from_and_wrap!(=> parking::Error))?;
        Ok(workflow::Handle::new(location, &self.config.api_root))
    }
}

impl Parking<Select<By<Vec<workflow::Event>, workflow::Handle>>>
    for PayByPhone
{
    type Ok = Vec<workflow::Event>;
    type Err = Traced<parking::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<workflow::Event>, workflow::Handle>>,
    ) -> Result<Self::Ok, Self::Err> {
        let handle = by.into_inner();
        Self::send(self.request(Method::GET, handle.as_ref()))
            .await
            .map_err(tracerr::map_from_and_wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use common::{
        operations::{By, Insert, Select},
        DateTime,
    };
    use wiremock::{
        matchers::{bearer_token, body_partial_json, method, path, query_param},
        Mock, MockServer, Request, ResponseTemplate,
    };

    use crate::{
        domain::{account, quote, session, workflow, Quote, Ticket},
        infra::{parking::paybyphone::tests as auth, Parking as _, PayByPhone},
    };

    /// Matches the whole raw value of a header, commas included.
    fn header_is(
        name: &'static str,
        value: &'static str,
    ) -> impl Fn(&Request) -> bool {
        move |req| {
            req.headers.get(name).and_then(|v| v.to_str().ok()) == Some(value)
        }
    }

    async fn client(server: &MockServer) -> PayByPhone {
        auth::mount_token(server).await;
        PayByPhone::login(auth::config(server), &auth::credentials())
            .await
            .unwrap()
    }

    async fn mount_accounts(server: &MockServer, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/parking/accounts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": "acc-1"}])),
            )
            .expect(expected)
            .mount(server)
            .await;
    }

    fn target() -> session::Target {
        session::Target {
            license_plate: "AB123CD".to_owned().into(),
            location_id: "75017".to_owned().into(),
            rate_option_id: "1234".to_owned().into(),
        }
    }

    #[tokio::test]
    async fn attaches_auth_and_locale_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parking/accounts"))
            .and(bearer_token("t0k3n"))
            .and(header_is("accept", "application/json, text/plain, */*"))
            .and(header_is(
                "accept-language",
                "fr-FR,fr;q=0.8,en-US;q=0.5,en;q=0.3",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": 42}])),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server).await;

        let id = client.execute(Select(By::new(()))).await.unwrap();

        assert_eq!(id, account::Id::from("42".to_owned()));
    }

    #[tokio::test]
    async fn memoizes_account_id() {
        let server = MockServer::start().await;
        mount_accounts(&server, 1).await;
        let client = client(&server).await;

        for _ in 0..3 {
            let id: account::Id =
                client.execute(Select(By::new(()))).await.unwrap();
            assert_eq!(id.as_ref(), "acc-1");
        }
    }

    #[tokio::test]
    async fn resolves_account_id_again_once_forgotten() {
        let server = MockServer::start().await;
        mount_accounts(&server, 2).await;
        let mut client = client(&server).await;

        let _: account::Id =
            client.execute(Select(By::new(()))).await.unwrap();
        client.forget_account_id();
        let _: account::Id =
            client.execute(Select(By::new(()))).await.unwrap();
    }

    #[tokio::test]
    async fn fails_without_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parking/accounts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
            )
            .mount(&server)
            .await;
        let client = client(&server).await;

        let err = client
            .execute(Select(By::<account::Id, _>::new(())))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("No parking account"), "got: {err}");
    }

    #[tokio::test]
    async fn lists_current_tickets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parking/accounts/acc-1/sessions"))
            .and(query_param("periodType", "Current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!([{
                    "parkingSessionId": "s-1",
                    "locationId": "75017",
                    "startTime": "2023-03-16T21:41:52+00:00",
                    "expireTime": "2023-03-17T21:41:52+00:00",
                    "vehicle": {
                        "id": 7,
                        "licensePlate": "AB123CD",
                        "type": "Car",
                    },
                    "rateOption": {"type": "RES"},
                }]),
            ))
            .mount(&server)
            .await;
        let client = client(&server).await;

        let tickets: Vec<Ticket> = client
            .execute(Select(By::new(account::Id::from("acc-1".to_owned()))))
            .await
            .unwrap();

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id.as_ref(), "s-1");
    }

    #[tokio::test]
    async fn requests_quote() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parking/accounts/acc-1/quote"))
            .and(query_param("locationId", "75017"))
            .and(query_param("licensePlate", "AB123CD"))
            .and(query_param("rateOptionId", "1234"))
            .and(query_param("durationTimeUnit", "Days"))
            .and(query_param("durationQuantity", "2"))
            .and(query_param("isParkUntil", "false"))
            .and(query_param("parkingAccountId", "acc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "quoteId": "q-1",
                    "totalCost": {"amount": 0.0, "currency": "EUR"},
                }),
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server).await;

        let quote: Quote = client
            .execute(Select(By::new(quote::Request {
                account_id: "acc-1".to_owned().into(),
                target: target(),
                duration: session::Duration::days(NonZeroU32::new(2).unwrap()),
            })))
            .await
            .unwrap();

        assert_eq!(quote.id.as_ref(), "q-1");
        assert!(quote.is_free());
    }

    #[tokio::test]
    async fn submits_session_and_returns_workflow_handle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parking/accounts/acc-1/sessions/"))
            .and(body_partial_json(serde_json::json!({
                "expireTime": null,
                "duration": {"quantity": "1", "timeUnit": "days"},
                "licensePlate": "AB123CD",
                "locationId": "75017",
                "rateOptionId": "1234",
                "startTime": "2023-03-16T21:41:52Z",
                "quoteId": "q-1",
                "parkingAccountId": "acc-1",
            })))
            .respond_with(ResponseTemplate::new(202).insert_header(
                "Location",
                format!("{}/events/workflow/wf-1", server.uri()).as_str(),
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server).await;

        let handle = client
            .execute(Insert(session::Request {
                target: target(),
                duration: session::Duration::days(NonZeroU32::MIN),
                start_time: DateTime::from_rfc3339("2023-03-16T21:41:52Z")
                    .unwrap()
                    .coerce(),
                quote_id: "q-1".to_owned().into(),
                account_id: "acc-1".to_owned().into(),
            }))
            .await
            .unwrap();

        assert_eq!(handle.as_ref(), "events/workflow/wf-1");
    }

    #[tokio::test]
    async fn fails_without_workflow_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parking/accounts/acc-1/sessions/"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;
        let client = client(&server).await;

        let err = client
            .execute(Insert(session::Request {
                target: target(),
                duration: session::Duration::days(NonZeroU32::MIN),
                start_time: DateTime::now().coerce(),
                quote_id: "q-1".to_owned().into(),
                account_id: "acc-1".to_owned().into(),
            }))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Location"), "got: {err}");
    }

    #[tokio::test]
    async fn reads_workflow_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/workflow/wf-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!([
                    {"$type": "PayByPhone.ParkingRequested"},
                    {
                        "$type": "PayByPhone.StartParkingFailed",
                        "failureReason": "Already parked",
                    },
                ]),
            ))
            .mount(&server)
            .await;
        let client = client(&server).await;

        let events: Vec<workflow::Event> = client
            .execute(Select(By::new(workflow::Handle::new(
                "/events/workflow/wf-1",
                &server.uri(),
            ))))
            .await
            .unwrap();

        assert_eq!(
            workflow::Outcome::resolve(&events),
            Some(workflow::Outcome::Failed {
                reason: Some("Already parked".to_owned()),
            }),
        );
    }

    #[tokio::test]
    async fn fails_fast_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events/workflow/wf-1"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server).await;

        let res = client
            .execute(Select(By::<Vec<workflow::Event>, _>::new(
                workflow::Handle::new("events/workflow/wf-1", &server.uri()),
            )))
            .await;

        assert!(res.is_err());
    }
}
