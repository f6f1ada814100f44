//! `/sessions` and `/me` endpoints.

use secrecy::SecretBox;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        contact::Email,
        user::{serialize_password, Password},
        User,
    },
    session::Token,
};

use super::{body, json, Endpoint};

/// `POST /sessions`: exchanges credentials for a [`Token`].
#[derive(Clone, Debug, Serialize)]
pub struct Create {
    /// [`Email`] of the authenticating [`User`].
    pub email: Email,

    /// [`Password`] of the authenticating [`User`].
    #[serde(serialize_with = "serialize_password")]
    pub password: SecretBox<Password>,
}

/// Response of [`Create`].
#[derive(Clone, Debug, Deserialize)]
pub struct Created {
    /// Issued bearer [`Token`].
    pub token: Token,

    /// Authenticated [`User`], if the backend embeds it.
    #[serde(default)]
    pub user: Option<User>,
}

impl Endpoint for Create {
    type Output = Created;

    const METHOD: http::Method = http::Method::POST;
    const RESOURCE: &'static str = "sessions";

    fn path(&self) -> String {
        "/sessions".into()
    }

    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        body(self)
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

/// `GET /me`: profile of the authenticated [`User`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Me;

impl Endpoint for Me {
    type Output = User;

    const METHOD: http::Method = http::Method::GET;
    const RESOURCE: &'static str = "me";

    fn path(&self) -> String {
        "/me".into()
    }

    fn decode(&self, body: Vec<u8>) -> Result<Self::Output, serde_json::Error> {
        json(&body)
    }
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        api::Endpoint as _,
        domain::{contact::Email, user::Password},
    };

    use super::Create;

    #[test]
    fn sends_credentials() {
        let req = Create {
            email: Email::new("ana@gas.pe").unwrap(),
            password: SecretBox::new(Box::new(Password::new("s3cret").unwrap())),
        };

        assert_eq!(
            req.body().unwrap().unwrap(),
            serde_json::json!({"email": "ana@gas.pe", "password": "s3cret"}),
        );
    }

    #[test]
    fn decodes_token_without_user() {
        let res = Create {
            email: Email::new("ana@gas.pe").unwrap(),
            password: SecretBox::new(Box::new(Password::new("x").unwrap())),
        }
        .decode(br#"{"token": "abc"}"#.to_vec())
        .unwrap();

        assert_eq!(res.token.as_ref(), "abc");
        assert!(res.user.is_none());
    }
}
