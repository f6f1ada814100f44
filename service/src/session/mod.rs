//! Authentication [`Session`] and its [`Store`].

pub mod storage;

use std::sync::{Arc, PoisonError, RwLock};

use common::{unit, DateTime, DateTimeOf};
use derive_more::AsRef;
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

use crate::domain::User;

pub use self::storage::Storage;

/// Authenticated [`User`] identity with its bearer [`Token`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// Authenticated [`User`], if any.
    pub user: Option<User>,

    /// Bearer [`Token`], if any.
    pub token: Option<Token>,
}

impl Session {
    /// Indicates whether this [`Session`] holds a [`Token`] which has not
    /// expired yet.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_expired())
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Deserialize, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] if the given `token` is not blank.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }

    /// Returns the [`DateTime`] this [`Token`] expires at, if it's a [JWT]
    /// carrying an `exp` claim.
    ///
    /// The signature is not verified: the backend is the only authority on
    /// the [`Token`] validity, this is only used to avoid sending requests
    /// which are known to be rejected.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[must_use]
    pub fn expires_at(&self) -> Option<ExpirationDateTime> {
        /// Claims of interest.
        #[derive(Deserialize)]
        struct Claims {
            /// Expiration Unix timestamp.
            exp: Option<i64>,
        }

        let mut validation = jsonwebtoken::Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(
            &self.0,
            &jsonwebtoken::DecodingKey::from_secret(&[]),
            &validation,
        )
        .ok()?;
        DateTimeOf::from_unix_timestamp(data.claims.exp?)
    }

    /// Indicates whether this [`Token`] is known to be expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at()
            .is_some_and(|exp| exp.coerce::<()>() <= DateTime::now())
    }
}

impl TryFrom<String> for Token {
    type Error = &'static str;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token).ok_or("blank `Token`")
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(***)")
    }
}

/// [`DateTime`] when a [`Token`] expires.
pub type ExpirationDateTime = DateTimeOf<(Token, unit::Expiration)>;

/// Shared [`Session`] holder persisting every change into a [`Storage`].
///
/// Clones share the same [`Session`]: a change made through one clone is
/// observed by the next read through any other.
#[derive(Clone, Debug)]
pub struct Store {
    /// Current [`Session`].
    session: Arc<RwLock<Session>>,

    /// [`Storage`] persisting the [`Session`].
    storage: Arc<dyn Storage>,
}

impl Store {
    /// Creates a new [`Store`] restoring the [`Session`] persisted in the
    /// provided [`Storage`] (if any).
    ///
    /// A [`Session`] which cannot be restored is logged and ignored.
    pub fn restore(storage: impl Storage + 'static) -> Self {
        let session = storage
            .load()
            .map_err(|e| log::warn!("failed to restore `Session`: {e}"))
            .ok()
            .flatten()
            .unwrap_or_default();

        Self {
            session: Arc::new(RwLock::new(session)),
            storage: Arc::new(storage),
        }
    }

    /// Returns a snapshot of the current [`Session`].
    #[must_use]
    pub fn get(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the current [`Token`], if any.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    /// Returns the current [`User`], if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    /// Replaces the current [`Session`] with the provided [`User`] and
    /// [`Token`].
    ///
    /// The in-memory [`Session`] is replaced even if persisting fails.
    ///
    /// # Errors
    ///
    /// If the [`Session`] cannot be persisted.
    pub fn set(
        &self,
        user: Option<User>,
        token: Token,
    ) -> Result<(), Traced<storage::Error>> {
        self.replace(Session {
            user,
            token: Some(token),
        })
    }

    /// Replaces the [`User`] of the current [`Session`], keeping its
    /// [`Token`].
    ///
    /// # Errors
    ///
    /// If the [`Session`] cannot be persisted.
    pub fn set_user(&self, user: User) -> Result<(), Traced<storage::Error>> {
        let mut session = self.get();
        session.user = Some(user);
        self.replace(session)
    }

    /// Clears the current [`Session`] and its persisted copy.
    ///
    /// Clearing an already empty [`Session`] is a no-op.
    ///
    /// # Errors
    ///
    /// If the persisted [`Session`] cannot be removed.
    pub fn clear(&self) -> Result<(), Traced<storage::Error>> {
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Session::default();
        self.storage.remove().map_err(tracerr::wrap!())
    }

    /// Replaces the current [`Session`] and persists it.
    fn replace(&self, session: Session) -> Result<(), Traced<storage::Error>> {
        let persisted = session.clone();
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session;
        self.storage.save(&persisted).map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use crate::testing::jwt;

    use super::{storage::Memory, Session, Store, Token};

    #[test]
    fn set_is_visible_through_clones() {
        let store = Store::restore(Memory::default());
        let other = store.clone();

        store.set(None, Token::new("abc").unwrap()).unwrap();
        assert_eq!(other.token().unwrap().as_ref(), "abc");

        other.clear().unwrap();
        assert_eq!(store.get(), Session::default());
    }

    #[test]
    fn persists_and_restores() {
        let memory = Arc::new(Memory::default());

        let store = Store::restore(Arc::clone(&memory));
        store.set(None, Token::new("abc").unwrap()).unwrap();

        let restored = Store::restore(Arc::clone(&memory));
        assert_eq!(restored.token().unwrap().as_ref(), "abc");

        restored.clear().unwrap();
        assert!(Store::restore(memory).token().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = Store::restore(Memory::default());
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), Session::default());
    }

    #[test]
    fn opaque_token_never_expires() {
        let token = Token::new("opaque").unwrap();
        assert!(token.expires_at().is_none());
        assert!(!token.is_expired());
        assert!(Token::new("  ").is_none());
    }

    #[test]
    fn jwt_expiration() {
        let now = common::DateTime::now().unix_timestamp();

        assert!(jwt(now - 60).is_expired());
        assert!(!jwt(now + 3600).is_expired());

        let session = Session {
            user: None,
            token: Some(jwt(now - 60)),
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn token_is_redacted() {
        let token = Token::new("abc").unwrap();
        assert_eq!(format!("{token:?}"), "Token(***)");
    }
}
