//! Identity resolution.
//!
//! The game doesn't authenticate anyone itself. A host plugs in an
//! [`IdentityProvider`] that maps whatever token it has (a session
//! cookie, a JWT, nothing at all) to an [`Identity`]. The engine only
//! cares whether the result is a player, whose stats and limits are
//! tracked, or a guest, who plays freely and leaves no trace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use hangman_protocol::{Identity, PlayerId};

use crate::SessionError;

/// Resolves an optional token to a player or guest identity.
///
/// # Example
///
/// ```rust
/// use hangman_protocol::Identity;
/// use hangman_session::{IdentityProvider, SessionError};
///
/// /// Treats the token as a numeric player id.
/// struct NumericProvider;
///
/// impl IdentityProvider for NumericProvider {
///     async fn resolve(&self, token: Option<&str>) -> Result<Identity, SessionError> {
///         match token {
///             None => Ok(Identity::guest("guest")),
///             Some(t) => t
///                 .parse()
///                 .map(Identity::player)
///                 .map_err(|_| SessionError::AuthFailed("token must be a number".into())),
///         }
///     }
/// }
/// ```
pub trait IdentityProvider: Send + Sync + 'static {
    /// `None` means the visitor didn't sign in.
    ///
    /// # Errors
    /// [`SessionError::AuthFailed`] if a token was given but rejected.
    fn resolve(
        &self,
        token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Identity, SessionError>> + Send;
}

// ---------------------------------------------------------------------------
// GuestProvider
// ---------------------------------------------------------------------------

/// Makes everyone a guest, numbered in arrival order (`guest-1`, `guest-2`, ...).
///
/// Tokens are ignored.
#[derive(Debug, Default)]
pub struct GuestProvider {
    next: AtomicU64,
}

impl GuestProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next guest label.
    pub fn next_guest(&self) -> Identity {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Identity::guest(format!("guest-{n}"))
    }
}

impl IdentityProvider for GuestProvider {
    async fn resolve(&self, _token: Option<&str>) -> Result<Identity, SessionError> {
        Ok(self.next_guest())
    }
}

// ---------------------------------------------------------------------------
// TokenProvider
// ---------------------------------------------------------------------------

/// A fixed table of tokens to player ids. Visitors without a token become
/// guests; an unknown token is an error.
#[derive(Debug, Default)]
pub struct TokenProvider {
    players: HashMap<String, PlayerId>,
    guests: GuestProvider,
}

impl TokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token. A later registration of the same token wins.
    pub fn with_player(mut self, token: impl Into<String>, player: PlayerId) -> Self {
        self.players.insert(token.into(), player);
        self
    }
}

impl IdentityProvider for TokenProvider {
    async fn resolve(&self, token: Option<&str>) -> Result<Identity, SessionError> {
        let Some(token) = token else {
            return Ok(self.guests.next_guest());
        };
        match self.players.get(token) {
            Some(&id) => {
                tracing::debug!(player = %id, "token resolved");
                Ok(Identity::Player { id })
            }
            None => {
                tracing::warn!("rejected unknown token");
                Err(SessionError::AuthFailed("unknown token".into()))
            }
        }
    }
}
