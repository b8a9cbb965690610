//! Player identity and play limits for Snarky Hangman.
//!
//! Two concerns live here:
//!
//! 1. **Identity**: turning an optional sign-in token into an
//!    [`Identity`](hangman_protocol::Identity), either a player or a guest
//!    ([`IdentityProvider`] trait, [`GuestProvider`], [`TokenProvider`]).
//! 2. **Play limits**: the daily ceiling on rounds a signed-in player may
//!    start ([`PlayLimiter`]).
//!
//! ```text
//! Game service (above)  ← resolves identity, checks the limiter before each round
//!     ↕
//! Session layer (this crate)
//!     ↕
//! Protocol (below)      ← Identity, PlayerId
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod error;
mod limiter;

pub use auth::{GuestProvider, IdentityProvider, TokenProvider};
pub use error::SessionError;
pub use limiter::{LimitConfig, PlayAllowance, PlayLimiter};
