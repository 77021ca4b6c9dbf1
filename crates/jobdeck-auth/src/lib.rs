//! Identity-provider session layer.
//!
//! Everything auth-related that the rest of the workspace consumes lives
//! here: the explicit sign-in tri-state, the user profile with its role
//! metadata, and access-token minting against the provider's backend
//! template (with a short-lived cache). Data-access components receive
//! session state explicitly; there is no ambient auth context.

pub mod error;
pub mod provider;
pub mod session;
pub mod token;
pub mod token_cache;

pub use error::{AuthError, AuthResult};
pub use provider::{BearerProvider, ClerkConfig, ClerkProvider, RoleWriter, TokenProvider};
pub use session::{Session, SessionState, SharedSession, UserProfile, BACKEND_TOKEN_TEMPLATE};
pub use token::AccessToken;
pub use token_cache::TokenCache;
