//! Application services - account use cases and token issuance.

mod requests;
mod token;
mod user_service;

pub use requests::{ChangePassword, RegisterUser, SetPassword, SignIn, SignedInUser, UpdateProfile};
pub use token::{SignedToken, TokenClaims, TokenIssuer};
pub use user_service::{UserManager, UserService};
