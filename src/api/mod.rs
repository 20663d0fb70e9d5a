pub mod auth;
pub mod handlers;
pub mod router;

pub use auth::WebhookAuth;
pub use router::create_router;
