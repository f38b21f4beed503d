//! Secrets-mock: a plaintext server answering the health and secret-write
//! endpoints of a secrets store API.

pub mod redact;
mod server;
pub mod types;

pub(crate) use server::serve;
pub use redact::{SENSITIVE_MARKERS, SecretPreview, is_sensitive, representative_entry};
pub use server::{MAX_SECRET_BODY_BYTES, SECRETS_SERVER_HEADER, create_router, decode_bundle};
pub use types::{SecretBundle, SecretsHealth};
