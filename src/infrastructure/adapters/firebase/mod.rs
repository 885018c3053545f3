//! Firebase Adapter - Realtime Database REST 客户端实现

mod credentials;
mod rest_client;
mod token_provider;

pub use credentials::{
    unescape_private_key, CredentialError, Credentials, ServiceAccountKey, DEFAULT_TOKEN_URI,
};
pub use rest_client::{FirebaseInitError, FirebaseRestClient, FirebaseRestClientConfig};
pub use token_provider::ServiceAccountTokenProvider;
