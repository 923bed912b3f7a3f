pub mod api_client;
pub mod token_store;

pub use api_client::ApiClient;
pub use token_store::TokenStore;
