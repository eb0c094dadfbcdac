pub mod authenticator;
pub mod jwt;
pub mod service_account_key;
pub mod token_exchange;
