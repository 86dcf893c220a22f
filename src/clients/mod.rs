pub mod fetch_client;
pub mod pdf_client;

pub use fetch_client::FetchClient;
