mod google_client;

pub use google_client::GoogleSearchClient;
