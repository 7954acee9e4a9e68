// Infrastructure adapters implementing application ports

pub mod http_client;
pub mod match_store;

pub use http_client::ReqwestHttp;
pub use match_store::InMemoryMatchStore;
