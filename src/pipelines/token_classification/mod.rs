/// The token classifier service
pub mod service;

pub use service::LmTokenClassifierService;
