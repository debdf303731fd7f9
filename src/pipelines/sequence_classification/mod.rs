/// The sequence classifier service
pub mod service;

pub use service::LmSequenceClassifierService;
