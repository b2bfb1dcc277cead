//! Document analysis orchestration and response normalization.

pub mod normalize;
pub mod repository;
pub mod service;

pub use repository::AnalysisRepository;
pub use service::AnalysisService;
