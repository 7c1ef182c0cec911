//! Business logic services for the AgriPredict dashboard

pub mod disease_detection;
pub mod profit_estimation;
pub mod prompt;

pub use disease_detection::DiseaseDetectionService;
pub use profit_estimation::ProfitEstimationService;
pub use prompt::PromptTemplate;
