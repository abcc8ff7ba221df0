pub mod analysis_pipeline;
pub mod publish;

pub use analysis_pipeline::{manifest_warning, AnalysisPipeline, AnalysisReport};
pub use publish::{
    service_name_from_repo_url, DeployOutcome, DeploymentTrigger, PushOutcome,
    RepositoryPublisher,
};
