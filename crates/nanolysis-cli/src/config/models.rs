use nanolysis::engine::config::EngineConfig;
use nanolysis::workflows::reduce::ReduceJob;
use std::path::PathBuf;

pub struct AppConfig {
    pub origin_path: PathBuf,
    pub engine: EngineConfig,
    pub job: ReduceJob,
}
