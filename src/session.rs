use crate::ai::{ChatBackend, GenerationClient, OpenAiBackend};
use crate::config::Config;
use crate::executor::ShellExecutor;
use crate::shell::ShellType;
use anyhow::Result;

/// Everything a dispatched line needs, built once at start-up.
pub struct Session<B> {
    pub config: Config,
    pub generator: GenerationClient<B>,
    pub shell_type: ShellType,
    pub executor: ShellExecutor,
}

impl<B: ChatBackend> Session<B> {
    pub fn new(config: Config, generator: GenerationClient<B>, shell_type: ShellType) -> Self {
        Self {
            config,
            generator,
            shell_type,
            executor: ShellExecutor::new(shell_type),
        }
    }
}

impl Session<OpenAiBackend> {
    pub fn from_config(config: Config) -> Result<Self> {
        let backend = OpenAiBackend::new(&config)?;
        let generator = GenerationClient::new(backend, config.fallback_models.clone());
        Ok(Self::new(config, generator, ShellType::detect()))
    }
}
