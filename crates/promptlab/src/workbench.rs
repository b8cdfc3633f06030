// SPDX-FileCopyrightText: 2026 Promptlab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of the optimizer, generator and judge over one shared dispatcher.

use std::sync::Arc;

use promptlab_config::model::PromptlabConfig;
use promptlab_config::ProviderCredentials;
use promptlab_core::{ChatDispatcher, PromptlabError};
use promptlab_gateway::GatewayState;
use promptlab_judge::JudgeEngine;
use promptlab_optimizer::{PromptOptimizer, ResponseGenerator};
use promptlab_router::ModelRouter;

/// The three workbench services, sharing one dispatcher.
pub struct Workbench {
    pub optimizer: PromptOptimizer,
    pub generator: ResponseGenerator,
    pub judge: JudgeEngine,
}

impl Workbench {
    /// Production wiring: credentials are resolved once here, then checked
    /// per call by the router.
    pub fn from_config(config: &PromptlabConfig) -> Result<Self, PromptlabError> {
        let credentials = ProviderCredentials::resolve(&config.providers);
        let router = ModelRouter::from_config(config, credentials)?;
        Self::with_dispatcher(config, Arc::new(router))
    }

    pub fn with_dispatcher(
        config: &PromptlabConfig,
        dispatcher: Arc<dyn ChatDispatcher>,
    ) -> Result<Self, PromptlabError> {
        Ok(Self {
            optimizer: PromptOptimizer::new(dispatcher.clone(), config.optimizer.clone())?,
            generator: ResponseGenerator::new(dispatcher.clone(), config.generator.clone()),
            judge: JudgeEngine::new(dispatcher, config.judge.clone()),
        })
    }

    pub fn into_gateway_state(self) -> GatewayState {
        GatewayState::new(self.optimizer, self.generator, self.judge)
    }
}
