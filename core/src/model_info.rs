use deck_common::DeckConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    /// Fast model for ordinary requests.
    Flash,
    /// Higher-capability model used for extended reasoning.
    Pro,
}

impl ModelVariant {
    pub fn for_reasoning(extended_reasoning: bool) -> Self {
        if extended_reasoning {
            ModelVariant::Pro
        } else {
            ModelVariant::Flash
        }
    }
}

/// The concrete model (and budget) chosen for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub variant: ModelVariant,
    pub model: String,
    pub thinking_budget: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    pub flash_model: String,
    pub pro_model: String,
    pub thinking_budget: u32,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::from_config(&DeckConfig::default())
    }
}

impl ModelCatalog {
    pub fn from_config(config: &DeckConfig) -> Self {
        Self {
            flash_model: config.flash_model.clone(),
            pro_model: config.pro_model.clone(),
            thinking_budget: config.thinking_budget,
        }
    }

    /// The budget is attached only when the Pro variant serves an
    /// extended-reasoning request.
    pub fn select(&self, extended_reasoning: bool) -> ModelSelection {
        let variant = ModelVariant::for_reasoning(extended_reasoning);
        let model = match variant {
            ModelVariant::Flash => self.flash_model.clone(),
            ModelVariant::Pro => self.pro_model.clone(),
        };
        let thinking_budget =
            (extended_reasoning && variant == ModelVariant::Pro).then_some(self.thinking_budget);
        ModelSelection {
            variant,
            model,
            thinking_budget,
        }
    }
}
