//! Model identifiers and tiers.
//!
//! The gateway exposes four models. Meta and Prime are the standard tier;
//! Spectre and Phantom are the premium tier reserved for subscribers.
//! Premium models bypass the trial message count check entirely.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Pricing tier of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Standard,
    Premium,
}

impl ModelTier {
    pub fn is_premium(self) -> bool {
        matches!(self, ModelTier::Premium)
    }
}

/// A selectable gateway model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelId {
    VanshMeta,
    VanshPrime,
    VanshSpectre,
    VanshPhantom,
}

impl ModelId {
    /// All models, standard tier first.
    pub const ALL: [ModelId; 4] = [
        ModelId::VanshMeta,
        ModelId::VanshPrime,
        ModelId::VanshSpectre,
        ModelId::VanshPhantom,
    ];

    pub fn tier(self) -> ModelTier {
        match self {
            ModelId::VanshMeta | ModelId::VanshPrime => ModelTier::Standard,
            ModelId::VanshSpectre | ModelId::VanshPhantom => ModelTier::Premium,
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::VanshMeta
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelId::VanshMeta => write!(f, "Vansh Meta"),
            ModelId::VanshPrime => write!(f, "Vansh Prime"),
            ModelId::VanshSpectre => write!(f, "Vansh Spectre"),
            ModelId::VanshPhantom => write!(f, "Vansh Phantom"),
        }
    }
}

impl FromStr for ModelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "vansh meta" | "meta" => Ok(ModelId::VanshMeta),
            "vansh prime" | "prime" => Ok(ModelId::VanshPrime),
            "vansh spectre" | "spectre" => Ok(ModelId::VanshSpectre),
            "vansh phantom" | "phantom" => Ok(ModelId::VanshPhantom),
            other => Err(format!("invalid model: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in ModelId::ALL {
            let s = model.to_string();
            let parsed: ModelId = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_model_short_names_parse() {
        assert_eq!("phantom".parse::<ModelId>().unwrap(), ModelId::VanshPhantom);
        assert_eq!("vansh-meta".parse::<ModelId>().unwrap(), ModelId::VanshMeta);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        assert!("gpt-4".parse::<ModelId>().is_err());
    }

    #[test]
    fn test_tiers() {
        assert!(!ModelId::VanshMeta.tier().is_premium());
        assert!(!ModelId::VanshPrime.tier().is_premium());
        assert!(ModelId::VanshSpectre.tier().is_premium());
        assert!(ModelId::VanshPhantom.tier().is_premium());
    }

    #[test]
    fn test_default_model() {
        assert_eq!(ModelId::default(), ModelId::VanshMeta);
    }
}
