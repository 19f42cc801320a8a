//! Grouping of the model list by provider for the model picker.

use std::collections::BTreeMap;

use crate::records::ModelInfo;

/// Id prefixes of known providers, matched against the lowercased model id.
const PROVIDER_PREFIXES: &[(&str, &str)] = &[
    ("anthropic/", "Anthropic"),
    ("openai/", "OpenAI"),
    ("google/", "Google"),
    ("qwen/", "Qwen"),
    ("meta-llama/", "Meta (Llama)"),
    ("mistralai/", "Mistral"),
    ("cognitivecomputations/", "Dolphin"),
];

/// Providers listed first, in this order. Others follow alphabetically.
pub const PROVIDER_ORDER: &[&str] = &[
    "Anthropic",
    "OpenAI",
    "Qwen",
    "Meta (Llama)",
    "Mistral",
    "Dolphin",
];

const OTHER_PROVIDER: &str = "Other";

/// Models of one provider, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderGroup {
    pub provider: String,
    pub models: Vec<ModelInfo>,
}

/// Provider display name for a model id.
pub fn provider_for(model_id: &str) -> &'static str {
    let id = model_id.to_lowercase();
    PROVIDER_PREFIXES
        .iter()
        .find(|(prefix, _)| id.starts_with(prefix))
        .map(|(_, provider)| *provider)
        .unwrap_or(OTHER_PROVIDER)
}

/// Group `models` by provider, keeping those whose id or provider name
/// contains `search` (case-insensitive). Empty groups are omitted.
pub fn group_models(models: &[ModelInfo], search: &str) -> Vec<ProviderGroup> {
    let needle = search.trim().to_lowercase();
    let mut grouped: BTreeMap<&'static str, Vec<ModelInfo>> = BTreeMap::new();

    for model in models {
        let provider = provider_for(&model.id);
        let matches = model.id.to_lowercase().contains(&needle)
            || provider.to_lowercase().contains(&needle);
        if matches {
            grouped.entry(provider).or_default().push(model.clone());
        }
    }

    let mut groups = Vec::with_capacity(grouped.len());
    for provider in PROVIDER_ORDER {
        if let Some(models) = grouped.remove(provider) {
            groups.push(sorted_group(provider, models));
        }
    }
    // BTreeMap iteration is already alphabetical.
    for (provider, models) in grouped {
        groups.push(sorted_group(provider, models));
    }
    groups
}

fn sorted_group(provider: &str, mut models: Vec<ModelInfo>) -> ProviderGroup {
    models.sort_by(|a, b| a.id.cmp(&b.id));
    ProviderGroup {
        provider: provider.to_string(),
        models,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> ModelInfo {
        ModelInfo {
            id: id.into(),
            name: None,
        }
    }

    fn sample() -> Vec<ModelInfo> {
        vec![
            model("openai/gpt-4o"),
            model("google/gemini-pro"),
            model("anthropic/claude-3-haiku"),
            model("x-ai/grok-2"),
            model("openai/gpt-3.5-turbo"),
            model("cognitivecomputations/dolphin-mixtral"),
            model("deepseek/deepseek-chat"),
        ]
    }

    #[test]
    fn provider_prefixes_are_case_insensitive() {
        assert_eq!(provider_for("Anthropic/claude-3"), "Anthropic");
        assert_eq!(provider_for("meta-llama/llama-3-70b"), "Meta (Llama)");
        assert_eq!(provider_for("mistralai/mixtral"), "Mistral");
        assert_eq!(provider_for("unknown-model"), "Other");
    }

    #[test]
    fn preferred_providers_come_first_then_alphabetical() {
        let groups = group_models(&sample(), "");
        let order: Vec<&str> = groups.iter().map(|g| g.provider.as_str()).collect();
        assert_eq!(order, ["Anthropic", "OpenAI", "Dolphin", "Google", "Other"]);
    }

    #[test]
    fn models_within_group_are_sorted_by_id() {
        let groups = group_models(&sample(), "");
        let openai = groups.iter().find(|g| g.provider == "OpenAI").unwrap();
        let ids: Vec<&str> = openai.models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["openai/gpt-3.5-turbo", "openai/gpt-4o"]);
    }

    #[test]
    fn search_matches_id_or_provider() {
        let by_id = group_models(&sample(), "GROK");
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].provider, "Other");
        assert_eq!(by_id[0].models[0].id, "x-ai/grok-2");

        let by_provider = group_models(&sample(), "dolphin");
        assert_eq!(by_provider.len(), 1);
        assert_eq!(by_provider[0].models.len(), 1);
    }

    #[test]
    fn no_match_yields_no_groups() {
        assert!(group_models(&sample(), "nothing-like-this").is_empty());
        assert!(group_models(&[], "").is_empty());
    }
}
