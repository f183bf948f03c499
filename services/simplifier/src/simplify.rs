use corpus::prompts;

use crate::config::DecodingParams;
use crate::provider::{LLMProvider, ProviderError};

/// Renders the full prompt for `text` and asks `model` to simplify it.
pub async fn simplify_text(
    provider: &dyn LLMProvider,
    text: &str,
    model: &str,
    use_rules: bool,
    params: &DecodingParams,
) -> Result<String, ProviderError> {
    let prompt = prompts::render(text, use_rules);
    provider.generate(&prompt, model, params).await
}
