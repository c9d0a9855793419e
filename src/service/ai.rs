use crate::api::gemini_api::GeminiApi;
use crate::error::NovaError;
use crate::types::gemini::{GenerateContentRequest, GenerationConfig};
use serde::Serialize;

/// Short snippet plus the longer answer behind it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuickAnswer {
    pub snippet: String,
    pub full_answer: String,
}

/// Question answering on top of Gemini.
#[derive(Clone)]
pub struct GeminiSearch {
    api: GeminiApi,
}

impl GeminiSearch {
    pub fn new(api: GeminiApi) -> Self {
        Self { api }
    }

    /// Factual answer for `query`.
    pub async fn search(&self, query: &str) -> Result<String, NovaError> {
        let config = GenerationConfig {
            temperature: Some(0.2),
            top_p: Some(0.95),
            max_output_tokens: Some(800),
        };
        self.ask(search_prompt(query), Some(config)).await
    }

    /// One-sentence snippet followed by the full search answer.
    pub async fn quick_answer(&self, query: &str) -> Result<QuickAnswer, NovaError> {
        let config = GenerationConfig {
            temperature: Some(0.1),
            top_p: None,
            max_output_tokens: Some(100),
        };
        let snippet = self.ask(snippet_prompt(query), Some(config)).await?;
        let full_answer = self.search(query).await?;
        Ok(QuickAnswer {
            snippet: snippet.trim().to_string(),
            full_answer: full_answer.trim().to_string(),
        })
    }

    pub async fn define_term(&self, term: &str) -> Result<String, NovaError> {
        let text = self.ask(definition_prompt(term), None).await?;
        Ok(text.trim().to_string())
    }

    async fn ask(
        &self,
        prompt: String,
        config: Option<GenerationConfig>,
    ) -> Result<String, NovaError> {
        let request = GenerateContentRequest::prompt(prompt, config);
        self.api
            .generate(&request)
            .await?
            .text()
            .ok_or(NovaError::EmptyAnswer)
    }
}

fn search_prompt(query: &str) -> String {
    format!(
        "I need a clear, factual answer to the following query: {query}\n\
         If this is a factual question, provide the most accurate information available.\n\
         If this requires explaining a concept, provide a concise explanation with relevant details.\n\
         If multiple interpretations are possible, address the most likely one first.\n\
         Include relevant context but prioritize clarity and brevity."
    )
}

fn snippet_prompt(query: &str) -> String {
    format!("Provide a very brief one-sentence answer to: {query}")
}

fn definition_prompt(term: &str) -> String {
    format!("Provide a clear, concise definition of: {term}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_the_question() {
        assert_eq!(
            snippet_prompt("what is rust"),
            "Provide a very brief one-sentence answer to: what is rust"
        );
        assert!(search_prompt("what is rust").starts_with(
            "I need a clear, factual answer to the following query: what is rust\n"
        ));
        assert_eq!(
            definition_prompt("entropy"),
            "Provide a clear, concise definition of: entropy"
        );
    }
}
