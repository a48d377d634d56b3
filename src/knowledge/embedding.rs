use anyhow::{anyhow, Result};

/// Client for a batch embedding endpoint speaking the Ollama wire format
pub struct EmbeddingClient {
    http: reqwest::Client,
    url: String,
    model: String,
}

#[derive(serde::Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(serde::Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl EmbeddingClient {
    pub fn new(url: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
            model: model.to_string(),
        }
    }

    /// Embed a batch of texts, one vector per input, in input order.
    /// An empty batch returns without touching the network.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<EmbedResponse>()
            .await?;

        if response.embeddings.len() != texts.len() {
            return Err(anyhow!(
                "Embedding endpoint returned {} vectors for {} inputs",
                response.embeddings.len(),
                texts.len()
            ));
        }

        Ok(response.embeddings)
    }

    /// Embed one query string
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or(anyhow!("Embedding endpoint returned no vector"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_request_serializes_to_wire_format() {
        let request = EmbedRequest {
            model: "nomic-embed-text".to_string(),
            input: vec!["first".to_string(), "second".to_string()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "nomic-embed-text");
        assert_eq!(value["input"][0], "first");
        assert_eq!(value["input"][1], "second");
    }

    #[test]
    fn embed_response_parses_vectors() {
        let body = r#"{"model": "nomic-embed-text", "embeddings": [[0.5, -0.25], [1.0, 0.0]]}"#;
        let response: EmbedResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.embeddings.len(), 2);
        assert_eq!(response.embeddings[0], vec![0.5, -0.25]);
    }
}
