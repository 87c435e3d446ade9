//! Text analytics client: sentence sentiment and entity recognition

use crate::config::LensConfig;
use crate::error::{ApiError, Result, check_status};
use async_trait::async_trait;
use lens_core::{EntityCandidate, Sentence, Sentiment, TextAnalyzer};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "Text Analytics";
const API_PATH: &str = "text/analytics/v3.1";
const SENTIMENT_PATH: &str = "sentiment";
const ENTITIES_PATH: &str = "entities/recognition/general";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const DOCUMENT_ID: &str = "1";

/// Both endpoints are asked for code-point offsets so sentence spans and
/// entity offsets use the same unit.
const STRING_INDEX_TYPE: (&str, &str) = ("stringIndexType", "UnicodeCodePoint");

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    documents: [RequestDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestDocument<'a> {
    language: &'a str,
    id: &'a str,
    text: &'a str,
}

/// Response envelope shared by both endpoints
#[derive(Debug, Deserialize)]
#[serde(bound = "D: DeserializeOwned")]
struct AnalyzeResponse<D> {
    #[serde(default)]
    documents: Vec<D>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    id: String,
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SentimentDocument {
    sentences: Vec<WireSentence>,
}

#[derive(Debug, Deserialize)]
struct WireSentence {
    text: String,
    sentiment: Sentiment,
    offset: usize,
    length: usize,
}

#[derive(Debug, Deserialize)]
struct EntitiesDocument {
    entities: Vec<WireEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEntity {
    text: String,
    category: String,
    subcategory: Option<String>,
    confidence_score: f64,
    offset: usize,
    #[serde(default)]
    length: usize,
}

impl From<WireSentence> for Sentence {
    fn from(wire: WireSentence) -> Self {
        Sentence::new(wire.text, wire.sentiment, wire.offset, wire.length)
    }
}

impl From<WireEntity> for EntityCandidate {
    fn from(wire: WireEntity) -> Self {
        EntityCandidate {
            text: wire.text,
            category: wire.category,
            subcategory: wire.subcategory,
            confidence_score: wire.confidence_score,
            offset: wire.offset,
            length: wire.length,
        }
    }
}

impl<D> AnalyzeResponse<D> {
    /// The single document we sent, or the error reported for it
    fn into_document(self) -> Result<D> {
        if let Some(failed) = self.errors.into_iter().find(|e| e.id == DOCUMENT_ID) {
            return Err(ApiError::Provider(format!(
                "{}: {}",
                failed.error.code, failed.error.message
            )));
        }
        self.documents.into_iter().next().ok_or(ApiError::EmptyDocument)
    }
}

/// Client for the hosted text-analytics API
#[derive(Debug, Clone)]
pub struct TextAnalyticsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl TextAnalyticsClient {
    /// Create a client from an endpoint, subscription key and language
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            language: language.into(),
        }
    }

    /// Create from a validated configuration
    pub fn from_config(config: &LensConfig) -> Result<Self> {
        let api_key = config
            .text_analytics_key
            .clone()
            .ok_or_else(|| ApiError::Config("text analytics key not configured".to_string()))?;

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.text_analytics_endpoint.clone(),
            api_key,
            language: config.language.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{API_PATH}/{path}", self.endpoint.trim_end_matches('/'))
    }

    fn request_body<'a>(&'a self, text: &'a str) -> AnalyzeRequest<'a> {
        AnalyzeRequest {
            documents: [RequestDocument {
                language: &self.language,
                id: DOCUMENT_ID,
                text,
            }],
        }
    }

    async fn analyze<D: DeserializeOwned>(&self, path: &str, text: &str) -> Result<D> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(KEY_HEADER, &self.api_key)
            .query(&[STRING_INDEX_TYPE])
            .json(&self.request_body(text))
            .send()
            .await?;
        let response = check_status(PROVIDER, response).await?;

        let envelope: AnalyzeResponse<D> = response.json().await?;
        envelope.into_document()
    }

    /// Sentences of `text` with their sentiment
    pub async fn sentences(&self, text: &str) -> Result<Vec<Sentence>> {
        let document: SentimentDocument = self.analyze(SENTIMENT_PATH, text).await?;
        Ok(document.sentences.into_iter().map(Sentence::from).collect())
    }

    /// Entities of every category found in `text`
    pub async fn entities(&self, text: &str) -> Result<Vec<EntityCandidate>> {
        let document: EntitiesDocument = self.analyze(ENTITIES_PATH, text).await?;
        Ok(document
            .entities
            .into_iter()
            .map(EntityCandidate::from)
            .collect())
    }
}

#[async_trait]
impl TextAnalyzer for TextAnalyticsClient {
    async fn classify_sentences(&self, text: &str) -> lens_core::Result<Vec<Sentence>> {
        Ok(self.sentences(text).await?)
    }

    async fn recognize_entities(&self, text: &str) -> lens_core::Result<Vec<EntityCandidate>> {
        Ok(self.entities(text).await?)
    }
}
