use async_trait::async_trait;
use futures::Stream;
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::Serialize;
use serde_json::Value;
use snafu::{ResultExt, Snafu};
use std::{pin::Pin, sync::Arc};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    generation::{
        CountTokensRequest, CountTokensResponse, GenerateContentRequest,
        GenerateContentResponse, GenerateContentStreamRequest, GenerativeModel, ResponseError,
    },
    models::ContentError,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to parse API key"))]
    InvalidApiKey { source: InvalidHeaderValue },

    #[snafu(display("failed to build HTTP client"))]
    BuildClient { source: reqwest::Error },

    #[snafu(display("failed to construct URL for operation '{operation}'"))]
    ConstructUrl {
        source: url::ParseError,
        operation: String,
    },

    #[snafu(display("operation '{operation}' resolves outside the API base URL: {url}"))]
    OperationOutsideBase { operation: String, url: Url },

    #[snafu(display("failed to perform request to '{url}'"))]
    PerformRequest { source: reqwest::Error, url: Url },

    #[snafu(display(
        "bad response from server; code {code}; description: {}",
        description.as_deref().unwrap_or("none")
    ))]
    BadResponse {
        /// HTTP status code
        code: u16,
        description: Option<String>,
    },

    #[snafu(display("failed to read response body"))]
    DecodeResponse { source: reqwest::Error },

    #[snafu(display("failed to serialize request payload"))]
    SerializePayload { source: serde_json::Error },

    #[snafu(display("failed to deserialize response body"))]
    Deserialize { source: serde_json::Error },

    #[snafu(display("invalid request content"))]
    InvalidContent { source: ContentError },

    #[snafu(display("invalid response"))]
    InvalidResponse { source: ResponseError },
}

/// Stream of partial responses produced by `streamGenerateContent`
pub type GenerationStream = Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, Error>> + Send>>;

/// Model resource names understood by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Model {
    #[default]
    Gemini25Flash,
    Gemini25Pro,
    Gemini20Flash,
    Gemini15Flash,
    Gemini15Pro,
    GeminiPro,
    GeminiProVision,
    TextBison001,
    Embedding001,
    Aqa,
    /// Any other model, see [`Model::custom`]
    Custom(CustomModel),
}

/// Resource name of a model without a dedicated [`Model`] variant.
///
/// Only built through [`Model::custom`], so the name always carries a resource prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomModel(String);

impl CustomModel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Model {
    const KNOWN: [Model; 10] = [
        Model::Gemini25Flash,
        Model::Gemini25Pro,
        Model::Gemini20Flash,
        Model::Gemini15Flash,
        Model::Gemini15Pro,
        Model::GeminiPro,
        Model::GeminiProVision,
        Model::TextBison001,
        Model::Embedding001,
        Model::Aqa,
    ];

    /// Resolve a model by name, prefixing `models/` when the name has no resource prefix.
    ///
    /// Names of known models resolve to their dedicated variant.
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.contains('/') {
            name
        } else {
            format!("models/{name}")
        };
        Self::KNOWN
            .into_iter()
            .find(|model| model.as_str() == name)
            .unwrap_or(Model::Custom(CustomModel(name)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "models/gemini-2.5-flash",
            Model::Gemini25Pro => "models/gemini-2.5-pro",
            Model::Gemini20Flash => "models/gemini-2.0-flash",
            Model::Gemini15Flash => "models/gemini-1.5-flash",
            Model::Gemini15Pro => "models/gemini-1.5-pro",
            Model::GeminiPro => "models/gemini-pro",
            Model::GeminiProVision => "models/gemini-pro-vision",
            Model::TextBison001 => "models/text-bison-001",
            Model::Embedding001 => "models/embedding-001",
            Model::Aqa => "models/aqa",
            Model::Custom(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        Model::custom(name)
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Model::custom(name)
    }
}

impl Serialize for Model {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A request object that knows where and how it is sent.
pub trait ApiRequest {
    /// Operation path relative to the API base, e.g. `models/gemini-pro:generateContent`
    fn operation(&self) -> String;

    fn http_method(&self) -> Method {
        Method::POST
    }

    /// Serialized JSON body
    fn http_payload(&self) -> Result<String, serde_json::Error>;
}

/// Transport-level view of a request: everything a [`Transport`] needs to dispatch it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub operation: String,
    pub method: Method,
    pub payload: String,
}

impl HttpRequest {
    pub fn from_api_request(request: &impl ApiRequest) -> Result<Self, Error> {
        Ok(Self {
            operation: request.operation(),
            method: request.http_method(),
            payload: request.http_payload().context(SerializePayloadSnafu)?,
        })
    }
}

/// Sends a request and returns the raw response body.
///
/// Implementations own base URL, authentication, timeouts and status mapping.
/// Whatever error they return is handed to the caller as is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<String, Error>;
}

/// Default [`Transport`] backed by `reqwest`
pub struct HttpTransport {
    http_client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport talking to the public Gemini endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        let base_url = Url::parse(DEFAULT_BASE_URL).context(ConstructUrlSnafu {
            operation: DEFAULT_BASE_URL,
        })?;
        Self::with_base_url(api_key, base_url)
    }

    /// Create a transport with a custom base URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: Url) -> Result<Self, Error> {
        let api_key: String = api_key.into();
        let mut api_key = HeaderValue::from_str(&api_key).context(InvalidApiKeySnafu)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http_client = Client::builder()
            .default_headers(headers)
            .build()
            .context(BuildClientSnafu)?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn build_url(&self, operation: &str) -> Result<Url, Error> {
        let url = self
            .base_url
            .join(operation)
            .context(ConstructUrlSnafu { operation })?;
        // `name:op` with no path prefix parses as an absolute URL with scheme `name`
        snafu::ensure!(
            url.scheme() == self.base_url.scheme()
                && url.host_str() == self.base_url.host_str()
                && url.port_or_known_default() == self.base_url.port_or_known_default()
                && url.path().starts_with(self.base_url.path()),
            OperationOutsideBaseSnafu { operation, url }
        );
        Ok(url)
    }

    async fn check_response(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if !status.is_success() {
            let description = response.text().await.ok();
            warn!(status = status.as_u16(), "request rejected by server");
            BadResponseSnafu {
                code: status.as_u16(),
                description,
            }
            .fail()
        } else {
            Ok(response)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, Error> {
        let url = self.build_url(&request.operation)?;
        debug!(%url, method = %request.method, "dispatching request");

        let response = self
            .http_client
            .request(request.method, url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(request.payload)
            .send()
            .await
            .context(PerformRequestSnafu { url })?;

        let response = Self::check_response(response).await?;
        response.text().await.context(DecodeResponseSnafu)
    }
}

/// Client for the Gemini API
#[derive(Clone)]
pub struct Gemini {
    transport: Arc<dyn Transport>,
}

impl Gemini {
    /// Create a new client with the specified API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::new(api_key)?))
    }

    /// Create a new client with a custom base URL
    pub fn with_base_url(api_key: impl Into<String>, base_url: Url) -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::with_base_url(
            api_key, base_url,
        )?))
    }

    /// Create a client on top of any transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Start configuring a model
    pub fn generative_model(&self, model: impl Into<Model>) -> GenerativeModel {
        GenerativeModel::new(self.clone(), model.into())
    }

    async fn execute(&self, request: &impl ApiRequest) -> Result<Value, Error> {
        let request = HttpRequest::from_api_request(request)?;
        let body = self.transport.send(request).await?;
        serde_json::from_str(&body).context(DeserializeSnafu)
    }

    /// Generate content
    #[instrument(skip_all, fields(
        model = %request.model(),
        contents.count = request.contents().len(),
    ))]
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, Error> {
        let value = self.execute(&request).await?;
        let response = GenerateContentResponse::from_value(value).context(InvalidResponseSnafu)?;
        debug!(
            candidates.count = response.candidates.len(),
            "content generated"
        );
        Ok(response)
    }

    /// Generate content as a stream of partial responses.
    ///
    /// The request is dispatched when the stream is first polled; transport
    /// failures surface as the first item.
    pub fn generate_content_stream(
        &self,
        request: GenerateContentStreamRequest,
    ) -> Result<GenerationStream, Error> {
        let request = HttpRequest::from_api_request(&request)?;
        Ok(Box::pin(response_stream(self.transport.clone(), request)))
    }

    /// Count the tokens of a prompt
    #[instrument(skip_all, fields(
        model = %request.model(),
        contents.count = request.contents().len(),
    ))]
    pub async fn count_tokens(
        &self,
        request: CountTokensRequest,
    ) -> Result<CountTokensResponse, Error> {
        let value = self.execute(&request).await?;
        serde_json::from_value(value).context(DeserializeSnafu)
    }
}

fn response_stream(
    transport: Arc<dyn Transport>,
    request: HttpRequest,
) -> impl Stream<Item = Result<GenerateContentResponse, Error>> + Send {
    async_stream::try_stream! {
        let body = transport.send(request).await?;
        // Without `alt=sse` the endpoint answers with one JSON array of chunks.
        let chunks: Vec<Value> = serde_json::from_str(&body).context(DeserializeSnafu)?;
        debug!(chunks.count = chunks.len(), "received streamed response");

        for chunk in chunks {
            yield GenerateContentResponse::from_value(chunk).context(InvalidResponseSnafu)?;
        }
    }
}
