//! Report generation over the Bedrock Converse API.
//!
//! Converse has no response-schema parameter, so the report schema is sent
//! as the input schema of a single tool and the model is forced to call it.
//! The tool-use input document is the structured answer. Plain text blocks
//! are accepted as a fallback for models that ignore the tool choice.

use std::collections::HashMap;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SpecificToolChoice,
    SystemContentBlock, Tool, ToolChoice, ToolConfiguration, ToolInputSchema, ToolSpecification,
};
use aws_smithy_types::{Document, Number};
use serde_json::Value;
use tracing::info;

use crate::backend::{BackendFuture, BackendRequest, BackendResponse, ReportBackend};
use crate::client::{BedrockSettings, build_sdk_config};
use crate::error::GenerationError;

/// Name of the forced tool carrying the report.
pub const REPORT_TOOL_NAME: &str = "record_personality_report";

const TEMPERATURE: f32 = 0.7;

/// Bedrock-backed [`ReportBackend`].
pub struct BedrockBackend {
    client: Option<Client>,
    model_id: String,
}

impl BedrockBackend {
    /// Build the backend. Without a configured credential no client is
    /// created and every call fails as unavailable.
    pub async fn connect(settings: &BedrockSettings) -> Self {
        let client = match &settings.credentials {
            Some(creds) => {
                let config = build_sdk_config(&settings.region, creds).await;
                Some(Client::new(&config))
            }
            None => None,
        };
        Self {
            client,
            model_id: settings.model_id.clone(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.client.is_some()
    }

    async fn converse(&self, request: &BackendRequest) -> Result<BackendResponse, GenerationError> {
        let client = self.client.as_ref().ok_or_else(|| {
            GenerationError::Unavailable("no Bedrock credential configured".to_string())
        })?;

        let tool_spec = ToolSpecification::builder()
            .name(REPORT_TOOL_NAME)
            .description("Record the personality report for the user.")
            .input_schema(ToolInputSchema::Json(json_to_document(&request.output_schema)))
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        let tool_choice = SpecificToolChoice::builder()
            .name(REPORT_TOOL_NAME)
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        let tool_config = ToolConfiguration::builder()
            .tools(Tool::ToolSpec(tool_spec))
            .tool_choice(ToolChoice::Tool(tool_choice))
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.user_content.clone()))
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;

        info!(model_id = %self.model_id, "invoking converse");

        let response = client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(request.system_instruction.clone()))
            .messages(message)
            .inference_config(InferenceConfiguration::builder().temperature(TEMPERATURE).build())
            .tool_config(tool_config)
            .send()
            .await
            .map_err(|e| GenerationError::Unavailable(e.into_service_error().to_string()))?;

        let Some(output_message) = response.output().and_then(|o| o.as_message().ok()) else {
            return Ok(BackendResponse::default());
        };

        if let Some(input) = output_message.content().iter().find_map(|block| match block {
            ContentBlock::ToolUse(tool_use) if tool_use.name() == REPORT_TOOL_NAME => {
                Some(tool_use.input())
            }
            _ => None,
        }) {
            let text = serde_json::to_string(&document_to_json(input))
                .map_err(|e| GenerationError::Malformed(e.to_string()))?;
            return Ok(BackendResponse::text(text));
        }

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(t) = block {
                    Some(t.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(BackendResponse {
            text: (!text.is_empty()).then_some(text),
        })
    }
}

impl ReportBackend for BedrockBackend {
    fn name(&self) -> &str {
        &self.model_id
    }

    fn complete<'a>(&'a self, request: &'a BackendRequest) -> BackendFuture<'a> {
        Box::pin(self.converse(request))
    }
}

/// Convert a JSON value into a Smithy document.
pub fn json_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(Number::NegInt(i))
            } else {
                Document::Number(Number::Float(n.as_f64().unwrap_or_default()))
            }
        }
        Value::String(s) => Document::String(s.clone()),
        Value::Array(items) => Document::Array(items.iter().map(json_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

/// Convert a Smithy document into a JSON value. Non-finite floats become null.
pub fn document_to_json(doc: &Document) -> Value {
    match doc {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(Number::PosInt(u)) => Value::from(*u),
        Document::Number(Number::NegInt(i)) => Value::from(*i),
        Document::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Document::String(s) => Value::String(s.clone()),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}
