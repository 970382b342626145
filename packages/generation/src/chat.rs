// ABOUTME: Conversational refinement of a saved PRD
// ABOUTME: Replies containing markdown headings are treated as a revised PRD and saved

use std::sync::Arc;

use chrono::{DateTime, Utc};
use prdforge_ai::usage_logs::endpoints;
use prdforge_ai::{GenerationPipeline, GenerationSettings};
use prdforge_prompts::{render_with_fields, PromptKind};
use prdforge_storage::PrdStorage;
use serde::Serialize;
use tracing::info;

use crate::error::{GenerationError, Result};
use crate::prompts::{PromptResolver, CHAT_FIELDS};

pub const CHAT_MAX_TOKENS: u32 = 2000;

/// Shown in place of the reply when the PRD was rewritten
pub const PRD_UPDATED_MESSAGE: &str = "PRD가 업데이트되었습니다.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub updated_prd: Option<String>,
    pub ai_provider: String,
    pub timestamp: DateTime<Utc>,
}

/// A reply with a second- or third-level heading is a full PRD revision
pub fn is_prd_revision(reply: &str) -> bool {
    reply.contains("## ") || reply.contains("### ")
}

pub struct PrdChat {
    pipeline: GenerationPipeline,
    prompts: PromptResolver,
    prds: Arc<PrdStorage>,
}

impl PrdChat {
    pub fn new(pipeline: GenerationPipeline, prompts: PromptResolver, prds: Arc<PrdStorage>) -> Self {
        Self {
            pipeline,
            prompts,
            prds,
        }
    }

    pub async fn send(&self, prd_id: &str, message: &str) -> Result<ChatReply> {
        if message.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "메시지를 입력해주세요".to_string(),
            ));
        }

        let prd = self.prds.get(prd_id).await?;
        info!("Chat request for PRD {}", prd.id);

        if !self.pipeline.has_providers() {
            return Err(GenerationError::NoProviderConfigured);
        }

        let template = self.prompts.resolve(PromptKind::ChatRefinement, None).await?;
        let prompt = render_with_fields(
            &template,
            &CHAT_FIELDS,
            &[("currentPrd", prd.content.as_str()), ("message", message)],
        );

        let output = self
            .pipeline
            .generate(
                endpoints::PRD_CHAT,
                &prompt,
                &GenerationSettings::with_max_tokens(CHAT_MAX_TOKENS),
            )
            .await?;

        if is_prd_revision(&output.text) {
            self.prds.update_content(&prd.id, &output.text).await?;
            info!("PRD {} updated from chat", prd.id);

            return Ok(ChatReply {
                response: PRD_UPDATED_MESSAGE.to_string(),
                updated_prd: Some(output.text),
                ai_provider: output.provider,
                timestamp: Utc::now(),
            });
        }

        Ok(ChatReply {
            response: output.text,
            updated_prd: None,
            ai_provider: output.provider,
            timestamp: Utc::now(),
        })
    }
}
