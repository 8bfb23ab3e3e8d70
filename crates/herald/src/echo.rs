//! A deterministic local generator for dry runs and development.

use async_trait::async_trait;
use herald_error::HeraldResult;
use herald_interface::{ContentGenerator, Draft, DraftRequest};

/// Generator that composes drafts from the brand profile itself instead of
/// calling a model.
///
/// Useful for running the full pipeline (scheduling, review, publishing)
/// without an API key; the drafts are template-grade but carry the brand's
/// key messages so review screens have something real to show.
#[derive(Debug, Clone, Default)]
pub struct EchoGenerator;

impl EchoGenerator {
    /// Create an echo generator.
    pub fn new() -> Self {
        Self
    }

    fn compose(req: &DraftRequest, lead: &str) -> Draft {
        let message = req
            .brand
            .key_messages
            .first()
            .cloned()
            .unwrap_or_else(|| format!("what {} is building", req.brand.name));

        let mut text = format!("{} {}: {}", lead, req.brand.name, message);
        if let Some(prompt) = &req.prompt {
            text.push_str(&format!(" ({})", prompt));
        }

        let hashtags = vec![
            req.brand.industry.replace(' ', ""),
            req.platform.to_string(),
        ];

        Draft {
            text,
            hashtags,
            image_url: None,
            image_prompt: None,
            image_error: req
                .want_image
                .then(|| "echo generator does not produce images".to_string()),
        }
    }
}

#[async_trait]
impl ContentGenerator for EchoGenerator {
    async fn generate(&self, req: &DraftRequest) -> HeraldResult<Draft> {
        Ok(Self::compose(req, "From"))
    }

    async fn regenerate(
        &self,
        _previous_text: &str,
        feedback: &str,
        req: &DraftRequest,
    ) -> HeraldResult<Draft> {
        let mut draft = Self::compose(req, "Revisiting");
        draft.text.push_str(&format!(" — {}", feedback));
        Ok(draft)
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use herald_core::{BrandId, BrandProfile, Platform};

    fn request(want_image: bool) -> DraftRequest {
        DraftRequest {
            brand: BrandProfile {
                id: BrandId::new(),
                name: "Acme".into(),
                industry: "robotics".into(),
                voice_tone: vec![],
                target_audience: "operators".into(),
                key_messages: vec!["uptime you can trust".into()],
                do_not_mention: vec![],
                approver_emails: vec![],
                schedule: None,
                created_at: Utc::now(),
            },
            platform: Platform::LinkedIn,
            media_context: None,
            prompt: None,
            previous_samples: vec![],
            want_image,
        }
    }

    #[tokio::test]
    async fn drafts_carry_brand_key_messages() {
        let draft = EchoGenerator::new().generate(&request(false)).await.unwrap();
        assert!(draft.text.contains("uptime you can trust"));
        assert!(draft.image_error.is_none());
    }

    #[tokio::test]
    async fn image_requests_fail_independently_of_text() {
        let draft = EchoGenerator::new().generate(&request(true)).await.unwrap();
        assert!(!draft.text.is_empty());
        assert!(draft.image_url.is_none());
        assert!(draft.image_error.is_some());
    }
}
