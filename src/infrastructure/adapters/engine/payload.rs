//! Gemini 请求体
//!
//! 字段名与远端 REST 接口保持一致（camelCase），
//! 唯一的例外是 `google_search` 工具声明。

use base64::Engine;
use serde::Serialize;

use crate::application::ports::{ImageRequest, InlineAttachment, SpeechRequest, TextGenerationRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<RequestInlineData>,
}

impl RequestPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(attachment: &InlineAttachment) -> Self {
        Self {
            text: None,
            inline_data: Some(RequestInlineData {
                mime_type: attachment.mime_type.clone(),
                data: base64::engine::general_purpose::STANDARD.encode(&attachment.data),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
pub(crate) struct GoogleSearch {}

/// generateContent 文本请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextPayload {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent>,
}

impl From<&TextGenerationRequest> for TextPayload {
    fn from(request: &TextGenerationRequest) -> Self {
        let mut parts = vec![RequestPart::text(request.prompt.clone())];
        if let Some(attachment) = &request.attachment {
            parts.push(RequestPart::inline(attachment));
        }

        Self {
            contents: vec![RequestContent { parts }],
            tools: request.web_search.then(|| {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            }),
            system_instruction: request.system_instruction.as_ref().map(|text| RequestContent {
                parts: vec![RequestPart::text(text.clone())],
            }),
        }
    }
}

/// generateContent 语音请求
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeechPayload {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    response_modalities: Vec<&'static str>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrebuiltVoiceConfig {
    voice_name: String,
}

impl SpeechPayload {
    pub(crate) fn new(request: &SpeechRequest, model: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart::text(request.text.clone())],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: request.voice_name.clone(),
                        },
                    },
                },
            },
            model: model.to_string(),
        }
    }
}

/// Imagen predict 请求
#[derive(Debug, Serialize)]
pub(crate) struct ImagePayload {
    instances: ImageInstance,
    parameters: ImageParameters,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageParameters {
    sample_count: u32,
}

impl From<&ImageRequest> for ImagePayload {
    fn from(request: &ImageRequest) -> Self {
        Self {
            instances: ImageInstance {
                prompt: request.prompt.clone(),
            },
            parameters: ImageParameters {
                sample_count: request.sample_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grounded_text_payload() {
        let request = TextGenerationRequest::new("Define FinOps")
            .with_system_instruction("Be brief.")
            .with_web_search();

        let value = serde_json::to_value(TextPayload::from(&request)).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Define FinOps"}]}],
                "tools": [{"google_search": {}}],
                "systemInstruction": {"parts": [{"text": "Be brief."}]}
            })
        );
    }

    #[test]
    fn test_text_payload_without_tools() {
        let request = TextGenerationRequest::new("quantum").with_system_instruction("Satire.");

        let value = serde_json::to_value(TextPayload::from(&request)).unwrap();

        assert!(value.get("tools").is_none());
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "Satire.");
    }

    #[test]
    fn test_text_payload_with_attachment() {
        let request = TextGenerationRequest::new("Transcribe").with_attachment(InlineAttachment {
            mime_type: "audio/wav".to_string(),
            data: vec![0, 1, 2],
        });

        let value = serde_json::to_value(TextPayload::from(&request)).unwrap();

        assert_eq!(
            value["contents"][0]["parts"][1],
            json!({"inlineData": {"mimeType": "audio/wav", "data": "AAEC"}})
        );
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_speech_payload() {
        let request = SpeechRequest {
            text: "Hello".to_string(),
            voice_name: "Fenrir".to_string(),
        };

        let value =
            serde_json::to_value(SpeechPayload::new(&request, "gemini-2.5-flash-preview-tts")).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Hello"}]}],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {"voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Fenrir"}}}
                },
                "model": "gemini-2.5-flash-preview-tts"
            })
        );
    }

    #[test]
    fn test_image_payload() {
        let request = ImageRequest {
            prompt: "a data lake".to_string(),
            sample_count: 1,
        };

        let value = serde_json::to_value(ImagePayload::from(&request)).unwrap();

        assert_eq!(
            value,
            json!({"instances": {"prompt": "a data lake"}, "parameters": {"sampleCount": 1}})
        );
    }
}
