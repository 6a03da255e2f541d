//! Message conversion for the OpenAI API.

use webpilot_protocols::CompletionRequest;
use webpilot_protocols::types::{ContentPart as ProtoContentPart, Message, MessageContent, MessageRole};

use crate::api::{ApiMessage, ContentPart, ImageUrl, MessageContent as ApiMessageContent};

/// Convert a request's system prompt and messages to OpenAI API format.
pub fn convert_messages(request: &CompletionRequest) -> Vec<ApiMessage> {
    let system = request.system.as_ref().map(|system| ApiMessage {
        role: "system".to_string(),
        content: ApiMessageContent::Text(system.clone()),
    });
    system
        .into_iter()
        .chain(request.messages.iter().map(convert_message))
        .collect()
}

fn convert_message(msg: &Message) -> ApiMessage {
    let role = match msg.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };

    let content = match &msg.content {
        MessageContent::Text(text) => ApiMessageContent::Text(text.clone()),
        MessageContent::Parts(parts) => ApiMessageContent::Parts(convert_parts(parts)),
    };

    ApiMessage {
        role: role.to_string(),
        content,
    }
}

fn convert_parts(parts: &[ProtoContentPart]) -> Vec<ContentPart> {
    parts
        .iter()
        .map(|part| match part {
            ProtoContentPart::Text { text } => ContentPart::Text { text: text.clone() },
            ProtoContentPart::Image { media_type, data } => ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{}", media_type, data),
                },
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_goes_first() {
        let request = CompletionRequest::new("m", vec![Message::user("hello")]).with_system("be brief");
        let messages = convert_messages(&request);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(matches!(&messages[0].content, ApiMessageContent::Text(t) if t == "be brief"));
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_no_system_prompt() {
        let request = CompletionRequest::new(
            "m",
            vec![Message::user("q"), Message::assistant("a")],
        );
        let messages = convert_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, "assistant");
    }

    #[test]
    fn test_image_becomes_data_url() {
        let request = CompletionRequest::new(
            "m",
            vec![Message::user_with_image("image/png", "QUJD", "what is this?")],
        );
        let messages = convert_messages(&request);

        let ApiMessageContent::Parts(parts) = &messages[0].content else {
            panic!("expected parts");
        };
        assert!(matches!(
            &parts[0],
            ContentPart::ImageUrl { image_url } if image_url.url == "data:image/png;base64,QUJD"
        ));
        assert!(matches!(&parts[1], ContentPart::Text { text } if text == "what is this?"));
    }
}
