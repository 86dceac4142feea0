use crate::services::llm_provider::ChatMessage;

/// Joins the first `max_chunks` chunks into the context block sent to the model.
pub fn select_context(chunks: &[String], max_chunks: usize) -> (String, usize) {
    let used = chunks.len().min(max_chunks);
    (chunks[..used].join("\n\n"), used)
}

pub fn build_messages(system_prompt: &str, context: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(format!("PDF Content:\n{context}\n\nQuestion: {question}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm_provider::Role;

    #[test]
    fn test_select_context_takes_prefix() {
        let chunks = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        assert_eq!(select_context(&chunks, 2), ("one\n\ntwo".to_string(), 2));
    }

    #[test]
    fn test_select_context_with_fewer_chunks_than_budget() {
        let chunks = vec!["only".to_string()];
        assert_eq!(select_context(&chunks, 4), ("only".to_string(), 1));
    }

    #[test]
    fn test_build_messages_layout() {
        let messages = build_messages("be helpful", "page text", "What is it?");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "be helpful");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "PDF Content:\npage text\n\nQuestion: What is it?"
        );
    }
}
