//! Prompt templates sent to the chat model.

use docent_model::{Conversation, Message, Role};

/// System instruction for the artwork-only classifier. The model must answer
/// with the single word `True` or `False`.
pub const CLASSIFIER_INSTRUCTION: &str = "\
You route questions for a museum guide. Decide whether the user's question can be answered \
using only the descriptions of individual artworks (what a specific work depicts, its \
materials, dimensions, date, or the story told about it), or whether it also needs general \
knowledge about artists, art movements, history, or the museum itself.\n\
Reply with exactly one word: True if artwork descriptions alone are enough, False otherwise.";

/// System instruction for rewriting the last user turn into a standalone query.
pub const REWRITE_INSTRUCTION: &str = "\
You rewrite the last message of a conversation so it can be understood without the rest of \
the conversation. Replace pronouns and elliptical references with the subject they refer to \
in earlier turns. Keep the language and intent of the original message. If the message is \
already self-contained, return it unchanged.\n\
Reply with the rewritten message only, without quotes or explanations.";

/// System instruction for keyword extraction.
pub const KEYWORD_INSTRUCTION: &str = "\
Extract the search keywords from the user's question: titles of works, names of artists, \
places, periods, and techniques. Reply with the keywords separated by commas and nothing else.";

/// Header of the system message that carries retrieved documents.
pub const GROUNDING_HEADER: &str = "\
Answer the user's next question using the reference data below. Each entry starts with \
`data<N>:` and ends with `//`. Prefer the reference data over your own knowledge, and say so \
when it does not contain the answer.";

/// Prompt for the opening greeting of a session.
pub const GREETING_INSTRUCTION: &str = "\
You are a friendly docent in an art museum. Greet the visitor in two or three sentences and \
invite them to ask about any artwork in the collection.";

/// System instruction for summaries.
pub const SUMMARY_INSTRUCTION: &str = "\
You summarise texts about art for museum visitors. Keep names, titles, and dates. \
Reply with a summary of at most three sentences.";

/// Messages asking the classifier to judge `query`.
pub fn classifier_messages(query: &str) -> Conversation {
    vec![Message::system(CLASSIFIER_INSTRUCTION), Message::user(query)]
}

/// Messages asking the model to rewrite the last turn of `history`.
///
/// System turns are left out of the transcript.
pub fn rewrite_messages(history: &[Message]) -> Conversation {
    let transcript = history
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    vec![
        Message::system(REWRITE_INSTRUCTION),
        Message::user(format!(
            "Conversation:\n{transcript}\n\nRewrite the last {} message.",
            Role::User
        )),
    ]
}

/// Messages asking for the keywords of `query`.
pub fn keyword_messages(query: &str) -> Conversation {
    vec![Message::system(KEYWORD_INSTRUCTION), Message::user(query)]
}

/// The system message injected before the final user turn.
pub fn grounding_message(context: &str) -> Message {
    Message::system(format!("{GROUNDING_HEADER}\n\n{context}"))
}

pub fn greeting_messages() -> Conversation {
    vec![Message::system(GREETING_INSTRUCTION)]
}

pub fn summary_messages(text: &str) -> Conversation {
    vec![
        Message::system(SUMMARY_INSTRUCTION),
        Message::user(format!("Summarise this text:\n\n{text}")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_messages_embed_history() {
        let history = vec![
            Message::system("internal"),
            Message::user("What is the Night Watch?"),
            Message::assistant("A painting by Rembrandt."),
            Message::user("When was it painted?"),
        ];

        let messages = rewrite_messages(&history);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);

        let prompt = &messages[1].content;
        assert!(prompt.contains("user: What is the Night Watch?"));
        assert!(prompt.contains("assistant: A painting by Rembrandt."));
        assert!(prompt.contains("user: When was it painted?"));
        assert!(!prompt.contains("internal"));
    }

    #[test]
    fn test_grounding_message_carries_context() {
        let message = grounding_message("data1: Mona Lisa//");
        assert_eq!(message.role, Role::System);
        assert!(message.content.ends_with("data1: Mona Lisa//"));
    }

    #[test]
    fn test_classifier_messages() {
        let messages = classifier_messages("Who painted it?");
        assert_eq!(messages[0].content, CLASSIFIER_INSTRUCTION);
        assert_eq!(messages[1], Message::user("Who painted it?"));
    }
}
