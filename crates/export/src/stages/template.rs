//! Chat template passthrough.

use crate::io::ConfigDocument;

/// First string `chat_template` among the documents, in order.
pub fn extract_chat_template(documents: &[&ConfigDocument]) -> Option<String> {
    documents
        .iter()
        .find_map(|document| document.chat_template())
        .map(str::to_string)
}
