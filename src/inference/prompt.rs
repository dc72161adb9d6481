//! Prompt construction and reply extraction.
//!
//! The generation service continues a plain-text dialogue. A prompt is the
//! rendered context turns followed by the new user line and a bare assistant
//! cue:
//!
//! ```text
//! User: <older question>
//! Assistant: <older answer>
//! User: <new question>
//! Assistant:
//! ```
//!
//! The service usually echoes the prompt before its continuation and may keep
//! inventing further dialogue. [`extract_reply`] reads the output as:
//!
//! ```text
//! output := anything "Assistant:" tail | tail
//! tail   := reply ["User:" anything]
//! ```
//!
//! where the `Assistant:` cue is the last one in the output (the whole output
//! is the tail when there is none), and `reply` stops at the first `User:`.

/// Marks a user line. Must match the service's echo verbatim.
pub const USER_CUE: &str = "User:";

/// Marks an assistant line. Must match the service's echo verbatim.
pub const ASSISTANT_CUE: &str = "Assistant:";

/// Appended to replies cut by [`truncate_reply`].
pub const ELLIPSIS: &str = "...";

pub fn build_prompt(context: &[String], text: &str) -> String {
    let mut lines: Vec<String> = context.to_vec();
    lines.push(format!("{USER_CUE} {text}"));
    lines.push(ASSISTANT_CUE.to_string());
    lines.join("\n")
}

/// Pulls the assistant reply out of raw service output.
///
/// Returns an empty string when the service produced nothing usable.
pub fn extract_reply(raw: &str) -> String {
    let tail = raw
        .rfind(ASSISTANT_CUE)
        .map_or(raw, |at| &raw[at + ASSISTANT_CUE.len()..]);

    let reply = tail.find(USER_CUE).map_or(tail, |at| &tail[..at]);

    reply.trim().to_string()
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with [`ELLIPSIS`].
pub fn truncate_reply(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{ELLIPSIS}", &text[..byte_index]),
        None => text.to_string(),
    }
}
