use crate::domain::response::GatewayResponse;

/// Joins message components in the order the gateway's operators expect to read them.
pub const MESSAGE_SEPARATOR: &str = " | ";

/// The gateway's way of saying "no messages".
const EMPTY_LIST: &str = "[ ]";

/// Outcome of a single gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub success: bool,
    pub message: String,
    /// `errorCode`, present only when the call failed.
    pub code: Option<i64>,
}

/// Classifies one response.
///
/// Success is `errorCode == 0`, and its message is the gateway's status string (`OK`).
/// On failure, the top-level `errorMessage` and the data block's action description
/// are both kept, in that order, skipping whichever is blank.
pub fn classify(response: &GatewayResponse) -> Classification {
    let error_message = response.error_message_text();
    let action_description = response.action_description_text();

    if response.is_success() {
        let message = [error_message, action_description]
            .into_iter()
            .flatten()
            .find(|m| is_meaningful(m))
            .unwrap_or_default()
            .to_string();
        Classification {
            success: true,
            message,
            code: None,
        }
    } else {
        Classification {
            success: false,
            message: join_messages([error_message, action_description]),
            code: Some(response.error_code),
        }
    }
}

/// Joins the meaningful parts with [`MESSAGE_SEPARATOR`], keeping their order.
pub fn join_messages<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|m| is_meaningful(m))
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR)
}

fn is_meaningful(message: &str) -> bool {
    let trimmed = message.trim();
    !trimmed.is_empty() && trimmed != EMPTY_LIST
}
