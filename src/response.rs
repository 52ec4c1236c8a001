//! Canned replies per mood label

use crate::types::MoodLabel;
use serde::Serialize;

/// Link included in every crisis reply
pub const CRISIS_RESOURCES_URL: &str = "https://www.opencounseling.com/suicide-hotlines";

const CRISIS_MESSAGE: &str = "If you are in immediate danger, please contact local emergency \
services or a crisis hotline. Here are some resources: \
https://www.opencounseling.com/suicide-hotlines";

const NEGATIVE_MESSAGE: &str =
    "I'm sorry you're feeling this way. Would you like a quick grounding exercise or a breathing tip?";

const POSITIVE_MESSAGE: &str = "That's great to hear, keep it up!";

const NEUTRAL_MESSAGE: &str = "Thanks for sharing. Do you want to tell me more?";

/// Reply shown to the user after a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Response {
    pub message: &'static str,
    pub is_crisis: bool,
}

/// Pick the static reply for a label
pub fn respond(label: MoodLabel) -> Response {
    let message = match label {
        MoodLabel::RedFlag => CRISIS_MESSAGE,
        MoodLabel::Negative => NEGATIVE_MESSAGE,
        MoodLabel::Positive => POSITIVE_MESSAGE,
        MoodLabel::Neutral => NEUTRAL_MESSAGE,
    };

    Response {
        message,
        is_crisis: label.is_crisis(),
    }
}
