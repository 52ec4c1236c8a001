//! Crisis phrase detection
//!
//! Runs before lexicon classification. Any hit forces the `red_flag` label.

/// Crisis phrases, checked in order against the lower-cased text
pub const CRISIS_PHRASES: &[&str] = &[
    "i want to die",
    "i don't want to live",
    "i want to kill myself",
    "i will kill myself",
    "i want to hurt myself",
    "i want to end it all",
    "suicide",
    "kill myself",
    "dont want to live",
];

/// Return the first crisis phrase contained in `text`
pub fn matched_phrase(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    CRISIS_PHRASES.iter().copied().find(|p| lowered.contains(p))
}

/// True when `text` contains any crisis phrase
pub fn detect_red_flag(text: &str) -> bool {
    matched_phrase(text).is_some()
}
