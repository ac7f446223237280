#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Prediction,
    About,
    Unknown,
}

/// Checked top to bottom; the first rule with a matching keyword wins.
const INTENT_RULES: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hello", "hi"]),
    (Intent::Prediction, &["yield", "predict"]),
    (Intent::About, &["about"]),
];

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    INTENT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| msg_lower.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}

pub fn generate_reply(user_msg: &str) -> String {
    use Intent::*;

    match detect_intent(user_msg) {
        Greeting => "Hello! How can I help you with crop yield information today?".to_string(),
        Prediction => "You can get a crop yield prediction on our 'Prediction' page.".to_string(),
        About => "We are AI Crop Yield, a project to help farmers estimate their crop yields using modern technology.".to_string(),
        Unknown => format!(
            "I'm a demo bot. I don't have real AI capabilities yet. You said: {}",
            user_msg
        ),
    }
}
