/// Quick-pick prompts offered in the review surface
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Summarize the key themes",
    "Proofread and correct grammar",
    "Rewrite in a more engaging tone",
    "Extract key entities",
];

/// Build the final prompt sent to the model: the field's formatted
/// content as context, then the user's request.
pub fn build_review_prompt(prompt: &str, context_data: &str) -> String {
    format!(
        "Context Data:\n{}\n\nUser Request:\n{}",
        context_data, prompt
    )
}
