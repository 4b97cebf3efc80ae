/// Appended to every prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with JSON only. Do not wrap it in markdown \
and do not add commentary before or after it.";
