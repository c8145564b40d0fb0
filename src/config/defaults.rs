pub fn default_version() -> u32 {
    1
}

pub fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

pub fn default_model() -> String {
    "gemma2-9b-it".to_string()
}

pub fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}
