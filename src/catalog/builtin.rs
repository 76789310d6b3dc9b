use super::{ProviderCatalog, ProviderEntry, Variant};

pub const CATALOG_VERSION: &str = "2024.11";

pub(super) fn catalog() -> ProviderCatalog {
    ProviderCatalog {
        version: CATALOG_VERSION.to_string(),
        llm: llm_providers(),
        voice: voice_providers(),
        transcription: transcription_providers(),
    }
}

fn llm_providers() -> Vec<ProviderEntry> {
    vec![
        ProviderEntry::new("openai")
            .with_label("OpenAI")
            .with_variant(Variant::new("gpt-4o-mini").with_label("GPT-4o mini").with_family("openai"))
            .with_variant(Variant::new("gpt-4o").with_label("GPT-4o").with_family("openai"))
            .with_variant(Variant::new("gpt-4.1-mini").with_label("GPT-4.1 mini").with_family("openai"))
            .with_variant(Variant::new("gpt-4.1").with_label("GPT-4.1").with_family("openai"))
            .with_variant(Variant::new("gpt-3.5-turbo").with_label("GPT-3.5 Turbo").with_family("openai"))
            .with_default_variant("gpt-4o-mini"),
        ProviderEntry::new("azure")
            .with_label("Azure OpenAI")
            .with_variant(Variant::new("gpt-4o-mini").with_label("GPT-4o mini").with_family("openai"))
            .with_variant(Variant::new("gpt-4o").with_label("GPT-4o").with_family("openai"))
            .with_default_variant("gpt-4o-mini"),
        ProviderEntry::new("groq")
            .with_label("Groq")
            .with_variant(
                Variant::new("llama-3.3-70b-versatile")
                    .with_label("Llama 3.3 70B")
                    .with_family("llama"),
            )
            .with_variant(
                Variant::new("llama-3.1-8b-instant")
                    .with_label("Llama 3.1 8B")
                    .with_family("llama"),
            )
            .with_default_variant("llama-3.3-70b-versatile"),
        ProviderEntry::new("deepseek")
            .with_label("DeepSeek")
            .with_variant(Variant::new("deepseek-chat").with_label("DeepSeek Chat").with_family("deepseek")),
    ]
}

fn voice_providers() -> Vec<ProviderEntry> {
    vec![
        ProviderEntry::new("elevenlabs")
            .with_label("ElevenLabs")
            .with_variant(Variant::new("eleven_turbo_v2_5").with_label("Turbo v2.5"))
            .with_variant(Variant::new("eleven_flash_v2_5").with_label("Flash v2.5"))
            .with_variant(Variant::new("eleven_multilingual_v2").with_label("Multilingual v2"))
            .with_default_variant("eleven_turbo_v2_5"),
        ProviderEntry::new("cartesia")
            .with_label("Cartesia")
            .with_variant(Variant::new("sonic-2").with_label("Sonic 2"))
            .with_variant(Variant::new("sonic-english").with_label("Sonic English"))
            .with_default_variant("sonic-2"),
        ProviderEntry::new("polly")
            .with_label("Amazon Polly")
            .with_variant(Variant::new("neural").with_label("Neural"))
            .with_variant(Variant::new("generative").with_label("Generative"))
            .with_variant(Variant::new("standard").with_label("Standard"))
            .with_default_variant("neural"),
        ProviderEntry::new("azuretts")
            .with_label("Azure TTS")
            .with_variant(Variant::new("neural").with_label("Neural"))
            .with_default_variant("neural"),
        ProviderEntry::new("deepgram")
            .with_label("Deepgram Aura")
            .with_variant(Variant::new("aura-2").with_label("Aura 2"))
            .with_variant(Variant::new("aura").with_label("Aura"))
            .with_default_variant("aura-2"),
    ]
}

fn transcription_providers() -> Vec<ProviderEntry> {
    vec![
        ProviderEntry::new("deepgram")
            .with_label("Deepgram")
            .with_variant(Variant::new("nova-3").with_label("Nova 3"))
            .with_variant(Variant::new("nova-2").with_label("Nova 2"))
            .with_variant(Variant::new("nova-2-phonecall").with_label("Nova 2 Phonecall"))
            .with_default_variant("nova-3")
            .with_language("English", "en")
            .with_language("Hindi", "hi")
            .with_language("Spanish", "es")
            .with_language("French", "fr")
            .with_language("German", "de")
            .with_language("Multilingual", "multi")
            .with_default_language("en"),
        ProviderEntry::new("azure")
            .with_label("Azure Speech")
            .with_variant(Variant::new("azure").with_label("Azure"))
            .with_language("English (US)", "en-US")
            .with_language("English (India)", "en-IN")
            .with_language("Hindi", "hi-IN")
            .with_language("Spanish", "es-ES")
            .with_default_language("en-US"),
        ProviderEntry::new("sarvam")
            .with_label("Sarvam")
            .with_variant(Variant::new("saarika:v2").with_label("Saarika v2"))
            .with_language("English (India)", "en-IN")
            .with_language("Hindi", "hi-IN")
            .with_language("Tamil", "ta-IN")
            .with_language("Telugu", "te-IN")
            .with_default_language("hi-IN"),
    ]
}
