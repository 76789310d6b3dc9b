pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod pipeline;
pub mod schema;
pub mod session;
pub mod utils;
pub mod validator;

pub use catalog::{
    CatalogError, LanguageOption, ProviderCatalog, ProviderCategory, ProviderEntry, Variant,
};
pub use client::{
    extract_error_message, AgentSubmitter, CreatedAgent, DryRunSubmitter, DynSubmitter,
    SubmissionError,
};
#[cfg(feature = "http-client")]
pub use client::HttpSubmissionClient;
pub use config::{ApiConfig, BuilderConfig, EnvConfig};
pub use draft::{
    AnalyticKind, AnalyticKindTag, CallPolicy, CustomAnalytic, Draft, DraftLimits, EnumValue,
    FaqBlock, Identity, LlmSettings, PostCallSettings, ProviderChoice, TaskToggle,
    TranscriptionSettings, VoiceSettings,
};
pub use error::{BuilderError, Result};
pub use normalize::{
    normalize, normalize_with, Domain, LlmConfig, ProviderConfig, SynthesizerConfig,
    TranscriberConfig, VoiceProviderKind,
};
pub use payload::{compile, serialize, Payload};
pub use pipeline::{assemble, assemble_with, Task, TaskPipeline, TaskPipelineBuilder, TaskType};
pub use schema::{register_schema, validate_schema, Schema, SchemaError, SchemaKind, SchemaRegistry};
pub use session::BuilderSession;
pub use utils::{logging, validation, LoggingConfig};
pub use validator::{validate, validate_for_submit, BuilderTab, SubmitValidation, TabValidation};
