//! Language models: identifier resolution and the built-in rule pipeline.

use serde::{Deserialize, Serialize};

use super::{Parsed, Pipeline, SentenceSpan, sentences, tokens};
use crate::dictionaries::abbreviations::is_english_abbreviation;
use crate::error::ModelError;

/// Model used when no configuration selects one.
pub const DEFAULT_MODEL: &str = "en_core_web_sm";

/// Languages the rule pipeline knows how to segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English: abbreviation-aware splitting and clitic tokenization.
    English,
    /// German.
    German,
    /// Modern and ancient Greek.
    Greek,
    /// Spanish.
    Spanish,
    /// French.
    French,
    /// Hebrew.
    Hebrew,
    /// Italian.
    Italian,
    /// Dutch.
    Dutch,
    /// Portuguese.
    Portuguese,
    /// Russian.
    Russian,
    /// Language-neutral rules (`xx_*` models).
    Multilingual,
}

impl Language {
    /// Every supported language.
    pub const ALL: &'static [Self] = &[
        Self::English,
        Self::German,
        Self::Greek,
        Self::Spanish,
        Self::French,
        Self::Hebrew,
        Self::Italian,
        Self::Dutch,
        Self::Portuguese,
        Self::Russian,
        Self::Multilingual,
    ];

    /// Two-letter code used as the model identifier prefix.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
            Self::Greek => "el",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::Hebrew => "he",
            Self::Italian => "it",
            Self::Dutch => "nl",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
            Self::Multilingual => "xx",
        }
    }

    /// Look up a language by its code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }

    /// Is `word` (without its final period) an abbreviation in this language?
    pub fn is_abbreviation(self, word: &str) -> bool {
        match self {
            Self::English => is_english_abbreviation(word),
            _ => false,
        }
    }

    /// Whether clitics such as `n't` and `'s` are split into their own tokens.
    pub const fn splits_clitics(self) -> bool {
        matches!(self, Self::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The built-in pipeline: sentence splitting, then tokenization per sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulePipeline {
    language: Language,
}

impl RulePipeline {
    /// Create a rule pipeline for `language`.
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    /// The language this pipeline segments.
    pub const fn language(&self) -> Language {
        self.language
    }
}

impl Pipeline for RulePipeline {
    fn name(&self) -> &str {
        "rules"
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len(), language = self.language.code()))]
    fn process(&self, text: &str) -> Parsed {
        let mut parsed = Parsed::default();
        for bytes in sentences::split_sentences(text, self.language) {
            let first = parsed.tokens.len();
            tokens::tokenize_into(&text[bytes.clone()], bytes.start, self.language, &mut parsed.tokens);
            parsed.sentences.push(SentenceSpan {
                bytes,
                tokens: first..parsed.tokens.len(),
            });
        }
        tracing::debug!(
            tokens = parsed.tokens.len(),
            sentences = parsed.sentences.len(),
            "text processed"
        );
        parsed
    }
}

/// A loaded language model: an identifier bound to a pipeline.
#[derive(Debug)]
pub struct Model {
    name: String,
    language: Language,
    pipeline: Box<dyn Pipeline>,
}

impl Model {
    /// Resolve a model identifier such as `en_core_web_sm` or `el_core_news_sm`.
    ///
    /// The language code before the first `_` selects the rule set; a bare
    /// code (`"he"`) works too. Unknown identifiers fail here rather than at
    /// first use.
    #[tracing::instrument]
    pub fn load(name: &str) -> Result<Self, ModelError> {
        let language = name
            .split('_')
            .next()
            .filter(|_| {
                name.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            })
            .and_then(Language::from_code)
            .ok_or_else(|| ModelError::NotFound {
                name: name.to_string(),
                available: Language::ALL
                    .iter()
                    .map(|lang| lang.code())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        tracing::debug!(model = name, %language, "model loaded");
        Ok(Self::with_pipeline(name, language, RulePipeline::new(language)))
    }

    /// Bind an identifier to a custom pipeline.
    pub fn with_pipeline(
        name: impl Into<String>,
        language: Language,
        pipeline: impl Pipeline + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            language,
            pipeline: Box::new(pipeline),
        }
    }

    /// The model identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model's language.
    pub const fn language(&self) -> Language {
        self.language
    }

    /// The pipeline behind this model.
    pub fn pipeline(&self) -> &dyn Pipeline {
        self.pipeline.as_ref()
    }

    /// Run the pipeline over `text`.
    pub fn process(&self, text: &str) -> Parsed {
        self.pipeline.process(text)
    }
}
