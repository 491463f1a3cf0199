// Compiled-regex cache used by the extractor modules.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static ::regex::Regex {
            static R: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
            R.get_or_init(|| ::regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod amount;
pub mod classify;
pub mod date;
pub mod normalize;
pub mod pipeline;
pub mod recognizer;
pub mod rename;

pub use amount::extract_amount;
pub use classify::{EntityError, EntityPhrase, EntityRecognizer, KeywordTable, NoopEntities, RulesError};
pub use date::extract_date;
pub use normalize::NormalizedText;
pub use pipeline::{PipelineError, ReceiptPipeline};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
pub use rename::{FinalName, NameRegistry};
