pub mod app_config;
pub mod companies;
pub mod config;
pub mod flatten;
pub mod records;
pub mod records_file;

pub use app_config::AppConfig;
pub use companies::{builtin_companies, load_companies, validate_companies, CompanyProfile};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_INGEST_BATCH_SIZE};
pub use flatten::{derive_hashtags, flatten_record, flatten_records, FlattenError};
pub use records::{
    NewTweet, RecordEntities, RecordMetrics, RecordSentiment, RecordUser, TweetRecord,
};
pub use records_file::{read_records, write_records, RecordsFileError, RecordsFormat};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read companies file '{path}': {source}")]
    CompaniesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse companies file: {0}")]
    CompaniesFileParse(#[source] serde_yaml::Error),
    #[error("companies validation error: {0}")]
    Validation(String),
}
