use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClimatiqError {
    #[error("CLIMATIQ_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to encode estimate request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Climatiq returned {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        details: serde_json::Value,
    },
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("SENDGRID_API_KEY or FROM_EMAIL is not set")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("SendGrid returned {status}: {message}")]
    Upstream { status: u16, message: String },
}
