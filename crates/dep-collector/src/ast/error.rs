use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{messages:}")]
    JsParseError { messages: String },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{message:}")]
    JsGenerateError { message: String },
}
