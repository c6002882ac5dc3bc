use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CarouselError {
    #[error("invalid carousel speed '{value}'")]
    InvalidSpeed { value: String },

    #[error("carousel root has no track")]
    MissingTrack,
}
