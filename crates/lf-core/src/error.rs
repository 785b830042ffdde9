use thiserror::Error;

pub type LfResult<T> = Result<T, LfError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LfError {
    #[error("Unknown component kind: {name}")]
    UnknownKind { name: String },
}
