use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        ErrorKind::InvalidOperation { name: name.into() }.into()
    }

    pub fn invalid_postings(element: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidPostings {
            element: element.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        ErrorKind::Io {
            context: context.into(),
            source,
        }
        .into()
    }

    /// Returns `true` when the error reports a broken calling contract or a
    /// misbehaving posting source, rather than an I/O failure.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Io { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The caller broke a precondition (e.g. a non-advancing target).
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// The operation is not meaningful in the current cursor state.
    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    /// A posting source reported data violating its own contract.
    #[error("inconsistent postings for '{element}': {message}")]
    InvalidPostings { element: String, message: String },

    #[error("IO error for '{context}': {source}'")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(Box::new(kind))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}
