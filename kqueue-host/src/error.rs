use std::fmt;

/// Ошибки блокирующего слоя / Blocking layer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Queue(#[from] kqueue::Error),

    #[error("timed out waiting on the queue")]
    Timeout,

    #[error("queue is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Неудачная отправка — элемент возвращается вызывающему.
/// Failed send — the item is handed back to the caller.
pub struct SendError<T> {
    kind: Error,
    item: T,
}

impl<T> SendError<T> {
    pub(crate) fn new(kind: Error, item: T) -> Self {
        Self { kind, item }
    }

    pub fn kind(&self) -> Error {
        self.kind
    }

    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> From<kqueue::PushError<T>> for SendError<T> {
    fn from(err: kqueue::PushError<T>) -> Self {
        let kind = Error::Queue(err.kind());
        Self::new(kind, err.into_inner())
    }
}

impl<T> From<SendError<T>> for Error {
    fn from(err: SendError<T>) -> Self {
        err.kind
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendError").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "send failed: {}", self.kind)
    }
}

impl<T> std::error::Error for SendError<T> {}
