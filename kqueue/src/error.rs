//! Ошибки очереди / Queue errors
//!
//! Full и Empty — обычные, ожидаемые состояния, а не сбои.
//! Full and Empty are ordinary, expected states, not failures.

use core::fmt;

/// Ошибки очереди / Queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Нулевой размер элемента, нулевая ёмкость или буфер неверной длины.
    /// Zero item size, zero capacity or a buffer of the wrong length.
    InvalidArgument,
    /// Аллокатор не смог выделить память (или размер переполнился).
    /// The allocator could not satisfy the request (or the size overflowed).
    AllocationFailure,
    /// Очередь заполнена / Queue is full
    Full,
    /// Очередь пуста / Queue is empty
    Empty,
    /// Блокировка занята другим контекстом / Lock is held by another context
    Busy,
}

impl Error {
    /// Можно ли повторить операцию позже.
    /// Whether retrying the operation later may succeed.
    pub const fn is_transient(self) -> bool {
        matches!(self, Error::Full | Error::Empty | Error::Busy)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidArgument   => "invalid argument",
            Error::AllocationFailure => "allocation failure",
            Error::Full              => "queue is full",
            Error::Empty             => "queue is empty",
            Error::Busy              => "queue is locked by another context",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

/// Отклонённый push — элемент возвращается вызывающему.
/// Rejected push — the item is handed back to the caller.
///
/// Вызывающий сам решает: повторить, выбросить или усыпить задачу.
/// The caller decides whether to retry, drop the item or suspend the task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PushError<T> {
    kind: Error,
    item: T,
}

impl<T> PushError<T> {
    pub(crate) const fn new(kind: Error, item: T) -> Self {
        Self { kind, item }
    }

    /// Причина отказа (`Full` или `Busy`) / Rejection reason (`Full` or `Busy`)
    pub const fn kind(&self) -> Error {
        self.kind
    }

    /// Забрать элемент обратно / Take the item back
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push rejected: {}", self.kind)
    }
}

impl<T> core::error::Error for PushError<T> {}

impl<T> From<PushError<T>> for Error {
    fn from(err: PushError<T>) -> Self {
        err.kind
    }
}
