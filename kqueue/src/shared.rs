//! SpinQueue — очередь за спин-блокировкой
//! SpinQueue — queue behind a spin lock
//!
//! Внешнее взаимное исключение для KQueue: один static-экземпляр доступен
//! из нескольких задач через `&self`.
//! External mutual exclusion for KQueue: one static instance reachable from
//! several tasks through `&self`.
//!
//! Прерывания / Interrupts:
//!   Обработчик прерывания, вытеснивший владельца блокировки, зависнет в
//!   `push`/`pop`. Из прерываний используйте `try_push`/`try_pop` — они не
//!   крутятся и возвращают `Busy`.
//!   An interrupt handler that preempts the lock holder would spin forever in
//!   `push`/`pop`. From interrupt context use `try_push`/`try_pop`: they never
//!   spin and report `Busy` instead.

use spin::{Mutex, MutexGuard};

use crate::error::{Error, PushError, Result};
use crate::queue::KQueue;
use crate::slots::Slots;

pub struct SpinQueue<T, S: Slots<T>> {
    inner: Mutex<KQueue<T, S>>,
}

impl<T, S: Slots<T>> SpinQueue<T, S> {
    pub const fn new(queue: KQueue<T, S>) -> Self {
        Self { inner: Mutex::new(queue) }
    }

    /// Положить элемент, ожидая блокировку / Push, spinning for the lock
    pub fn push(&self, item: T) -> core::result::Result<(), PushError<T>> {
        self.inner.lock().push(item)
    }

    /// Положить элемент без ожидания / Push without spinning
    pub fn try_push(&self, item: T) -> core::result::Result<(), PushError<T>> {
        match self.inner.try_lock() {
            Some(mut queue) => queue.push(item),
            None            => Err(PushError::new(Error::Busy, item)),
        }
    }

    pub fn pop(&self) -> Result<T> {
        self.inner.lock().pop()
    }

    pub fn try_pop(&self) -> Result<T> {
        self.inner.try_lock().ok_or(Error::Busy)?.pop()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Захватить очередь для нескольких операций подряд.
    /// Lock the queue for several operations in a row.
    pub fn lock(&self) -> MutexGuard<'_, KQueue<T, S>> {
        self.inner.lock()
    }

    pub fn into_inner(self) -> KQueue<T, S> {
        self.inner.into_inner()
    }
}
