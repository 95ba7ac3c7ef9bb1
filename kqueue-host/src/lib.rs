//! kqueue-host — блокирующий слой поверх kqueue для std-окружения
//! kqueue-host — blocking layer over kqueue for std environments
//!
//! Примитив kqueue сообщает Full/Empty и никогда не ждёт. Этот крейт — пример
//! слоя планировщика: задача (здесь — поток) засыпает, пока нет места или
//! данных, с таймаутом или без.
//!
//! The kqueue primitive reports Full/Empty and never waits. This crate is a
//! reference scheduler layer: a task (a thread here) sleeps until there is
//! room or data, with or without a timeout.
//!
//! Использование / Usage:
//!   let queue = BlockingQueue::new(16)?;
//!   queue.push(msg)?;                                   // ждёт места / waits for room
//!   let msg = queue.pop_timeout(Duration::from_millis(5))?;

pub mod blocking;
pub mod error;

pub use blocking::BlockingQueue;
pub use error::{Error, Result, SendError};
