//! kqueue — очередь элементов фиксированного размера для ядра
//! kqueue — fixed-size item queue for an embedded kernel
//!
//! Кольцевой буфер фиксированной ёмкости — строительный блок IPC и
//! планировщика. Никогда не блокируется: Full/Empty возвращаются сразу,
//! поэтому примитив можно звать из прерываний. Ожидание (задача спит,
//! пока нет места или данных) — забота слоя выше.
//!
//! Fixed-capacity ring buffer, the building block for IPC and the scheduler.
//! Never blocks: Full/Empty come back immediately, so the primitive is safe
//! to call from interrupt context. Waiting (a task sleeping until there is
//! room or data) belongs to the layer above.
//!
//! Варианты / Variants:
//!   HeapQueue<T>          — слоты в куче / slots on the heap          (feature "alloc")
//!   StaticQueue<'a, T>    — слоты вызывающего / caller's slots
//!   InlineQueue<T, N>     — слоты внутри очереди, const / inline slots, const
//!   RawQueue<B>           — непрозрачные записи item_size байт / opaque item_size-byte records
//!   SpinQueue<T, S>       — KQueue за spin::Mutex / KQueue behind spin::Mutex
//!
//! Использование / Usage:
//!   let mut q = HeapQueue::<u32>::with_capacity(3)?;
//!   q.push(1)?;
//!   let v = q.pop()?;

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod raw;
pub mod shared;
pub mod slots;

mod queue;
mod ring;

pub use error::{Error, PushError, Result};
pub use queue::{InlineQueue, KQueue, StaticQueue};
pub use raw::{required_bytes, RawQueue, StaticRawQueue};
pub use shared::SpinQueue;
pub use slots::Slots;

#[cfg(feature = "alloc")]
pub use queue::HeapQueue;
#[cfg(feature = "alloc")]
pub use raw::HeapRawQueue;
