//! Хранилище слотов / Slot storage
//!
//! Режим владения закодирован в типе, а не во флаге:
//! Ownership mode is encoded in the type, not in a flag:
//!   Box<[MaybeUninit<T>]>       — куча, освобождается вместе с очередью / heap, freed with the queue
//!   &mut [MaybeUninit<T>]       — буфер вызывающего / caller's buffer, never freed
//!   [MaybeUninit<T>; N]         — внутри самой очереди (static) / inline in the queue (statics)

#[cfg(feature = "alloc")]
use alloc::boxed::Box;
use core::mem::MaybeUninit;

/// Непрерывный набор слотов под элементы очереди.
/// A contiguous set of slots for queue items.
///
/// # Safety
///
/// Обе функции обязаны возвращать одну и ту же память одинаковой длины
/// на всё время жизни значения: очередь помнит, какие слоты инициализированы.
/// Both methods must return the same memory with the same length for the
/// whole lifetime of the value: the queue tracks which slots are initialised.
pub unsafe trait Slots<T> {
    fn slots(&self) -> &[MaybeUninit<T>];
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>];
}

#[cfg(feature = "alloc")]
unsafe impl<T> Slots<T> for Box<[MaybeUninit<T>]> {
    fn slots(&self) -> &[MaybeUninit<T>] { self }
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] { self }
}

unsafe impl<T> Slots<T> for &mut [MaybeUninit<T>] {
    fn slots(&self) -> &[MaybeUninit<T>] { self }
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] { self }
}

unsafe impl<T, const N: usize> Slots<T> for [MaybeUninit<T>; N] {
    fn slots(&self) -> &[MaybeUninit<T>] { self }
    fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] { self }
}

/// Массив пустых слотов для статической очереди.
/// An array of empty slots for a statically provisioned queue.
///
/// ```
/// use core::mem::MaybeUninit;
/// use kqueue::{slots::uninit_array, StaticQueue};
///
/// let mut slots: [MaybeUninit<u32>; 4] = uninit_array();
/// let mut queue = StaticQueue::from_slots(&mut slots[..]).unwrap();
/// queue.push(1).unwrap();
/// assert_eq!(queue.pop(), Ok(1));
/// ```
pub const fn uninit_array<T, const N: usize>() -> [MaybeUninit<T>; N] {
    [const { MaybeUninit::uninit() }; N]
}
