//! BlockingQueue — ожидание поверх неблокирующей очереди
//! BlockingQueue — waiting layered over the non-blocking queue
//!
//! Сама KQueue никогда не ждёт. Здесь сигналы Full/Empty превращаются в сон
//! задачи: mutex + две condvar (not_full, not_empty).
//! KQueue itself never waits. Here its Full/Empty signals turn into a sleeping
//! task: one mutex plus two condvars (not_full, not_empty).
//!
//! Закрытие / Closing:
//!   close() будит всех ожидающих. push после закрытия — Closed;
//!   pop сначала отдаёт оставшиеся элементы, затем Closed.
//!   close() wakes every waiter. push after close fails with Closed;
//!   pop drains the remaining items first, then reports Closed.

use std::time::{Duration, Instant};

use kqueue::HeapQueue;
use log::{debug, trace};
use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result, SendError};

struct State<T> {
    queue:  HeapQueue<T>,
    closed: bool,
}

pub struct BlockingQueue<T> {
    state:     Mutex<State<T>>,
    not_empty: Condvar,
    not_full:  Condvar,
}

impl<T> BlockingQueue<T> {
    /// Ошибки создания те же, что у `HeapQueue::with_capacity`.
    /// Creation errors are the same as for `HeapQueue::with_capacity`.
    pub fn new(capacity: usize) -> Result<Self> {
        let queue = HeapQueue::with_capacity(capacity)?;
        Ok(Self {
            state:     Mutex::new(State { queue, closed: false }),
            not_empty: Condvar::new(),
            not_full:  Condvar::new(),
        })
    }

    /// Ждать свободного места и положить элемент.
    /// Wait for room and push the item.
    pub fn push(&self, item: T) -> std::result::Result<(), SendError<T>> {
        self.push_until(item, None)
    }

    /// Таймаут, не представимый как `Instant`, означает ожидание без срока.
    /// A timeout too large to represent as an `Instant` waits without a deadline.
    pub fn push_timeout(&self, item: T, timeout: Duration) -> std::result::Result<(), SendError<T>> {
        self.push_until(item, deadline_after(timeout))
    }

    /// Не ждать: Full и Closed возвращаются сразу.
    /// No waiting: Full and Closed are reported immediately.
    pub fn try_push(&self, item: T) -> std::result::Result<(), SendError<T>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SendError::new(Error::Closed, item));
        }
        state.queue.push(item)?;
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Ждать элемента / Wait for an item
    pub fn pop(&self) -> Result<T> {
        self.pop_until(None)
    }

    pub fn pop_timeout(&self, timeout: Duration) -> Result<T> {
        self.pop_until(deadline_after(timeout))
    }

    pub fn try_pop(&self) -> Result<T> {
        let mut state = self.state.lock();
        match state.queue.pop() {
            Ok(item) => {
                drop(state);
                self.not_full.notify_one();
                Ok(item)
            }
            Err(_) if state.closed => Err(Error::Closed),
            Err(err)               => Err(err.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().queue.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Выбросить все элементы и разбудить ждущих отправителей.
    /// Discard every item and wake the waiting senders.
    pub fn clear(&self) {
        self.state.lock().queue.clear();
        self.not_full.notify_all();
    }

    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        debug!("[kqueue-host] closed with {} item(s) pending", state.queue.len());
        drop(state);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    fn push_until(&self, mut item: T, deadline: Option<Instant>) -> std::result::Result<(), SendError<T>> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(SendError::new(Error::Closed, item));
            }
            match state.queue.push(item) {
                Ok(()) => break,
                Err(rejected) if rejected.kind().is_transient() => item = rejected.into_inner(),
                Err(rejected) => return Err(rejected.into()),
            }
            match deadline {
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        trace!("[kqueue-host] push timed out");
                        return Err(SendError::new(Error::Timeout, item));
                    }
                    self.not_full.wait_until(&mut state, deadline);
                }
                None => {
                    trace!("[kqueue-host] queue full, waiting");
                    self.not_full.wait(&mut state);
                }
            }
        }
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    fn pop_until(&self, deadline: Option<Instant>) -> Result<T> {
        let mut state = self.state.lock();
        let item = loop {
            match state.queue.pop() {
                Ok(item)                       => break item,
                Err(err) if !err.is_transient() => return Err(err.into()),
                Err(_)                         => {}
            }
            if state.closed {
                return Err(Error::Closed);
            }
            match deadline {
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        trace!("[kqueue-host] pop timed out");
                        return Err(Error::Timeout);
                    }
                    self.not_empty.wait_until(&mut state, deadline);
                }
                None => {
                    trace!("[kqueue-host] queue empty, waiting");
                    self.not_empty.wait(&mut state);
                }
            }
        };
        drop(state);
        self.not_full.notify_one();
        Ok(item)
    }
}

fn deadline_after(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

impl<T> std::fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BlockingQueue")
            .field("queue", &state.queue)
            .field("closed", &state.closed)
            .finish()
    }
}
