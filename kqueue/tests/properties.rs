//! Property-тесты инвариантов очереди / Property tests for queue invariants
//!
//! Модель — `VecDeque` с ограничением по ёмкости; очередь обязана совпадать
//! с ней после каждой операции.
//! The model is a capacity-bounded `VecDeque`; the queue must agree with it
//! after every operation.
//!
//! ```bash
//! cargo test -p kqueue --test properties
//! ```

#![cfg(feature = "alloc")]

use std::collections::VecDeque;

use kqueue::{Error, HeapQueue, HeapRawQueue};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Pop,
    Peek,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<u32>().prop_map(Op::Push),
        5 => Just(Op::Pop),
        1 => Just(Op::Peek),
        1 => Just(Op::Clear),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..300)
}

fn record_strategy(item_size: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), item_size)
}

proptest! {
    /// len == успешные push − успешные pop, всегда в [0, capacity].
    /// len == successful pushes − successful pops, always within [0, capacity].
    #[test]
    fn count_tracks_successes(capacity in 1usize..16, ops in ops_strategy()) {
        let mut queue = HeapQueue::with_capacity(capacity).unwrap();
        let mut pushed = 0usize;
        let mut popped = 0usize;

        for op in ops {
            match op {
                Op::Push(v) => if queue.push(v).is_ok() { pushed += 1 },
                Op::Pop     => if queue.pop().is_ok()   { popped += 1 },
                Op::Peek    => { queue.peek(); }
                Op::Clear   => { queue.clear(); pushed = 0; popped = 0; }
            }
            prop_assert_eq!(queue.len(), pushed - popped);
            prop_assert!(queue.len() <= capacity);
            prop_assert_eq!(queue.is_empty(), queue.len() == 0);
            prop_assert_eq!(queue.is_full(), queue.len() == capacity);
        }
    }

    /// Очередь ведёт себя как ограниченная VecDeque: FIFO, Full и Empty без мутаций.
    /// The queue behaves like a bounded VecDeque: FIFO, Full and Empty without mutation.
    #[test]
    fn matches_bounded_deque_model(capacity in 1usize..16, ops in ops_strategy()) {
        let mut queue = HeapQueue::with_capacity(capacity).unwrap();
        let mut model: VecDeque<u32> = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    let result = queue.push(v);
                    if model.len() == capacity {
                        let err = result.unwrap_err();
                        prop_assert_eq!(err.kind(), Error::Full);
                        prop_assert_eq!(err.into_inner(), v);
                    } else {
                        prop_assert!(result.is_ok());
                        model.push_back(v);
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(queue.pop(), model.pop_front().ok_or(Error::Empty));
                }
                Op::Peek => {
                    prop_assert_eq!(queue.peek(), model.front());
                }
                Op::Clear => {
                    queue.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }
    }

    /// Записи произвольного размера возвращаются байт в байт в порядке FIFO.
    /// Records of any size come back byte for byte in FIFO order.
    #[test]
    fn raw_records_round_trip_in_order(
        (item_size, records) in (1usize..48).prop_flat_map(|size| {
            (Just(size), prop::collection::vec(record_strategy(size), 0..40))
        }),
        capacity in 1usize..8,
    ) {
        let mut queue = HeapRawQueue::with_capacity(item_size, capacity).unwrap();
        let mut expected: VecDeque<Vec<u8>> = VecDeque::new();
        let mut out = vec![0u8; item_size];

        for record in records {
            if queue.is_full() {
                prop_assert_eq!(queue.push(&record), Err(Error::Full));
                queue.pop(&mut out).unwrap();
                prop_assert_eq!(&out, &expected.pop_front().unwrap());
            }
            queue.push(&record).unwrap();
            expected.push_back(record);
        }

        while let Some(record) = expected.pop_front() {
            queue.pop(&mut out).unwrap();
            prop_assert_eq!(&out, &record);
        }
        prop_assert_eq!(queue.pop(&mut out), Err(Error::Empty));
    }
}
