//! Поточные тесты блокирующего слоя / Threaded tests of the blocking layer

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use kqueue_host::{BlockingQueue, Error};

#[test]
fn spsc_transfer_preserves_order() {
    const ITEMS: u64 = 50_000;
    let queue = Arc::new(BlockingQueue::new(4).unwrap());

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for i in 0..ITEMS {
                queue.push(i).unwrap();
            }
        })
    };

    for expected in 0..ITEMS {
        assert_eq!(queue.pop(), Ok(expected));
    }
    producer.join().unwrap();
    assert!(queue.is_empty());
}

#[test]
fn blocked_pop_wakes_on_push() {
    let queue = Arc::new(BlockingQueue::new(1).unwrap());

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.pop())
    };

    thread::sleep(Duration::from_millis(20));
    queue.push("wake").unwrap();
    assert_eq!(consumer.join().unwrap(), Ok("wake"));
}

#[test]
fn blocked_push_wakes_on_pop() {
    let queue = Arc::new(BlockingQueue::new(1).unwrap());
    queue.push(1u8).unwrap();

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.push(2).map_err(|err| err.kind()))
    };

    thread::sleep(Duration::from_millis(20));
    assert_eq!(queue.pop(), Ok(1));
    assert_eq!(producer.join().unwrap(), Ok(()));
    assert_eq!(queue.pop(), Ok(2));
}

#[test]
fn close_releases_every_waiter() {
    let queue = Arc::new(BlockingQueue::<u32>::new(2).unwrap());

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop())
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    queue.close();

    for consumer in consumers {
        assert_eq!(consumer.join().unwrap(), Err(Error::Closed));
    }
}

#[test]
fn multiple_producers_deliver_everything() {
    const PRODUCERS: u32 = 4;
    const PER_PRODUCER: u32 = 2_000;
    let queue = Arc::new(BlockingQueue::new(8).unwrap());

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    queue.push((p, i)).unwrap();
                }
            })
        })
        .collect();

    let mut last_seen = vec![None::<u32>; PRODUCERS as usize];
    for _ in 0..PRODUCERS * PER_PRODUCER {
        let (p, i) = queue.pop_timeout(Duration::from_secs(10)).unwrap();
        // Порядок внутри одного производителя сохраняется
        // Order within one producer is preserved
        if let Some(prev) = last_seen[p as usize] {
            assert!(i > prev);
        }
        last_seen[p as usize] = Some(i);
    }
    for producer in producers {
        producer.join().unwrap();
    }
    assert!(last_seen.iter().all(|seen| *seen == Some(PER_PRODUCER - 1)));
}

#[test]
fn unbounded_timeout_waits_without_deadline() {
    let queue = BlockingQueue::new(1).unwrap();
    queue.push_timeout(1u32, Duration::MAX).unwrap();
    assert_eq!(queue.pop_timeout(Duration::MAX), Ok(1));
}

#[test]
fn unbounded_pop_timeout_wakes_on_push() {
    let queue = Arc::new(BlockingQueue::new(1).unwrap());

    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.pop_timeout(Duration::MAX))
    };

    thread::sleep(Duration::from_millis(20));
    queue.push_timeout(9u8, Duration::MAX).unwrap();
    assert_eq!(consumer.join().unwrap(), Ok(9));
}
