//! Device orientation events
//!
//! The sensor callback runs on its own execution context (browser script,
//! platform thread), so events cross into the simulation through a bounded
//! channel. Neither side ever blocks: the producer drops the new event when
//! the queue is full, the consumer polls at most one event per tick.

use std::sync::mpsc::{Receiver, SyncSender, TryRecvError, TrySendError, sync_channel};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ORIENTATION_FORCE_SCALE, ORIENTATION_QUEUE_CAPACITY};

/// Device orientation snapshot, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationEvent {
    /// Z-axis rotation (compass heading); unused by the tilt mapping
    pub alpha: f64,
    /// X-axis rotation (front-to-back tilt)
    pub beta: f64,
    /// Y-axis rotation (left-to-right tilt)
    pub gamma: f64,
}

/// Producer half of the orientation queue
#[derive(Debug, Clone)]
pub struct OrientationSender {
    tx: SyncSender<OrientationEvent>,
}

/// Consumer half of the orientation queue, owned by the game session
#[derive(Debug)]
pub struct OrientationReceiver {
    rx: Receiver<OrientationEvent>,
}

/// Create the bounded orientation queue (capacity 10). The pair is owned by
/// whoever wires the session together; nothing here is process-global.
pub fn orientation_channel() -> (OrientationSender, OrientationReceiver) {
    let (tx, rx) = sync_channel(ORIENTATION_QUEUE_CAPACITY);
    (OrientationSender { tx }, OrientationReceiver { rx })
}

impl OrientationSender {
    /// Non-blocking enqueue. When the queue is full the NEW event is the
    /// one dropped; backpressure favors events already queued.
    pub fn push(&self, event: OrientationEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("orientation queue full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Ingestion boundary for raw sensor payloads: exactly three values
    /// (alpha, beta, gamma). Any other arity records nothing.
    pub fn ingest(&self, values: &[f64]) -> bool {
        let [alpha, beta, gamma] = values else {
            return false;
        };
        self.push(OrientationEvent {
            alpha: *alpha,
            beta: *beta,
            gamma: *gamma,
        })
    }
}

impl OrientationReceiver {
    /// Non-blocking dequeue of the oldest pending event
    pub fn poll(&self) -> Option<OrientationEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Convert an orientation reading to a tilt impulse: gamma (left-right)
/// drives x, beta (front-back) drives y, each scaled as angle / 90 * 0.5.
pub fn tilt_force(event: &OrientationEvent) -> DVec2 {
    DVec2::new(
        event.gamma / 90.0 * ORIENTATION_FORCE_SCALE,
        event.beta / 90.0 * ORIENTATION_FORCE_SCALE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drops_when_full() {
        let (tx, rx) = orientation_channel();

        for i in 0..11 {
            let accepted = tx.push(OrientationEvent {
                alpha: i as f64,
                ..Default::default()
            });
            assert_eq!(accepted, i < 10, "push {i}");
        }

        // Exactly the first 10 made it through, in order
        for i in 0..10 {
            assert_eq!(rx.poll().unwrap().alpha, i as f64);
        }
        assert!(rx.poll().is_none());
    }

    #[test]
    fn test_poll_empty_returns_none_without_blocking() {
        let (_tx, rx) = orientation_channel();
        assert!(rx.poll().is_none());
    }

    #[test]
    fn test_ingest_requires_three_values() {
        let (tx, rx) = orientation_channel();

        assert!(!tx.ingest(&[]));
        assert!(!tx.ingest(&[1.0, 2.0]));
        assert!(!tx.ingest(&[1.0, 2.0, 3.0, 4.0]));
        assert!(rx.poll().is_none());

        assert!(tx.ingest(&[1.0, 2.0, 3.0]));
        let event = rx.poll().unwrap();
        assert_eq!((event.alpha, event.beta, event.gamma), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_producer_on_another_thread() {
        let (tx, rx) = orientation_channel();

        let handle = std::thread::spawn(move || {
            for _ in 0..5 {
                tx.push(OrientationEvent {
                    beta: 45.0,
                    gamma: -45.0,
                    ..Default::default()
                });
            }
        });
        handle.join().unwrap();

        let mut count = 0;
        while rx.poll().is_some() {
            count += 1;
        }
        assert_eq!(count, 5);
    }

    #[test]
    fn test_tilt_force_scaling() {
        let force = tilt_force(&OrientationEvent {
            alpha: 123.0,
            beta: 90.0,
            gamma: -45.0,
        });
        assert!((force.x - (-0.25)).abs() < 1e-12);
        assert!((force.y - 0.5).abs() < 1e-12);
    }
}
