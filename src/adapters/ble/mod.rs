//! BLE heart-rate streaming
//!
//! The standard GATT Heart Rate service: measurement frame parsing plus an
//! explicit session object for consuming notifications. The peripheral
//! transport itself lives outside this crate; whatever drives the radio
//! hands raw characteristic payloads to a [`HeartRateFeed`], and the owner
//! of the matching [`HeartRateSession`] drains parsed readings into the
//! same write path as manual and imported records.
//!
//! The channel between the two is bounded. A sensor notifying faster than
//! the consumer drains drops the overflow with a warning; readings are
//! snapshots, not a ledger.

use crate::domain::{Result, VitalError};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Heart Rate service UUID, `0000180d-0000-1000-8000-00805f9b34fb`
pub const HEART_RATE_SERVICE: Uuid = Uuid::from_u128(0x0000180d_0000_1000_8000_00805f9b34fb);

/// Heart Rate Measurement characteristic UUID, `00002a37-0000-1000-8000-00805f9b34fb`
pub const HEART_RATE_MEASUREMENT: Uuid = Uuid::from_u128(0x00002a37_0000_1000_8000_00805f9b34fb);

/// Flags-byte bit 0: heart-rate value is 16-bit little-endian
const FLAG_VALUE_16_BIT: u8 = 0x01;

/// Parses a Heart Rate Measurement characteristic payload
///
/// GATT packing: flags byte at offset 0; when flag bit 0 is clear the
/// value is an 8-bit integer at offset 1, otherwise a 16-bit little-endian
/// integer at offsets 1-2.
///
/// # Errors
///
/// Returns a device error for payloads too short to hold the declared
/// value width.
pub fn parse_heart_rate_measurement(payload: &[u8]) -> Result<u16> {
    let flags = *payload
        .first()
        .ok_or_else(|| VitalError::Device("Empty heart-rate payload".to_string()))?;

    if flags & FLAG_VALUE_16_BIT != 0 {
        if payload.len() < 3 {
            return Err(VitalError::Device(format!(
                "Heart-rate payload too short for 16-bit value: {} bytes",
                payload.len()
            )));
        }
        Ok(u16::from_le_bytes([payload[1], payload[2]]))
    } else {
        if payload.len() < 2 {
            return Err(VitalError::Device(format!(
                "Heart-rate payload too short for 8-bit value: {} bytes",
                payload.len()
            )));
        }
        Ok(u16::from(payload[1]))
    }
}

/// Creates a bounded feed/session pair
///
/// The feed side goes to the transport's notification callback; the
/// session side is owned by whoever renders or records the stream. Only
/// one peripheral feeds a session at a time.
pub fn heart_rate_channel(capacity: usize) -> (HeartRateFeed, HeartRateSession) {
    let (tx, rx) = mpsc::channel(capacity);
    (HeartRateFeed { tx }, HeartRateSession { rx })
}

/// Producer half: parses and enqueues notification payloads
#[derive(Clone)]
pub struct HeartRateFeed {
    tx: mpsc::Sender<u16>,
}

impl HeartRateFeed {
    /// Parse a characteristic payload and enqueue the reading
    ///
    /// A full channel drops the reading with a warning rather than
    /// blocking the notification callback.
    ///
    /// # Errors
    ///
    /// Returns a device error for malformed payloads or when the session
    /// side has been closed.
    pub fn push_measurement(&self, payload: &[u8]) -> Result<()> {
        let bpm = parse_heart_rate_measurement(payload)?;

        match self.tx.try_send(bpm) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                tracing::warn!(bpm = dropped, "Heart-rate consumer lagging, dropping reading");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(VitalError::Device(
                "Heart-rate session is closed".to_string(),
            )),
        }
    }
}

/// Consumer half: an explicit subscription to the reading stream
pub struct HeartRateSession {
    rx: mpsc::Receiver<u16>,
}

impl HeartRateSession {
    /// Wait for the next reading
    ///
    /// Returns `None` once every feed handle has been dropped.
    pub async fn next_reading(&mut self) -> Option<u16> {
        self.rx.recv().await
    }

    /// Unsubscribe: further pushes fail on the feed side
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_8_bit_value() {
        // Flags 0x00: 8-bit value at offset 1.
        assert_eq!(parse_heart_rate_measurement(&[0x00, 72]).unwrap(), 72);
    }

    #[test]
    fn test_parse_16_bit_value() {
        // Flags 0x01: 16-bit little-endian value at offsets 1-2.
        assert_eq!(
            parse_heart_rate_measurement(&[0x01, 0x2c, 0x01]).unwrap(),
            300
        );
    }

    #[test]
    fn test_extra_fields_after_value_are_ignored() {
        // Energy-expended and RR-interval fields may trail the value.
        assert_eq!(
            parse_heart_rate_measurement(&[0x00, 65, 0x10, 0x27]).unwrap(),
            65
        );
    }

    #[test]
    fn test_short_payloads_are_device_errors() {
        assert!(matches!(
            parse_heart_rate_measurement(&[]),
            Err(VitalError::Device(_))
        ));
        assert!(matches!(
            parse_heart_rate_measurement(&[0x00]),
            Err(VitalError::Device(_))
        ));
        assert!(matches!(
            parse_heart_rate_measurement(&[0x01, 0x48]),
            Err(VitalError::Device(_))
        ));
    }

    #[tokio::test]
    async fn test_feed_to_session_flow() {
        let (feed, mut session) = heart_rate_channel(4);
        feed.push_measurement(&[0x00, 70]).unwrap();
        feed.push_measurement(&[0x00, 71]).unwrap();

        assert_eq!(session.next_reading().await, Some(70));
        assert_eq!(session.next_reading().await, Some(71));
    }

    #[tokio::test]
    async fn test_overflow_drops_instead_of_blocking() {
        let (feed, mut session) = heart_rate_channel(1);
        feed.push_measurement(&[0x00, 70]).unwrap();
        // Channel is full; this reading is dropped, not an error.
        feed.push_measurement(&[0x00, 99]).unwrap();

        assert_eq!(session.next_reading().await, Some(70));
    }

    #[tokio::test]
    async fn test_closed_session_rejects_pushes() {
        let (feed, mut session) = heart_rate_channel(4);
        session.close();
        assert!(matches!(
            feed.push_measurement(&[0x00, 70]),
            Err(VitalError::Device(_))
        ));
    }

    #[tokio::test]
    async fn test_session_ends_when_feeds_drop() {
        let (feed, mut session) = heart_rate_channel(4);
        drop(feed);
        assert_eq!(session.next_reading().await, None);
    }

    #[test]
    fn test_gatt_uuids() {
        assert_eq!(
            HEART_RATE_SERVICE.to_string(),
            "0000180d-0000-1000-8000-00805f9b34fb"
        );
        assert_eq!(
            HEART_RATE_MEASUREMENT.to_string(),
            "00002a37-0000-1000-8000-00805f9b34fb"
        );
    }
}
