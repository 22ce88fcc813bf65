//! Binary frames exchanged with the bridge.
//!
//! All functions here are pure; socket handling lives in the session and
//! dispatcher modules.

use crate::command::Command;
use crate::errors::Error;
use crate::sequence::SequenceNumber;
use crate::session::Session;

type Result<T> = std::result::Result<T, Error>;

/// Opaque session request, identical for every handshake.
pub const HANDSHAKE_REQUEST: [u8; 27] = [
    0x20, 0x00, 0x00, 0x00, 0x16, 0x02, 0x62, 0x3A, 0xD5, 0xED, 0xA3, 0x01, 0xAE, 0x08, 0x2D,
    0x46, 0x61, 0x41, 0xA7, 0xF6, 0xDC, 0xAF, 0xD3, 0xE6, 0x00, 0x00, 0x1E,
];

pub const HANDSHAKE_REPLY_LEN: usize = 22;
pub const REQUEST_LEN: usize = 22;
pub const ACK_LEN: usize = 8;

const MAC_RANGE: std::ops::Range<usize> = 7..13;
const SESSION_ID1_OFFSET: usize = 19;
const SESSION_ID2_OFFSET: usize = 20;
const ACK_SEQUENCE_OFFSET: usize = 6;

const REQUEST_HEADER: [u8; 5] = [0x80, 0x00, 0x00, 0x00, 0x11];

/// Parse a handshake reply into the bridge MAC and session id pair.
///
/// Only 22 byte replies are accepted.
pub fn decode_handshake(reply: &[u8]) -> Result<Session> {
    if reply.len() != HANDSHAKE_REPLY_LEN {
        return Err(Error::MalformedHandshake { len: reply.len() });
    }

    let mac = reply[MAC_RANGE]
        .iter()
        .map(|octet| format!("{:x}", octet))
        .collect::<Vec<_>>()
        .join(":");

    Ok(Session {
        mac,
        id1: reply[SESSION_ID1_OFFSET],
        id2: reply[SESSION_ID2_OFFSET],
    })
}

/// Checksum over the raw command bytes and zone id, truncated to a byte.
pub fn checksum(command: &Command, zone_id: u8) -> u8 {
    command
        .as_bytes()
        .iter()
        .fold(zone_id, |sum, byte| sum.wrapping_add(*byte))
}

/// Build a full 22 byte request frame.
pub fn encode_request(
    session: &Session,
    sequence: SequenceNumber,
    command: &Command,
    zone_id: u8,
) -> [u8; REQUEST_LEN] {
    let mut frame = [0u8; REQUEST_LEN];
    frame[..5].copy_from_slice(&REQUEST_HEADER);
    frame[5] = session.id1;
    frame[6] = session.id2;
    frame[8] = sequence.value();
    frame[10..19].copy_from_slice(command.as_bytes());
    frame[19] = zone_id;
    frame[21] = checksum(command, zone_id);
    frame
}

/// Validate an acknowledgment against the sequence number just sent.
pub fn decode_ack(reply: &[u8], sequence: SequenceNumber) -> Result<()> {
    if reply.len() != ACK_LEN {
        return Err(Error::UnexpectedReply { len: reply.len() });
    }

    let received = reply[ACK_SEQUENCE_OFFSET];
    if received != sequence.value() {
        return Err(Error::SequenceMismatch {
            expected: sequence.value(),
            received,
        });
    }
    Ok(())
}

/// Lowercase, space separated hex dump used in logs and history.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handshake_reply(mac: [u8; 6], id1: u8, id2: u8) -> Vec<u8> {
        let mut reply = vec![0x28, 0x00, 0x00, 0x00, 0x11, 0x00, 0x02];
        reply.extend_from_slice(&mac);
        reply.extend_from_slice(&[0x69, 0xF0, 0x3C, 0x23, 0x00, 0x01]);
        reply.push(id1);
        reply.push(id2);
        reply.push(0x00);
        reply
    }

    #[test]
    fn test_handshake_request_layout() {
        assert_eq!(HANDSHAKE_REQUEST.len(), 27);
        assert_eq!(HANDSHAKE_REQUEST[0], 0x20);
        assert_eq!(HANDSHAKE_REQUEST[26], 0x1E);
    }

    #[test]
    fn test_decode_handshake() {
        let reply = handshake_reply([0xAC, 0xCF, 0x23, 0xF5, 0x7A, 0xD4], 0x05, 0x0A);
        assert_eq!(reply.len(), 22);

        let session = decode_handshake(&reply).unwrap();
        assert_eq!(session.mac, "ac:cf:23:f5:7a:d4");
        assert_eq!(session.id1, 0x05);
        assert_eq!(session.id2, 0x0A);
    }

    #[test]
    fn test_decode_handshake_keeps_octets_unpadded() {
        let reply = handshake_reply([0x0A, 0x01, 0x23, 0x00, 0xFF, 0x10], 1, 2);
        assert_eq!(decode_handshake(&reply).unwrap().mac, "a:1:23:0:ff:10");
    }

    #[test]
    fn test_decode_handshake_wrong_length() {
        for len in [0, 8, 21, 23, 64] {
            assert_eq!(
                decode_handshake(&vec![0u8; len]).unwrap_err(),
                Error::MalformedHandshake { len }
            );
        }
    }

    #[test]
    fn test_checksum_is_byte_sum() {
        let command = Command::new([0x31, 0x00, 0x00, 0x08, 0x01, 0xFF, 0xFF, 0xFF, 0xFF]);
        let expected = (0x31 + 0x08 + 0x01 + 4 * 0xFF + 1) % 256;
        assert_eq!(checksum(&command, 1) as u32, expected);
    }

    #[test]
    fn test_checksum_matches_byte_sum_for_generated_commands() {
        let expected = |bytes: &[u8; 9], zone: u8| {
            let sum: u32 = bytes.iter().map(|&b| u32::from(b)).sum();
            ((sum + u32::from(zone)) % 256) as u8
        };

        // Every value in every position.
        for position in 0..9 {
            for value in 0..=255u8 {
                let mut bytes = [0u8; 9];
                bytes[position] = value;
                for zone in 0u8..=4 {
                    assert_eq!(checksum(&Command::new(bytes), zone), expected(&bytes, zone));
                }
            }
        }

        // Pseudo-random full commands.
        let mut state: u32 = 0x1234_5678;
        for _ in 0..2000 {
            let mut bytes = [0u8; 9];
            for byte in bytes.iter_mut() {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                *byte = (state >> 16) as u8;
            }
            let zone = (state >> 8) as u8 % 5;
            assert_eq!(checksum(&Command::new(bytes), zone), expected(&bytes, zone));
        }
    }

    #[test]
    fn test_checksum_for_all_zones() {
        let command = Command::new([0xFF; 9]);
        for zone in 0u8..=4 {
            let expected = (9 * 0xFF + zone as u32) % 256;
            assert_eq!(checksum(&command, zone) as u32, expected);
        }
    }

    #[test]
    fn test_encode_request() {
        let session = Session {
            mac: String::new(),
            id1: 0x05,
            id2: 0x0A,
        };
        let command = Command::new([0x31, 0x00, 0x00, 0x08, 0x04, 0x01, 0x00, 0x00, 0x00]);
        let frame = encode_request(&session, SequenceNumber::from_raw(7), &command, 3);

        assert_eq!(
            frame,
            [
                0x80, 0x00, 0x00, 0x00, 0x11, 0x05, 0x0A, 0x00, 0x07, 0x00, 0x31, 0x00, 0x00,
                0x08, 0x04, 0x01, 0x00, 0x00, 0x00, 0x03, 0x00, 0x41
            ]
        );
    }

    #[test]
    fn test_decode_ack() {
        let seq = SequenceNumber::from_raw(42);
        assert!(decode_ack(&[0x88, 0, 0, 0, 0x03, 0, 42, 0], seq).is_ok());
        assert_eq!(
            decode_ack(&[0x88, 0, 0, 0, 0x03, 0, 41, 0], seq).unwrap_err(),
            Error::SequenceMismatch {
                expected: 42,
                received: 41
            }
        );
        assert_eq!(
            decode_ack(&[0, 0, 0, 0, 0, 0, 42], seq).unwrap_err(),
            Error::UnexpectedReply { len: 7 }
        );
        assert_eq!(
            decode_ack(&[0, 0, 0, 0, 0, 0, 42, 0, 0], seq).unwrap_err(),
            Error::UnexpectedReply { len: 9 }
        );
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x80, 0x0A, 0xFF]), "80 0a ff");
    }
}
