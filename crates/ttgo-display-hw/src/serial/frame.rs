//! Serial frame definitions and encoding.
//!
//! Frame structure:
//! - Payload: UTF-8 JSON `{"commands": [{"command": <id>, "args": {...}}]}`,
//!   args keyed by [`Command::serial_args`]
//! - Body: payload after Consistent Overhead Byte Stuffing (contains no zeros)
//! - Terminator: a single `0x00` byte

use crate::command::Command;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Byte marking the end of every frame.
pub const FRAME_DELIMITER: u8 = 0x00;

#[derive(Serialize)]
struct FrameEntry {
    command: u8,
    args: Map<String, Value>,
}

#[derive(Serialize)]
struct FramePayload {
    commands: [FrameEntry; 1],
}

/// Builds the JSON payload for a single command.
pub fn build_payload(command: &Command) -> Result<Vec<u8>> {
    let payload = FramePayload {
        commands: [FrameEntry {
            command: command.id(),
            args: command.serial_args(),
        }],
    };
    Ok(serde_json::to_vec(&payload)?)
}

/// Stuffs a payload and appends the terminator.
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = cobs::encode_vec(payload);
    frame.push(FRAME_DELIMITER);
    frame
}

/// Builds the complete frame for a single command.
pub fn build_frame(command: &Command) -> Result<Vec<u8>> {
    Ok(encode_frame(&build_payload(command)?))
}

/// Recovers the payload from one frame. The terminator is optional.
pub fn decode_frame(frame: &[u8]) -> Result<Vec<u8>> {
    let body = frame.strip_suffix(&[FRAME_DELIMITER]).unwrap_or(frame);
    if body.is_empty() || body.contains(&FRAME_DELIMITER) {
        return Err(Error::Frame);
    }
    cobs::decode_vec(body).map_err(|_| Error::Frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Rotation;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let payload = build_payload(&Command::FillScreen { color: 0xF800 }).unwrap();
        let value: Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "commands": [{ "command": 5, "args": { "color": 0xF800 } }] })
        );
    }

    #[test]
    fn test_frame_has_single_terminator() {
        let frame = build_frame(&Command::Println {
            text: "frompy".into(),
        })
        .unwrap();
        assert_eq!(frame.last(), Some(&FRAME_DELIMITER));
        assert_eq!(
            frame.iter().filter(|&&b| b == FRAME_DELIMITER).count(),
            1
        );
    }

    #[test]
    fn test_zero_bytes_are_stuffed() {
        let payload = [0x11, 0x00, 0x00, 0x22, 0x00];
        let frame = encode_frame(&payload);
        assert!(!frame[..frame.len() - 1].contains(&0));
        assert_eq!(decode_frame(&frame).unwrap(), payload);
    }

    #[test]
    fn test_decode_recovers_payload() {
        let command = Command::SetRotation {
            rotation: Rotation::Deg180,
        };
        let frame = build_frame(&command).unwrap();
        assert_eq!(decode_frame(&frame).unwrap(), build_payload(&command).unwrap());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_frame(&[]).is_err());
        assert!(decode_frame(&[FRAME_DELIMITER]).is_err());
        assert!(decode_frame(&[0x03, 0x00, 0x01, 0x00]).is_err());
    }
}
