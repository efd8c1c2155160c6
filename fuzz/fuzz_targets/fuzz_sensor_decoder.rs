//! Fuzz target: `decode_sensor_slice`
//!
//! Arbitrary bytes from the bus must never panic the decoder or the
//! sample formatter, and only exact 6-byte frames may decode.
//!
//! cargo fuzz run fuzz_sensor_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use thrustlink::codec::{SENSOR_FRAME_LEN, decode_sensor_slice, encode_sensor};

fuzz_target!(|data: &[u8]| {
    match decode_sensor_slice(data) {
        Some(frame) => {
            assert_eq!(data.len(), SENSOR_FRAME_LEN);
            assert_eq!(&encode_sensor(frame)[..], data);
            let _ = frame.to_string();
        }
        None => assert_ne!(data.len(), SENSOR_FRAME_LEN),
    }
});
