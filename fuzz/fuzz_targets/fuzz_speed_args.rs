//! Fuzz target: `CommandSpec::from_args`
//!
//! Arbitrary argument strings must either parse to speeds in -127..=127
//! or be rejected; never panic.
//!
//! cargo fuzz run fuzz_speed_args

#![no_main]

use libfuzzer_sys::fuzz_target;
use thrustlink::app::commands::CommandSpec;

fuzz_target!(|args: Vec<String>| {
    if let Ok(command) = CommandSpec::from_args(&args) {
        assert!(command.left() != i8::MIN && command.right() != i8::MIN);
        let frame = command.actuator_frame();
        assert_eq!((frame.left(), frame.right()), (command.left(), command.right()));
    }
});
