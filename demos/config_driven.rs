//! Example: Configuration-driven pick and place.
//!
//! This example demonstrates how to:
//! - Load geometry, calibration, poses and sequences from TOML
//! - Build an arm from the configuration
//! - Register poses and sequences at runtime
//! - Run a named sequence and inspect the emitted commands
//!
//! Run with: `cargo run --example config_driven --features std`

use robot_arm_ik::{
    config::{SequenceConfig, SequenceStep},
    error::Result,
    parse_config, ActuatorSink, CartesianTarget, DirectGripper, GripAction, RobotArm,
};

/// Servo board stand-in that prints every command.
struct PrintingSink {
    writes: usize,
}

impl ActuatorSink for PrintingSink {
    type Error = core::convert::Infallible;

    fn set_command(&mut self, channel: u8, command: u16) -> core::result::Result<(), Self::Error> {
        self.writes += 1;
        if channel == 3 {
            println!("    gripper channel {} <- {}", channel, command);
        }
        Ok(())
    }
}

/// Mock delay for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // In real code, this would actually delay
    }
}

fn main() -> Result<()> {
    println!("=== Configuration-Driven Pick and Place Example ===\n");

    let toml_content = r#"
[geometry]
upper_arm_length = 10.0
lower_arm_length = 10.0

# Upper arm servo is mounted mirrored, so its command range runs backwards
[channels.shoulder]
channel = 0
min_command = 150
max_command = 600

[channels.upper]
channel = 1
min_command = 600
max_command = 150

[channels.lower]
channel = 2
min_command = 150
max_command = 600

[channels.gripper]
channel = 3
min_command = 150
max_command = 600

[motion]
steps = 40
step_delay_ms = 15
easing = "cosine"

[gripper.direct]
open_degrees = 0.0
close_degrees = 70.0

[poses.rest]
x = 14.0
y = 0.0
z = 4.0

[poses.bin]
x = 0.0
y = 12.0
z = 6.0

[sequences.drop_off]
steps = [
    { pose = "bin" },
    { grip = "open" },
    { dwell_ms = 300 },
    { pose = "rest" },
]
"#;

    let config = parse_config(toml_content)?;

    println!("Geometry:");
    println!("  Upper arm: {}", config.geometry.upper_arm());
    println!("  Lower arm: {}", config.geometry.lower_arm());
    println!(
        "  Reach: {} .. {}",
        config.geometry.min_reach(),
        config.geometry.max_reach()
    );
    println!();

    let gripper = DirectGripper::from_config(&config.gripper, &config.channels.gripper)?;
    let mut arm = RobotArm::builder()
        .from_config(&config)
        .sink(PrintingSink { writes: 0 })
        .delay(MockDelay)
        .gripper(gripper)
        .build()?;
    arm.begin()?;

    // Solve each named pose without moving
    println!("Named Poses:");
    let names: Vec<String> = arm.poses().pose_names().map(String::from).collect();
    for name in &names {
        if let Some(target) = arm.poses().pose(name).copied() {
            let pose = arm.solve(&target)?;
            println!(
                "  - {} ({}, {}, {}) → shoulder {:.1}°, upper {:.1}°, lower {:.1}°",
                name,
                target.x,
                target.y,
                target.z,
                pose.shoulder().value(),
                pose.upper().value(),
                pose.lower().value()
            );
        }
    }
    println!();

    // Runtime registration is checked against the arm's reach
    arm.register_pose("pick", CartesianTarget::new(8.0, 6.0, 5.0))?;
    match arm.register_pose("too_far", CartesianTarget::new(40.0, 0.0, 0.0)) {
        Ok(()) => println!("Registered too_far"),
        Err(e) => println!("Rejected too_far: {}", e),
    }

    let mut steps = heapless::Vec::new();
    for step in [
        SequenceStep::Pose(heapless::String::try_from("rest").expect("name fits")),
        SequenceStep::Grip(GripAction::Open),
        SequenceStep::Pose(heapless::String::try_from("pick").expect("name fits")),
        SequenceStep::Grip(GripAction::Close),
    ] {
        steps.push(step).expect("sequence fits");
    }
    arm.register_sequence("pick_up", SequenceConfig { steps })?;
    println!();

    for sequence in ["pick_up", "drop_off"] {
        println!("Running sequence: {}", sequence);
        let before = arm.sink().writes;
        arm.run_sequence(sequence)?;
        println!("  {} commands emitted", arm.sink().writes - before);
        if let Some(tool) = arm.tool_position() {
            println!("  Tool at ({:.2}, {:.2}, {:.2})", tool.x, tool.y, tool.z);
        }
        println!();
    }

    // Looking up a sequence that does not exist
    match arm.run_sequence("nonexistent") {
        Ok(()) => println!("Ran nonexistent"),
        Err(e) => println!("{} (expected)", e),
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
