use paddock_core::{Simulation, angle::is_normalized};
use paddock_track::{LineSegment, indy_oval};
use paddock_vehicle::{Controller, ControllerConfig, Drive, VehicleDynamics, VehicleState};
use uom::si::{
    angle::radian,
    f64::{Angle, Time},
    time::second,
    velocity::meter_per_second,
};

use integration_tests::drivers::PurePursuit;

const DT: f64 = 0.05;

fn start_on_goal_line() -> VehicleState {
    let track = indy_oval().unwrap();
    let (tx, ty) = track.tangent(track.start_finish_index()).unwrap();
    let position = track.centerline()[track.start_finish_index()];

    let mut controller = Controller::default();
    controller.reset(position, Angle::new::<radian>(ty.atan2(tx)));
    controller.current_state()
}

#[test]
fn starts_facing_along_the_goal_straight() {
    let state = start_on_goal_line();

    assert_eq!(state.position.as_tuple(), (0.0, -45.0));
    assert!((state.heading.get::<radian>() - std::f64::consts::PI).abs() < 1e-12);
    assert!(state.is_stopped());
}

#[test]
fn pursuit_driver_completes_a_lap_of_the_oval() {
    let track = indy_oval().unwrap();
    let driver = PurePursuit::new(&track, 15.0);
    let drive = Drive::new(VehicleDynamics::default(), driver);

    let start = drive.initial_input(start_on_goal_line());
    let snapshots = drive
        .step_many(start, 1_600, Time::new::<second>(DT))
        .unwrap();

    let max_speed = ControllerConfig::default()
        .max_speed
        .get::<meter_per_second>();
    let edge = track.width() / 2.0 + 1.0;

    let mut lines = vec![("Goal line", *track.goal_line())];
    lines.extend(
        track
            .checkpoints()
            .iter()
            .map(|checkpoint| (checkpoint.label.as_str(), checkpoint.segment)),
    );
    let mut crossed = Vec::new();

    for pair in snapshots.windows(2) {
        let (before, after) = (pair[0].output, pair[1].output);
        assert!(is_normalized(after.heading));
        assert!(after.speed.get::<meter_per_second>() <= max_speed);

        let gap = track.distance_to_centerline(after.position);
        assert!(gap < edge, "left the track: {gap} m from the centerline");

        let path = LineSegment::new(before.position, after.position);
        crossed.extend(
            lines
                .iter()
                .filter(|(_, line)| path.crosses(line))
                .map(|(label, _)| *label),
        );
    }

    let lap = [
        "Turn 1",
        "North Short Chute",
        "Backstretch",
        "Turn 3",
        "South Short Chute",
        "Goal line",
    ];
    assert!(crossed.len() >= lap.len(), "crossed only {crossed:?}");
    assert_eq!(crossed[..lap.len()], lap);
}

#[test]
fn replayed_commands_reproduce_the_lap() {
    let track = indy_oval().unwrap();
    let drive = Drive::new(VehicleDynamics::default(), PurePursuit::new(&track, 12.0));
    let dt = Time::new::<second>(DT);

    let start = drive.initial_input(start_on_goal_line());
    let snapshots = drive.step_many(start, 300, dt).unwrap();

    let mut controller = Controller::default();
    controller.set_state(snapshots[0].output);

    for snapshot in &snapshots[1..] {
        let command = snapshot.input.command;
        let state = controller.step(command.throttle, command.steering, dt);
        assert_eq!(state, snapshot.output);
    }
}
