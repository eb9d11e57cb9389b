//! Car motion state machine
//!
//! The car idles until it is started, then shuttles along z between
//! [`NEAR_LIMIT`] and [`FAR_LIMIT`]. Crossing a limit produces a [`Turn`]
//! that the caller applies in the same frame; nothing about the turn is
//! kept between frames.

use bevy::prelude::Resource;

use crate::config::car::{BACKWARD_LANE_X, FAR_LIMIT, FORWARD_LANE_X, NEAR_LIMIT, STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    #[default]
    Idle,
    /// Driving towards [`FAR_LIMIT`] (z decreasing)
    MovingForward,
    /// Driving back towards [`NEAR_LIMIT`] (z increasing)
    MovingBackward,
}

/// Emitted once per boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turn {
    /// Phase the car is in after turning
    pub phase: MotionPhase,
    /// Lane (x coordinate) the car snaps to
    pub lane_x: f32,
}

/// Result of advancing the car by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub z: f32,
    pub turn: Option<Turn>,
}

#[derive(Resource, Debug, Default)]
pub struct CarMotion {
    phase: MotionPhase,
}

impl CarMotion {
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != MotionPhase::Idle
    }

    /// `Idle -> MovingForward`. Returns false if the car was already moving.
    pub fn start(&mut self) -> bool {
        if self.is_started() {
            return false;
        }
        self.phase = MotionPhase::MovingForward;
        true
    }

    /// Advance from `z` by one step. `None` while idle.
    pub fn step(&mut self, z: f32) -> Option<MotionStep> {
        let z = match self.phase {
            MotionPhase::Idle => return None,
            MotionPhase::MovingForward => z - STEP,
            MotionPhase::MovingBackward => z + STEP,
        };

        let turn = match self.phase {
            MotionPhase::MovingForward if z < FAR_LIMIT => Some(Turn {
                phase: MotionPhase::MovingBackward,
                lane_x: BACKWARD_LANE_X,
            }),
            MotionPhase::MovingBackward if z > NEAR_LIMIT => Some(Turn {
                phase: MotionPhase::MovingForward,
                lane_x: FORWARD_LANE_X,
            }),
            _ => None,
        };

        if let Some(turn) = turn {
            self.phase = turn.phase;
        }

        Some(MotionStep { z, turn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn started() -> CarMotion {
        let mut motion = CarMotion::default();
        assert!(motion.start());
        motion
    }

    #[test]
    fn idle_car_does_not_move() {
        let mut motion = CarMotion::default();
        assert_eq!(motion.phase(), MotionPhase::Idle);
        assert_eq!(motion.step(-1.0), None);
        assert_eq!(motion.phase(), MotionPhase::Idle);
    }

    #[test]
    fn start_only_leaves_idle_once() {
        let mut motion = started();
        assert_eq!(motion.phase(), MotionPhase::MovingForward);
        assert!(!motion.start());
        assert_eq!(motion.phase(), MotionPhase::MovingForward);
    }

    #[test]
    fn forward_decrements_by_one_step() {
        let mut motion = started();
        let step = motion.step(-1.0).unwrap();
        assert!((step.z - -1.1).abs() < EPS);
        assert_eq!(step.turn, None);
    }

    #[test]
    fn crossing_far_limit_turns_backward() {
        let mut motion = started();
        let step = motion.step(-18.0).unwrap();
        assert!((step.z - -18.1).abs() < EPS);
        assert_eq!(
            step.turn,
            Some(Turn {
                phase: MotionPhase::MovingBackward,
                lane_x: -13.5,
            })
        );
        assert_eq!(motion.phase(), MotionPhase::MovingBackward);

        let next = motion.step(step.z).unwrap();
        assert!(next.z > step.z);
        assert_eq!(next.turn, None);
    }

    #[test]
    fn crossing_near_limit_turns_forward() {
        let mut motion = started();
        let mut z = motion.step(-18.0).unwrap().z;
        let mut turn = None;
        for _ in 0..400 {
            let step = motion.step(z).unwrap();
            z = step.z;
            if step.turn.is_some() {
                turn = step.turn;
                break;
            }
        }
        assert_eq!(
            turn,
            Some(Turn {
                phase: MotionPhase::MovingForward,
                lane_x: -11.0,
            })
        );
        assert!(z > -1.0);
    }

    #[test]
    fn oscillation_stays_within_one_step_of_the_lane_ends() {
        let mut motion = started();
        let mut z = NEAR_LIMIT;
        let mut turns = 0;
        for _ in 0..5_000 {
            let step = motion.step(z).unwrap();
            z = step.z;
            assert!(z >= FAR_LIMIT - STEP - EPS, "z = {z}");
            assert!(z <= NEAR_LIMIT + STEP + EPS, "z = {z}");
            if step.turn.is_some() {
                turns += 1;
            }
        }
        // One lap is ~170 steps each way, so 5000 steps cross a limit ~29 times.
        assert!((27..=31).contains(&turns), "turns = {turns}");
    }

    #[test]
    fn exactly_one_turn_per_crossing() {
        let mut motion = started();
        let mut z = NEAR_LIMIT;
        let mut last_turn_at = None;
        for tick in 0..2_000 {
            let step = motion.step(z).unwrap();
            z = step.z;
            if step.turn.is_some() {
                if let Some(previous) = last_turn_at {
                    assert!(tick - previous > 100, "turned at {previous} and {tick}");
                }
                last_turn_at = Some(tick);
            }
        }
    }
}
