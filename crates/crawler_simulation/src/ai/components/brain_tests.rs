//! Tests for the sense policy

use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::bridge::AnimationState;

fn ogre_brain() -> EnemyBrain {
    EnemyBrain::new(800.0, Duration::from_millis(500))
}

fn at_distance(distance: f32) -> Sensation {
    Sensation::between(Vec2::ZERO, Vec2::new(distance, 0.0))
}

#[test]
fn test_sensation_between() {
    let sensation = Sensation::between(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
    assert_eq!(sensation.distance, 5.0);
    assert_eq!(sensation.offset, Vec2::new(3.0, 4.0));
}

#[test]
fn test_far_player_wanders_at_half_speed() {
    let mut brain = ogre_brain();

    let response = brain.sense(&at_distance(1000.0), false);

    assert_eq!(response.movement, MovementAction::Randomly { speed_ratio: 0.5 });
    assert!(!response.play_alert);
    assert_eq!(response.animation, AnimationState::Idle);
    assert_eq!(response.state, BehaviorState::Idle);
    assert!(!brain.alerted);
}

#[test]
fn test_in_range_chases_and_shouts_once() {
    let mut brain = ogre_brain();

    // 700 < 800 (sense) but ≥ 533.3 (attack)
    let first = brain.sense(&at_distance(700.0), false);
    assert_eq!(first.movement, MovementAction::TowardsPlayer);
    assert!(first.play_alert);
    assert_eq!(first.state, BehaviorState::Alerted);
    assert_eq!(first.animation, AnimationState::Idle);
}

#[test]
fn test_attack_range_keeps_alert_while_cue_plays() {
    let mut brain = ogre_brain();

    let first = brain.sense(&at_distance(300.0), false);
    assert!(first.play_alert);
    assert_eq!(first.animation, AnimationState::Attacking);
    assert_eq!(first.state, BehaviorState::Attacking);
    assert!(brain.alerted);

    // Shout still playing → no re-trigger
    let second = brain.sense(&at_distance(300.0), true);
    assert!(!second.play_alert);
    assert_eq!(second.movement, MovementAction::TowardsPlayer);

    // Shout finished → shout again
    let third = brain.sense(&at_distance(300.0), false);
    assert!(third.play_alert);
}

#[test]
fn test_leaving_attack_range_clears_alert() {
    let mut brain = ogre_brain();

    brain.sense(&at_distance(300.0), false);
    assert!(brain.alerted);

    // Between attack and sense range: alert cleared after the chase decision
    let response = brain.sense(&at_distance(700.0), true);
    assert!(!response.play_alert);
    assert!(!brain.alerted);
    assert_eq!(response.animation, AnimationState::Idle);

    // So the next in-range poll shouts even though the cue is still playing
    let next = brain.sense(&at_distance(700.0), true);
    assert!(next.play_alert);
}

#[test]
fn test_range_boundaries_are_strict() {
    let mut brain = ogre_brain();

    let at_sense = brain.sense(&at_distance(800.0), false);
    assert_eq!(at_sense.movement, MovementAction::Randomly { speed_ratio: 0.5 });

    let at_attack = brain.sense(&at_distance(brain.attack_range()), false);
    assert_eq!(at_attack.animation, AnimationState::Idle);
    assert_eq!(at_attack.state, BehaviorState::Alerted);
}

#[test]
fn test_dead_brain_is_inert() {
    let mut brain = ogre_brain();
    brain.state = BehaviorState::Dead;

    let response = brain.sense(&at_distance(10.0), false);

    assert_eq!(response.state, BehaviorState::Dead);
    assert!(!response.play_alert);
    assert!(!brain.alerted);
}
