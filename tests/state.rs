use bevy_ecs::system::RunSystemOnce;
use speculoos::prelude::*;
use tile_pacman::{
    audio::{AudioSink, Sound},
    systems::{all_points_consumed, exit_system, stage_system, AudioEvent, AudioResource, GameStage, GlobalState, PauseState},
};

mod common;

#[test]
fn test_all_points_consumed_ignores_strawberries() {
    assert_that(&all_points_consumed(&common::grid("1 15 17"))).is_false();
    assert_that(&all_points_consumed(&common::grid("1 16 17"))).is_true();
    assert_that(&all_points_consumed(&common::grid("1 17 1"))).is_true();
}

#[test]
fn test_stage_system_wins_when_cleared() {
    let mut world = common::create_test_world(common::grid("1 16 17 1"));

    world.run_system_once(stage_system).expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Won);
    assert_that(&common::audio_events(&world)).is_equal_to(vec![AudioEvent::StopMusic]);
}

#[test]
fn test_stage_system_keeps_playing_with_points_left() {
    let mut world = common::create_test_world(common::grid("1 15 17 1"));

    world.run_system_once(stage_system).expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Playing);
    assert_that(&common::audio_events(&world)).is_empty();
}

#[test]
fn test_stage_system_does_not_override_loss() {
    let mut world = common::create_test_world(common::grid("1 17 1"));
    *world.resource_mut::<GameStage>() = GameStage::Lost;

    world.run_system_once(stage_system).expect("System should run successfully");

    assert_that(world.resource::<GameStage>()).is_equal_to(&GameStage::Lost);
    assert_that(&common::audio_events(&world)).is_empty();
}

#[test]
fn test_exit_system_while_playing() {
    let mut world = common::create_test_world(common::open_grid(3, 3));

    world.run_system_once(exit_system).expect("System should run successfully");

    assert_that(&world.resource::<GlobalState>().exit).is_false();
}

#[test]
fn test_exit_system_after_win() {
    let mut world = common::create_test_world(common::open_grid(3, 3));
    *world.resource_mut::<GameStage>() = GameStage::Won;

    world.run_system_once(exit_system).expect("System should run successfully");

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_exit_system_after_loss_without_device() {
    let mut world = common::create_test_world(common::open_grid(3, 3));
    *world.resource_mut::<GameStage>() = GameStage::Lost;

    world.run_system_once(exit_system).expect("System should run successfully");

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_exit_system_waits_for_death_sound() {
    let mut world = common::create_test_world(common::open_grid(3, 3));
    *world.resource_mut::<GameStage>() = GameStage::Lost;
    let audio = common::RecordingAudio::default();
    let mut device = audio.clone();
    device.play(Sound::Death);
    world.insert_non_send_resource(AudioResource(Box::new(device)));

    world.run_system_once(exit_system).expect("System should run successfully");
    assert_that(&world.resource::<GlobalState>().exit).is_false();

    audio.0.borrow_mut().still_playing.clear();
    world.run_system_once(exit_system).expect("System should run successfully");
    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_pause_toggle() {
    let mut pause = PauseState::default();
    assert_that(&pause.active()).is_false();

    pause.toggle();
    assert_that(&pause.active()).is_true();

    pause.toggle();
    assert_that(&pause).is_equal_to(PauseState::Inactive);
}

#[test]
fn test_terminal_stages() {
    assert_that(&GameStage::Playing.is_terminal()).is_false();
    assert_that(&GameStage::Won.is_terminal()).is_true();
    assert_that(&GameStage::Lost.is_terminal()).is_true();
}
