use bevy_ecs::{event::Events, system::RunSystemOnce, world::World};
use speculoos::prelude::*;
use tile_pacman::{
    audio::{AudioSink, NullAudio, Sound},
    systems::{audio_system, AudioEvent, AudioResource, AudioState},
};

mod common;

fn world_with_device(muted: bool) -> (World, common::RecordingAudio) {
    let mut world = common::create_test_world(common::open_grid(3, 3));
    world.insert_resource(AudioState { muted });
    let audio = common::RecordingAudio::default();
    world.insert_non_send_resource(AudioResource(Box::new(audio.clone())));
    (world, audio)
}

fn write_audio(world: &mut World, event: AudioEvent) {
    world.resource_mut::<Events<AudioEvent>>().send(event);
}

#[test]
fn test_plays_sounds_and_advances_stream() {
    let (mut world, audio) = world_with_device(false);
    write_audio(&mut world, AudioEvent::PlaySound(Sound::Chomp));

    world.run_system_once(audio_system).expect("System should run successfully");

    let log = audio.0.borrow();
    assert_that(&log.played).is_equal_to(vec![Sound::Chomp]);
    assert_that(&log.stream_updates).is_equal_to(1);
    assert_that(&log.muted).is_false();
}

#[test]
fn test_muted_skips_sounds_and_stream() {
    let (mut world, audio) = world_with_device(true);
    write_audio(&mut world, AudioEvent::PlaySound(Sound::Death));

    world.run_system_once(audio_system).expect("System should run successfully");

    let log = audio.0.borrow();
    assert_that(&log.played).is_empty();
    assert_that(&log.stream_updates).is_equal_to(0);
    assert_that(&log.muted).is_true();
}

#[test]
fn test_stop_music_applies_while_muted() {
    let (mut world, audio) = world_with_device(true);
    write_audio(&mut world, AudioEvent::StopMusic);

    world.run_system_once(audio_system).expect("System should run successfully");

    assert_that(&audio.0.borrow().music_stopped).is_equal_to(1);
}

#[test]
fn test_without_device() {
    let mut world = common::create_test_world(common::open_grid(3, 3));
    write_audio(&mut world, AudioEvent::PlaySound(Sound::Chomp));

    world.run_system_once(audio_system).expect("System should run successfully");
}

#[test]
fn test_null_audio_never_playing() {
    let (mut world, _) = world_with_device(false);
    world.insert_non_send_resource(AudioResource(Box::new(NullAudio)));
    write_audio(&mut world, AudioEvent::PlaySound(Sound::Death));

    world.run_system_once(audio_system).expect("System should run successfully");

    let device = world.non_send_resource::<AudioResource>();
    assert_that(&device.0.is_playing(Sound::Death)).is_false();
}

#[test]
fn test_sound_file_names() {
    assert_that(&Sound::Chomp.file_name()).is_equal_to("chomp.wav");
    assert_that(&Sound::Death.file_name()).is_equal_to("death.wav");
}
