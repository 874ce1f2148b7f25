use descent_shooter::audio::*;

#[test]
fn events_map_to_their_clips() {
    assert_eq!(GameEvent::ShotFired.clip(), Clip::Fire);
    assert_eq!(GameEvent::Explosion.clip(), Clip::Explosion);
    assert_eq!(GameEvent::GameOver.clip(), Clip::GameOver);
}

#[test]
fn dispatch_plays_in_emission_order() {
    let mut rec = Recorder::default();
    dispatch(
        &mut rec,
        &[GameEvent::ShotFired, GameEvent::Explosion, GameEvent::GameOver],
    );
    assert_eq!(rec.played, vec![Clip::Fire, Clip::Explosion, Clip::GameOver]);
}

#[test]
fn dispatch_with_no_events_plays_nothing() {
    let mut rec = Recorder::default();
    dispatch(&mut rec, &[]);
    assert!(rec.played.is_empty());
}

#[test]
fn terminal_bell_rings_for_explosion_and_game_over_only() {
    let mut bell = TerminalBell::new(Vec::new());
    bell.play(Clip::Fire);
    assert!(bell.into_inner().is_empty());

    let mut bell = TerminalBell::new(Vec::new());
    dispatch(&mut bell, &[GameEvent::Explosion, GameEvent::ShotFired, GameEvent::GameOver]);
    assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
}

#[test]
fn sinks_work_behind_a_trait_object() {
    let mut rec = Recorder::default();
    {
        let sink: &mut dyn AudioSink = &mut rec;
        dispatch(sink, &[GameEvent::Explosion]);
    }
    assert_eq!(rec.played, vec![Clip::Explosion]);
}
