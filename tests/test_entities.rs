use star_glide::config::Tuning;
use star_glide::entities::*;

fn make_session() -> Session {
    Session {
        player: Player {
            x: 100.0,
            y: 240.0,
            vy: 0.0,
            size: 30.0,
            character: Character::Fish,
        },
        items: vec![Item { x: 300.0, y: 100.0, size: 20.0, collected: false }],
        hazards: vec![Hazard { x: 400.0, y: 200.0, size: 25.0, hit: false }],
        backdrop: Backdrop {
            theme: Theme::Ocean,
            decorations: Vec::new(),
        },
        camera_x: 0.0,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width: 800.0,
        height: 480.0,
        tuning: Tuning::default(),
    }
}

#[test]
fn session_clone_is_independent() {
    let s = make_session();
    let mut c = s.clone();
    c.items[0].collected = true;
    c.hazards[0].hit = true;
    c.camera_x = 90.0;
    assert!(!s.items[0].collected);
    assert!(!s.hazards[0].hit);
    assert_eq!(s.camera_x, 0.0);
}

#[test]
fn distance_is_floored_tenth_of_camera() {
    let mut s = make_session();
    assert_eq!(s.distance(), 0);
    s.camera_x = 9.9;
    assert_eq!(s.distance(), 0);
    s.camera_x = 1234.0;
    assert_eq!(s.distance(), 123);
}

#[test]
fn score_text_format() {
    let mut s = make_session();
    s.camera_x = 505.0;
    s.score = 70;
    assert_eq!(s.score_text(), "Distance: 50 | Stars: 70");
}

#[test]
fn player_world_adds_camera() {
    let mut s = make_session();
    s.camera_x = 250.0;
    assert_eq!(s.player_world(), (350.0, 240.0));
}

#[test]
fn only_over_status_is_over() {
    assert!(!GameStatus::Playing.is_over());
    assert!(!GameStatus::Paused.is_over());
    assert!(!GameStatus::ConfirmQuit.is_over());
    assert!(GameStatus::Over(OverCause::Hazard).is_over());
    assert!(GameStatus::Over(OverCause::Quit).is_over());
}

#[test]
fn decorations_move_slower_than_the_world() {
    let kinds = [
        DecorationKind::Cloud { speed: 1.0 },
        DecorationKind::Sun { rotation: 0.0 },
        DecorationKind::Star { twinkle: 0.0 },
        DecorationKind::Moon { phase: 0.0 },
        DecorationKind::Fish { speed: 1.0, direction: 1.0, swim: 0.0 },
        DecorationKind::SeaAnimal { speed: 1.0, direction: -1.0, bob: 0.0 },
    ];
    for kind in kinds {
        let p = kind.parallax();
        assert!(p > 0.0 && p < 1.0, "{kind:?} parallax {p}");
    }
    let sun = Decoration { x: 160.0, y: 70.0, size: 80.0, kind: DecorationKind::Sun { rotation: 0.0 } };
    assert_eq!(sun.screen_x(1000.0), 110.0);
}

#[test]
fn selections_cycle_through_all_values() {
    let mut c = Character::Bird;
    let mut t = Theme::Sky;
    for i in 0..3 {
        assert_eq!(c, Character::ALL[i]);
        assert_eq!(t, Theme::ALL[i]);
        c = c.next();
        t = t.next();
    }
    assert_eq!(c, Character::Bird);
    assert_eq!(t, Theme::Sky);
}
