// Host-side tests for the candle session: extinguish semantics, blow decay,
// the one-shot celebration latch, and the per-frame pass ordering.

use cake_core::*;
use rand::prelude::*;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);
const VIEW: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

fn make_session() -> Session {
    Session::new(CakeParams::default(), SceneLayout::default(), 42).expect("default params")
}

fn camera() -> Camera {
    Camera::framing(SceneLayout::default().reference_size, VIEW.aspect())
}

// Ray from the camera eye through the centre of candle `index`'s flame.
fn ray_at(session: &Session, index: usize) -> Ray {
    let eye = camera().eye;
    let (center, _) = session.candles()[index].hit_sphere();
    Ray::new(eye, center - eye)
}

fn assert_count_invariant(session: &Session) {
    let out = session.candles().iter().filter(|c| c.is_out()).count();
    assert_eq!(session.extinguished_count(), out);
}

fn count_release_cues(cues: &[Cue]) -> usize {
    cues.iter()
        .filter(|c| matches!(c, Cue::ReleaseMicrophone))
        .count()
}

#[test]
fn new_session_lights_every_candle() {
    let session = make_session();
    assert_eq!(session.candles().len(), CANDLE_COUNT);
    assert!(session.candles().iter().all(|c| !c.is_out()));
    assert!(session
        .candles()
        .iter()
        .all(|c| (c.current_scale() - 1.0).abs() < f32::EPSILON));
    assert_eq!(session.extinguished_count(), 0);
    assert_eq!(session.mic_status(), MicStatus::Idle);
    assert!(!session.has_celebrated());
}

#[test]
fn invalid_params_are_rejected() {
    let params = CakeParams {
        candle_count: 0,
        ..CakeParams::default()
    };
    assert_eq!(
        Session::new(params, SceneLayout::default(), 1).err(),
        Some(ParamsError::NoCandles)
    );
}

#[test]
fn extinguish_is_idempotent() {
    let mut session = make_session();
    assert_eq!(session.extinguish(3), Extinguish::Extinguished);
    assert_eq!(session.extinguished_count(), 1);

    assert_eq!(session.extinguish(3), Extinguish::AlreadyOut);
    assert_eq!(session.extinguished_count(), 1);
    assert_count_invariant(&session);

    let candle = &session.candles()[3];
    assert_eq!(candle.current_scale(), 0.0);
    assert_eq!(candle.light_intensity(), 0.0);
    assert!(!candle.flame().visible);
}

#[test]
fn extinguish_out_of_range_is_a_no_op() {
    let mut session = make_session();
    assert_eq!(session.extinguish(99), Extinguish::AlreadyOut);
    assert_eq!(session.extinguished_count(), 0);
}

#[test]
fn extinguished_candles_stay_frozen_through_ticks() {
    let mut session = make_session();
    session.mic_granted();
    session.extinguish(0);
    for _ in 0..30 {
        session.tick(FRAME, VIEW, &mut ConstantLevel(200.0));
        let c = &session.candles()[0];
        assert!(c.is_out());
        assert_eq!(c.current_scale(), 0.0);
        assert_eq!(c.light_intensity(), 0.0);
        assert_eq!(c.flame().scale, glam::Vec3::ZERO);
    }
}

#[test]
fn celebration_fires_exactly_once() {
    let mut session = make_session();
    for i in 0..CANDLE_COUNT - 1 {
        assert_eq!(session.extinguish(i), Extinguish::Extinguished);
    }
    assert!(!session.has_celebrated());
    assert!(session.drain_cues().is_empty());

    assert_eq!(session.extinguish(CANDLE_COUNT - 1), Extinguish::Won);
    assert!(session.has_celebrated());
    let cues = session.drain_cues();
    assert_eq!(count_release_cues(&cues), 1);

    // Repeated extinguish calls after the win change nothing.
    for i in 0..CANDLE_COUNT {
        assert_eq!(session.extinguish(i), Extinguish::AlreadyOut);
    }
    assert!(session.drain_cues().is_empty());
    assert_eq!(session.extinguished_count(), CANDLE_COUNT);
}

#[test]
fn win_cues_come_in_sequence_order() {
    let mut session = make_session();
    for i in 0..CANDLE_COUNT {
        session.extinguish(i);
    }
    let cues = session.drain_cues();
    assert_eq!(
        cues,
        vec![
            Cue::ReleaseMicrophone,
            Cue::ShowMessage(CELEBRATION_MESSAGE.to_string()),
            Cue::StartMusic,
            Cue::UnlockScroll,
        ]
    );
}

#[test]
fn blow_decay_never_goes_negative_and_always_extinguishes() {
    let params = CakeParams {
        blow_sensitivity: 0.3,
        ..CakeParams::default()
    };
    let mut session = Session::new(params, SceneLayout::default(), 7).unwrap();
    let mut outcomes = Vec::new();
    for _ in 0..10 {
        outcomes.push(session.apply_blow_decay(0));
        let scale = session.candles()[0].current_scale();
        assert!(scale >= 0.0, "scale went negative: {scale}");
        if session.candles()[0].is_out() {
            break;
        }
    }
    assert!(session.candles()[0].is_out());
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| **o == Some(Extinguish::Extinguished))
            .count(),
        1
    );
    assert_eq!(session.candles()[0].current_scale(), 0.0);
}

#[test]
fn blow_decay_on_extinguished_candle_reports_already_out() {
    let mut session = make_session();
    session.extinguish(2);
    assert_eq!(session.apply_blow_decay(2), Some(Extinguish::AlreadyOut));
    assert_eq!(session.extinguished_count(), 1);
}

#[test]
fn seven_clicks_then_blowing_finishes_the_cake() {
    let mut session = make_session();

    // Click seven times, always aiming at the first lit flame.
    for expected in 1..CANDLE_COUNT {
        let target = session
            .candles()
            .iter()
            .position(|c| !c.is_out())
            .unwrap();
        let ray = ray_at(&session, target);
        match session.click(&ray) {
            ClickOutcome::Extinguished { won, .. } => assert!(!won),
            other => panic!("expected a hit, got {other:?}"),
        }
        assert_eq!(session.extinguished_count(), expected);
        assert_count_invariant(&session);
    }

    let last = session
        .candles()
        .iter()
        .position(|c| !c.is_out())
        .unwrap();
    let mut extinguish_events = 0;
    let mut decays = 0;
    while !session.candles()[last].is_out() {
        decays += 1;
        assert!(decays < 100, "candle never went out");
        if let Some(outcome) = session.apply_blow_decay(last) {
            assert_eq!(outcome, Extinguish::Won);
            extinguish_events += 1;
        }
    }
    // 1.0 down to 0.1 in steps of 0.05, give or take float rounding.
    assert!((18..=19).contains(&decays), "took {decays} decays");
    assert_eq!(extinguish_events, 1);
    assert_eq!(session.extinguished_count(), CANDLE_COUNT);
    assert_eq!(count_release_cues(&session.drain_cues()), 1);

    // Further blowing is a no-op.
    assert_eq!(session.apply_blow_decay(last), Some(Extinguish::AlreadyOut));
    assert!(session.drain_cues().is_empty());
}

#[test]
fn loud_microphone_blows_out_all_candles_together() {
    let mut session = make_session();
    assert!(session.mic_granted());
    let mut mic = ConstantLevel(MIC_THRESHOLD + 10.0);

    let mut frames = 0;
    while !session.all_out() {
        let report = session.tick(FRAME, VIEW, &mut mic);
        assert!(report.blowing);
        assert_count_invariant(&session);
        frames += 1;
        assert!(frames < 100);
    }
    assert!(session.has_celebrated());
    assert_eq!(session.mic_status(), MicStatus::Released);
    assert_eq!(count_release_cues(&session.drain_cues()), 1);

    // Released microphone is no longer sampled.
    let report = session.tick(FRAME, VIEW, &mut mic);
    assert_eq!(report.level, None);
}

#[test]
fn quiet_microphone_does_not_decay() {
    let mut session = make_session();
    session.mic_granted();
    let mut mic = ConstantLevel(MIC_THRESHOLD); // not strictly above
    for _ in 0..50 {
        let report = session.tick(FRAME, VIEW, &mut mic);
        assert_eq!(report.level, Some(MIC_THRESHOLD));
        assert!(!report.blowing);
    }
    assert!(session
        .candles()
        .iter()
        .all(|c| c.current_scale() == 1.0));
}

#[test]
fn denied_microphone_skips_blow_pass_but_clicks_still_work() {
    let mut session = make_session();
    session.mic_denied();
    assert_eq!(session.mic_status(), MicStatus::Denied);

    let mut mic = ConstantLevel(255.0);
    for _ in 0..60 {
        let report = session.tick(FRAME, VIEW, &mut mic);
        assert_eq!(report.level, None);
        assert!(!report.blowing);
    }
    assert!(session
        .candles()
        .iter()
        .all(|c| c.current_scale() == 1.0 && !c.is_out()));

    let ray = ray_at(&session, 0);
    assert!(matches!(
        session.click(&ray),
        ClickOutcome::Extinguished { .. }
    ));
    assert_eq!(session.extinguished_count(), 1);
}

#[test]
fn mic_granted_after_celebration_is_released_immediately() {
    let mut session = make_session();
    for i in 0..CANDLE_COUNT {
        session.extinguish(i);
    }
    assert!(!session.mic_granted());
    assert_eq!(session.mic_status(), MicStatus::Released);
}

#[test]
fn clicks_after_all_out_are_ignored() {
    let mut session = make_session();
    for i in 0..CANDLE_COUNT {
        session.extinguish(i);
    }
    session.drain_cues();

    // Aim at where each put-out flame sits now, so every ray is a geometric hit.
    let rays: Vec<Ray> = (0..CANDLE_COUNT).map(|i| ray_at(&session, i)).collect();
    for (i, ray) in rays.iter().enumerate() {
        let (center, radius) = session.candles()[i].hit_sphere();
        assert!(ray_sphere(ray.origin, ray.dir, center, radius).is_some());
        assert_eq!(pick_flame(session.candles(), ray), None);
        assert_eq!(session.click(ray), ClickOutcome::Ignored);
    }
    assert_eq!(session.extinguished_count(), CANDLE_COUNT);
    assert!(session.drain_cues().is_empty());
}

#[test]
fn flicker_keeps_lit_flames_within_bounds() {
    let mut session = make_session();
    for _ in 0..120 {
        session.tick(FRAME, VIEW, &mut Silence);
        for c in session.candles() {
            let i = c.light_intensity();
            assert!(i >= FLICKER_INTENSITY_MIN);
            assert!(i <= FLICKER_INTENSITY_MIN + FLICKER_INTENSITY_SPAN + 1e-5);
            let s = c.flame().scale;
            assert!(s.y >= 1.0 - FLICKER_STRETCH - 1e-5 && s.y <= 1.0 + FLICKER_STRETCH + 1e-5);
            assert_eq!(c.current_scale(), 1.0);
        }
    }
}

#[test]
fn count_invariant_holds_under_random_interleaving() {
    let mut session = make_session();
    session.mic_granted();
    let mut rng = StdRng::seed_from_u64(1234);
    let mut wins = 0;
    for _ in 0..400 {
        match rng.gen_range(0..3) {
            0 => {
                if session.extinguish(rng.gen_range(0..CANDLE_COUNT)) == Extinguish::Won {
                    wins += 1;
                }
            }
            1 => {
                if session.apply_blow_decay(rng.gen_range(0..CANDLE_COUNT))
                    == Some(Extinguish::Won)
                {
                    wins += 1;
                }
            }
            _ => {
                let level = rng.gen_range(0.0..40.0);
                session.tick(FRAME, VIEW, &mut ConstantLevel(level));
            }
        }
        assert_count_invariant(&session);
    }
    assert!(session.all_out());
    assert!(wins <= 1);
    assert!(session.has_celebrated());
}

#[test]
fn clock_advances_with_ticks() {
    let mut session = make_session();
    for _ in 0..10 {
        session.tick(FRAME, VIEW, &mut Silence);
    }
    assert_eq!(session.clock(), FRAME * 10);
}
