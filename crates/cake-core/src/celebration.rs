use crate::params::CakeParams;
use crate::timeline::Timeline;
use smallvec::SmallVec;
use std::time::Duration;

/// One-shot win latch. `Celebrated` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CelebrationPhase {
    #[default]
    Active,
    Celebrated { at: Duration },
}

impl CelebrationPhase {
    /// Latch into `Celebrated`. Returns `false` if it already was.
    pub fn celebrate(&mut self, at: Duration) -> bool {
        match self {
            CelebrationPhase::Active => {
                *self = CelebrationPhase::Celebrated { at };
                true
            }
            CelebrationPhase::Celebrated { .. } => false,
        }
    }

    pub fn has_celebrated(&self) -> bool {
        matches!(self, CelebrationPhase::Celebrated { .. })
    }
}

/// Page-level effects the front-end must carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Close the audio session and stop the capture tracks.
    ReleaseMicrophone,
    ShowMessage(String),
    /// Best effort; a blocked autoplay must not hold anything else up.
    StartMusic,
    /// Lift the scroll lock held during the interactive phase.
    UnlockScroll,
    /// Fade in the celebration content and navigation, hide the candle
    /// controls, and scroll to the gallery.
    RevealContent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Reveal,
    SpawnBalloon,
}

/// What became due during one `advance` call.
#[derive(Debug, Default)]
pub struct SequencerStep {
    pub cues: SmallVec<[Cue; 4]>,
    pub balloons_to_spawn: usize,
    /// Emit this frame's pair of edge bursts.
    pub confetti: bool,
}

#[derive(Debug)]
pub struct CelebrationSequencer {
    started_at: Option<Duration>,
    confetti_until: Duration,
    timeline: Timeline<Task>,
    balloon_flow_open: bool,
}

impl Default for CelebrationSequencer {
    fn default() -> Self {
        Self {
            started_at: None,
            confetti_until: Duration::ZERO,
            timeline: Timeline::new(),
            balloon_flow_open: false,
        }
    }
}

impl CelebrationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Balloons are still being launched.
    pub fn balloon_flow_open(&self) -> bool {
        self.balloon_flow_open
    }

    /// Kick off the sequence at `now` and return the immediate cues.
    /// Later calls are ignored.
    pub fn start(&mut self, now: Duration, params: &CakeParams) -> SmallVec<[Cue; 4]> {
        let mut cues = SmallVec::new();
        if self.started_at.is_some() {
            return cues;
        }
        self.started_at = Some(now);
        self.confetti_until = now + params.confetti_duration;
        self.timeline.once(now + params.reveal_delay, Task::Reveal);
        self.timeline.every(
            now + params.balloon_interval,
            params.balloon_interval,
            now + params.balloon_window,
            Task::SpawnBalloon,
        );
        self.balloon_flow_open = true;

        cues.push(Cue::ReleaseMicrophone);
        cues.push(Cue::ShowMessage(params.celebration_message.clone()));
        cues.push(Cue::StartMusic);
        cues.push(Cue::UnlockScroll);
        log::info!(
            "[celebration] started at {:.3}s; {} balloons scheduled",
            now.as_secs_f32(),
            params.balloon_spawn_count()
        );
        cues
    }

    /// Everything due at `now`.
    pub fn advance(&mut self, now: Duration) -> SequencerStep {
        let mut step = SequencerStep::default();
        if self.started_at.is_none() {
            return step;
        }
        step.confetti = now < self.confetti_until;

        let mut due = Vec::new();
        self.timeline.advance(now, &mut due);
        for task in due {
            match task {
                Task::Reveal => step.cues.push(Cue::RevealContent),
                Task::SpawnBalloon => step.balloons_to_spawn += 1,
            }
        }
        if self.balloon_flow_open && !self.timeline.contains(|t| *t == Task::SpawnBalloon) {
            self.balloon_flow_open = false;
            log::info!("[celebration] balloon flow finished");
        }
        step
    }
}
