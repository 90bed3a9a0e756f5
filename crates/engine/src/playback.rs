//! Frame-stepping playback transport.
//!
//! Playback is a cooperative ticker, not a media clock: each tick moves
//! the playhead one frame and playback stops at the end of the timeline.
//! Stopping is simply not ticking again. Ticks never touch history.

use reelcut_common::clock::RateController;
use reelcut_project_model::{FrameRate, Project};

/// Play/pause state plus the tick pacer.
#[derive(Debug, Clone)]
pub struct Playback {
    playing: bool,
    fps: FrameRate,
    rate: RateController,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(FrameRate::default())
    }
}

impl Playback {
    pub fn new(fps: FrameRate) -> Self {
        Self {
            playing: false,
            fps,
            rate: RateController::new(fps),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start playing. From the end of the timeline, rewind to frame 0 first.
    pub fn play(&mut self, project: &mut Project) {
        if project.playhead >= project.duration {
            project.set_playhead(0);
        }
        self.playing = true;
        self.rate.reset();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self, project: &mut Project) {
        if self.playing {
            self.pause();
        } else {
            self.play(project);
        }
    }

    /// Advance one frame. Reaching the end parks the playhead on the last
    /// frame boundary and stops. Returns whether playback continues.
    pub fn tick(&mut self, project: &mut Project) -> bool {
        if !self.playing {
            return false;
        }
        let next = project.playhead + 1;
        if next >= project.duration {
            project.set_playhead(project.duration);
            self.playing = false;
            tracing::debug!(frame = project.playhead, "Playback reached the end");
        } else {
            project.set_playhead(next);
        }
        self.playing
    }

    /// Tick if a frame interval has elapsed at `now_ns`. Returns whether a
    /// tick happened.
    pub fn poll(&mut self, now_ns: u64, project: &mut Project) -> bool {
        if !self.playing {
            return false;
        }
        if project.fps != self.fps {
            self.fps = project.fps;
            self.rate = RateController::new(project.fps);
        }
        if !self.rate.should_tick(now_ns) {
            return false;
        }
        self.tick(project);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_project(duration: u64) -> Project {
        let mut project = Project::new(FrameRate::Fps30);
        project.duration = duration;
        project
    }

    #[test]
    fn test_tick_advances_and_stops_at_end() {
        let mut project = short_project(3);
        let mut playback = Playback::new(project.fps);
        playback.play(&mut project);

        assert!(playback.tick(&mut project));
        assert_eq!(project.playhead, 1);
        assert!(playback.tick(&mut project));
        assert_eq!(project.playhead, 2);
        assert!(!playback.tick(&mut project));
        assert_eq!(project.playhead, 3);
        assert!(!playback.is_playing());

        assert!(!playback.tick(&mut project));
        assert_eq!(project.playhead, 3);
    }

    #[test]
    fn test_play_from_end_rewinds() {
        let mut project = short_project(10);
        project.set_playhead(10);
        let mut playback = Playback::new(project.fps);
        playback.toggle(&mut project);
        assert!(playback.is_playing());
        assert_eq!(project.playhead, 0);
        playback.toggle(&mut project);
        assert!(!playback.is_playing());
    }

    #[test]
    fn test_poll_paces_ticks() {
        let mut project = short_project(100);
        let mut playback = Playback::new(project.fps);
        assert!(!playback.poll(0, &mut project));

        playback.play(&mut project);
        assert!(playback.poll(0, &mut project));
        assert!(!playback.poll(10_000_000, &mut project));
        assert!(playback.poll(34_000_000, &mut project));
        assert_eq!(project.playhead, 2);
    }

    #[test]
    fn test_poll_follows_fps_change() {
        let mut project = short_project(100);
        let mut playback = Playback::new(FrameRate::Fps30);
        playback.play(&mut project);
        project.set_fps(FrameRate::Fps60);
        assert!(playback.poll(0, &mut project));
        assert!(playback.poll(17_000_000, &mut project));
    }
}
