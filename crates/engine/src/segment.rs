//! Segment planning: candidate cut points for a source of a given length.
//!
//! Planners implement [`SegmentSource`], so a real scene or silence
//! analyzer can replace the arithmetic heuristics here without touching
//! the timeline code that places segments.

use serde::{Deserialize, Serialize};

use reelcut_project_model::{AnimationPreset, Clip, Frame, Project, TrackType, Visual};

/// Shortest media clip placed for a segment, in frames.
pub const MIN_SEGMENT_FRAMES: Frame = 8;

/// Label of text clips that survive segment placement.
pub const TITLE_LABEL: &str = "Title";

/// Why a segment boundary was proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentReason {
    Scene,
    Highlight,
    Silence,
    Manual,
}

/// A planned cut of the source, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// 1-based position in the plan.
    pub index: usize,
    pub start_sec: f64,
    pub end_sec: f64,
    pub reason: SegmentReason,
}

impl Segment {
    pub fn duration_sec(&self) -> f64 {
        (self.end_sec - self.start_sec).max(0.0)
    }
}

/// Anything that can propose segments for a source duration.
pub trait SegmentSource {
    fn segments(&self, total_sec: f64) -> Vec<Segment>;
}

/// How [`SplitPlanner`] cuts the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SplitMode {
    /// Equal parts.
    Count { count: u32 },
    /// Fixed-length parts; the last one may be shorter.
    Seconds { seconds: f64 },
    /// Synthetic pauses: `8 + (i*3 mod 5)` seconds of speech then 1 s of gap.
    Silence,
}

/// Cuts by count, fixed interval, or the silence heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlanner {
    pub mode: SplitMode,
}

impl SplitPlanner {
    pub fn new(mode: SplitMode) -> Self {
        Self { mode }
    }
}

impl SegmentSource for SplitPlanner {
    fn segments(&self, total_sec: f64) -> Vec<Segment> {
        split_by_mode(total_sec, self.mode)
    }
}

/// Split `total_sec` (rounded, at least 1 s) per `mode`.
pub fn split_by_mode(total_sec: f64, mode: SplitMode) -> Vec<Segment> {
    let safe = whole_seconds(total_sec).max(1) as f64;
    match mode {
        SplitMode::Count { count } => {
            let n = count.max(1) as usize;
            let unit = safe / n as f64;
            (0..n)
                .map(|i| {
                    let end_sec = if i == n - 1 {
                        safe
                    } else {
                        (unit * (i + 1) as f64).round()
                    };
                    segment(i + 1, (unit * i as f64).round(), end_sec, SegmentReason::Manual)
                })
                .collect()
        }
        SplitMode::Seconds { seconds } => {
            let step = if seconds.is_finite() { seconds.max(1.0) } else { 30.0 };
            let mut out = vec![];
            let mut t = 0.0;
            while t < safe {
                let next = (t + step).min(safe);
                out.push(segment(out.len() + 1, t, next, SegmentReason::Manual));
                t = next;
            }
            out
        }
        SplitMode::Silence => {
            let mut out = vec![];
            let mut t = 0.0;
            let mut i = 1usize;
            while t < safe {
                let next = (t + 8.0 + ((i * 3) % 5) as f64).min(safe);
                out.push(segment(i, t, next, SegmentReason::Silence));
                t = next + 1.0;
                i += 1;
            }
            out
        }
    }
}

/// Placeholder scene detection: cuts every `6 + (i*3 mod 6)` seconds over
/// at least 8 s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneHeuristic;

impl SegmentSource for SceneHeuristic {
    fn segments(&self, total_sec: f64) -> Vec<Segment> {
        let safe = finite_or_zero(total_sec).max(8.0);
        let mut out = vec![];
        let mut t = 0.0;
        let mut i = 1usize;
        while t < safe {
            let step = (6 + (i * 3) % 6) as f64;
            let next = (t + step).min(safe);
            out.push(segment(i, t, next, SegmentReason::Scene));
            t = next;
            i += 1;
        }
        out
    }
}

/// Placeholder highlight detection: 2 to 6 eight-second windows evenly
/// spaced over the source, one per 25 transcript words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightHeuristic {
    pub word_count: usize,
}

impl HighlightHeuristic {
    pub fn from_transcript(transcript: &str) -> Self {
        Self {
            word_count: transcript.split_whitespace().count(),
        }
    }
}

impl SegmentSource for HighlightHeuristic {
    fn segments(&self, total_sec: f64) -> Vec<Segment> {
        let total = finite_or_zero(total_sec).max(0.0);
        let count = self.word_count.div_ceil(25).clamp(2, 6);
        let unit = total / (count + 1) as f64;
        (0..count)
            .map(|idx| {
                let center = unit * (idx + 1) as f64;
                let start = (center - 4.0).round().max(0.0);
                let end = (center + 4.0).round().min(total);
                segment(idx + 1, start, end, SegmentReason::Highlight)
            })
            .collect()
    }
}

/// Lay segments back-to-back onto the video and audio tracks, with a
/// text label per segment. Existing "Title" text clips are kept; locked
/// tracks are left alone. Returns `false` when there is nothing to place.
pub fn place_segments(project: &mut Project, segments: &[Segment]) -> bool {
    if segments.is_empty() {
        return false;
    }
    let mut video = Vec::with_capacity(segments.len());
    let mut audio = Vec::with_capacity(segments.len());
    let mut labels = Vec::with_capacity(segments.len());
    let mut cursor: Frame = 0;

    for (idx, seg) in segments.iter().enumerate() {
        let n = idx + 1;
        let duration = project.frames(seg.duration_sec()).max(MIN_SEGMENT_FRAMES);
        audio.push(Clip::new(TrackType::Audio, format!("Audio {n}"), cursor, duration));
        video.push(Clip::new(TrackType::Video, format!("Scene {n}"), cursor, duration));

        let mut visual = Visual::new(AnimationPreset::Fade, "#FFFFFF");
        visual.y = 16.0 + (idx % 2) as f64 * 8.0;
        let text_len = ((duration as f64) * 0.6).floor() as Frame;
        labels.push(
            Clip::new(
                TrackType::Text,
                format!("Text {n}"),
                cursor,
                text_len.max(MIN_SEGMENT_FRAMES),
            )
            .with_text(format!("Scene {n}"))
            .with_visual(visual),
        );
        cursor += duration;
    }

    let fill = |project: &mut Project, track: TrackType, clips: Vec<Clip>| {
        if project.is_locked(track) {
            tracing::debug!(%track, "Segment placement skipped locked track");
        } else {
            project.tracks.replace(track, clips);
        }
    };
    fill(project, TrackType::Video, video);
    fill(project, TrackType::Audio, audio);
    let mut text: Vec<Clip> = project
        .tracks
        .get(TrackType::Text)
        .iter()
        .filter(|c| c.label == TITLE_LABEL)
        .cloned()
        .collect();
    text.extend(labels);
    fill(project, TrackType::Text, text);

    project.duration = project
        .duration
        .max(cursor + project.frames(4.0))
        .max(project.tracks.max_end());
    project.set_playhead(0);
    tracing::info!(
        segments = segments.len(),
        end = cursor,
        duration = project.duration,
        "Placed segments"
    );
    true
}

fn segment(index: usize, start_sec: f64, end_sec: f64, reason: SegmentReason) -> Segment {
    Segment {
        index,
        start_sec,
        end_sec,
        reason,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn whole_seconds(value: f64) -> u64 {
    let rounded = finite_or_zero(value).round();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_project_model::FrameRate;

    fn bounds(segments: &[Segment]) -> Vec<(f64, f64)> {
        segments.iter().map(|s| (s.start_sec, s.end_sec)).collect()
    }

    #[test]
    fn test_count_split_covers_total() {
        let segments = split_by_mode(100.0, SplitMode::Count { count: 4 });
        assert_eq!(
            bounds(&segments),
            vec![(0.0, 25.0), (25.0, 50.0), (50.0, 75.0), (75.0, 100.0)]
        );
        assert!(segments.iter().all(|s| s.reason == SegmentReason::Manual));
        assert_eq!(segments[3].index, 4);
    }

    #[test]
    fn test_count_split_rounds_inner_bounds() {
        let segments = split_by_mode(10.0, SplitMode::Count { count: 3 });
        assert_eq!(bounds(&segments), vec![(0.0, 3.0), (3.0, 7.0), (7.0, 10.0)]);
        assert_eq!(split_by_mode(10.0, SplitMode::Count { count: 0 }).len(), 1);
    }

    #[test]
    fn test_seconds_split_keeps_short_tail() {
        let segments = split_by_mode(70.0, SplitMode::Seconds { seconds: 30.0 });
        assert_eq!(bounds(&segments), vec![(0.0, 30.0), (30.0, 60.0), (60.0, 70.0)]);
        assert_eq!(split_by_mode(3.0, SplitMode::Seconds { seconds: 0.0 }).len(), 3);
    }

    #[test]
    fn test_silence_split_leaves_gaps() {
        let segments = split_by_mode(40.0, SplitMode::Silence);
        assert_eq!(
            bounds(&segments),
            vec![(0.0, 11.0), (12.0, 21.0), (22.0, 34.0), (35.0, 40.0)]
        );
        assert!(segments.iter().all(|s| s.reason == SegmentReason::Silence));
    }

    #[test]
    fn test_degenerate_totals() {
        assert_eq!(bounds(&split_by_mode(f64::NAN, SplitMode::Count { count: 2 })), vec![(0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(split_by_mode(-5.0, SplitMode::Silence).len(), 1);
    }

    #[test]
    fn test_scene_heuristic() {
        let segments = SceneHeuristic.segments(30.0);
        assert_eq!(
            bounds(&segments),
            vec![(0.0, 9.0), (9.0, 15.0), (15.0, 24.0), (24.0, 30.0)]
        );
        assert_eq!(bounds(&SceneHeuristic.segments(2.0)), vec![(0.0, 8.0)]);
    }

    #[test]
    fn test_highlight_heuristic() {
        let transcript = vec!["word"; 60].join(" ");
        let planner = HighlightHeuristic::from_transcript(&transcript);
        let segments = planner.segments(120.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(bounds(&segments), vec![(26.0, 34.0), (56.0, 64.0), (86.0, 94.0)]);
        assert!(segments.iter().all(|s| s.reason == SegmentReason::Highlight));

        assert_eq!(HighlightHeuristic::default().segments(60.0).len(), 2);
    }

    #[test]
    fn test_place_segments_back_to_back() {
        let mut project = Project::starter(FrameRate::Fps30);
        let segments = split_by_mode(100.0, SplitMode::Count { count: 4 });
        assert!(place_segments(&mut project, &segments));

        let video = project.tracks.get(TrackType::Video);
        let starts: Vec<Frame> = video.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 750, 1500, 2250]);
        assert_eq!(video[3].label, "Scene 4");
        assert_eq!(project.tracks.get(TrackType::Audio)[1].label, "Audio 2");

        let text = project.tracks.get(TrackType::Text);
        assert_eq!(text.len(), 5);
        assert!(text.iter().any(|c| c.label == TITLE_LABEL));
        let label = text.iter().find(|c| c.label == "Text 2").unwrap();
        assert_eq!(label.duration, 450);
        assert_eq!(label.text.as_deref(), Some("Scene 2"));
        assert_eq!(label.visual.as_ref().unwrap().y, 24.0);

        assert_eq!(project.duration, 3120);
        assert_eq!(project.playhead, 0);
        assert!(project.violations().is_empty());
    }

    #[test]
    fn test_place_segments_min_length_and_locks() {
        let mut project = Project::new(FrameRate::Fps30);
        project.set_locked(TrackType::Audio, true);
        let tiny = [segment(1, 0.0, 0.1, SegmentReason::Manual)];
        assert!(place_segments(&mut project, &tiny));

        assert_eq!(project.tracks.get(TrackType::Video)[0].duration, MIN_SEGMENT_FRAMES);
        assert!(project.tracks.get(TrackType::Audio).is_empty());
        assert!(!place_segments(&mut project, &[]));
    }

    #[test]
    fn test_split_mode_serde() {
        let mode: SplitMode = serde_json::from_str(r#"{"mode":"count","count":3}"#).unwrap();
        assert_eq!(mode, SplitMode::Count { count: 3 });
        let mode: SplitMode = serde_json::from_str(r#"{"mode":"silence"}"#).unwrap();
        assert_eq!(mode, SplitMode::Silence);
    }
}
