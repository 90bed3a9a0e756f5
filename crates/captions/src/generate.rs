//! Narration → timed caption cues.
//!
//! Text is split into sentence-like units, long units are cut into fixed
//! word groups, and each chunk gets a share of the total duration
//! proportional to its non-whitespace character count. The last chunk
//! absorbs rounding so the shares sum to the total exactly.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use reelcut_project_model::{Cue, Frame, FrameRate, Project};

/// Shortest generated cue, in seconds.
pub const MIN_CUE_SECS: f64 = 0.16;

/// Duration used when the caller passes a non-finite one.
const FALLBACK_DURATION_SECS: f64 = 30.0;

static SENTENCE_UNIT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^.!?。！？]+[.!?。！？]?").ok());

/// Caption generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionOptions {
    /// Maximum words per cue, clamped to `[2, 10]`.
    pub words_per_caption: u32,
    /// Shift applied to every cue, clamped to `[-500, 1500]` ms.
    pub delay_ms: i64,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            words_per_caption: 5,
            delay_ms: 0,
        }
    }
}

impl CaptionOptions {
    pub fn new(words_per_caption: u32, delay_ms: i64) -> Self {
        Self {
            words_per_caption,
            delay_ms,
        }
    }

    pub fn safe_words(&self) -> usize {
        self.words_per_caption.clamp(2, 10) as usize
    }

    pub fn delay_secs(&self) -> f64 {
        self.delay_ms.clamp(-500, 1500) as f64 / 1000.0
    }
}

/// A cue timed in seconds, before conversion to frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedCue {
    pub start_secs: f64,
    pub end_secs: f64,
    pub text: String,
}

/// Split narration into caption-sized chunks.
pub fn caption_chunks(text: &str, words_per_caption: usize) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return vec![];
    }
    let safe_words = words_per_caption.clamp(2, 10);

    let units: Vec<&str> = match SENTENCE_UNIT.as_ref() {
        Some(re) => re.find_iter(&normalized).map(|m| m.as_str()).collect(),
        None => vec![normalized.as_str()],
    };

    let mut chunks = Vec::new();
    for unit in units.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        let words: Vec<&str> = unit.split_whitespace().collect();
        if words.len() <= safe_words {
            chunks.push(unit.to_string());
            continue;
        }
        chunks.extend(words.chunks(safe_words).map(|group| group.join(" ")));
    }
    chunks
}

fn chunk_weight(chunk: &str) -> usize {
    chunk.chars().filter(|c| !c.is_whitespace()).count().max(1)
}

/// Generate timed cues covering `duration_secs`.
///
/// Cues pushed to or past the end by the delay are dropped. Short cues are
/// extended to [`MIN_CUE_SECS`] but never past the total; every emitted cue
/// satisfies `end > start`.
pub fn generate_cues(narration: &str, duration_secs: f64, options: CaptionOptions) -> Vec<TimedCue> {
    let chunks = caption_chunks(narration, options.safe_words());
    if chunks.is_empty() {
        return vec![];
    }

    let total = if duration_secs.is_finite() {
        duration_secs.max(1.0)
    } else {
        FALLBACK_DURATION_SECS
    };
    let weights: Vec<usize> = chunks.iter().map(|c| chunk_weight(c)).collect();
    let total_weight = weights.iter().sum::<usize>().max(1) as f64;
    let delay = options.delay_secs();
    let last = chunks.len() - 1;

    let mut cues = Vec::with_capacity(chunks.len());
    let mut elapsed = 0.0;
    for (idx, (chunk, weight)) in chunks.into_iter().zip(weights).enumerate() {
        let share = if idx == last {
            (total - elapsed).max(0.0)
        } else {
            total * weight as f64 / total_weight
        };
        let base_start = elapsed;
        let base_end = (base_start + share).min(total);
        elapsed = base_end;

        let start = (base_start + delay).clamp(0.0, total);
        if start >= total {
            continue;
        }
        let end = (base_end + delay).min(total).max(start + MIN_CUE_SECS).min(total);
        if end <= start {
            continue;
        }
        cues.push(TimedCue {
            start_secs: start,
            end_secs: end,
            text: chunk,
        });
    }
    cues
}

/// Convert timed cues to frame cues on a timeline of `total` frames.
///
/// Ends are clamped to the timeline; a cue that collapses to zero length
/// after rounding is dropped.
pub fn cues_to_frames(timed: &[TimedCue], fps: FrameRate, total: Frame) -> Vec<Cue> {
    timed
        .iter()
        .filter_map(|t| {
            let start = fps.frames(t.start_secs).min(total);
            let end = fps.frames(t.end_secs).min(total);
            (end > start).then(|| Cue::new(start, end, t.text.clone()))
        })
        .collect()
}

/// Generate frame cues spanning the whole project timeline.
pub fn generate_project_cues(project: &Project, narration: &str, options: CaptionOptions) -> Vec<Cue> {
    let duration_secs = project.seconds(project.duration);
    let timed = generate_cues(narration, duration_secs, options);
    let cues = cues_to_frames(&timed, project.fps, project.duration);
    tracing::info!(
        count = cues.len(),
        words_per_caption = options.safe_words(),
        delay_ms = options.delay_ms,
        "Generated caption cues"
    );
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_split_sentences_then_words() {
        let chunks = caption_chunks("Hello there.  How are you today my friend? Fine", 3);
        assert_eq!(
            chunks,
            vec!["Hello there.", "How are you", "today my friend?", "Fine"]
        );
    }

    #[test]
    fn test_chunks_handle_cjk_punctuation_and_newlines() {
        let chunks = caption_chunks("첫 문장。\n두 번째！", 5);
        assert_eq!(chunks, vec!["첫 문장。", "두 번째！"]);
    }

    #[test]
    fn test_blank_narration_is_empty() {
        assert!(caption_chunks("  \n\t ", 5).is_empty());
        assert!(generate_cues("   ", 10.0, CaptionOptions::default()).is_empty());
    }

    #[test]
    fn test_words_per_caption_clamped() {
        let chunks = caption_chunks("a b c d e f", 1);
        assert_eq!(chunks, vec!["a b", "c d", "e f"]);
    }

    #[test]
    fn test_last_cue_absorbs_remainder() {
        let cues = generate_cues("aa. bbbbb. c", 10.0, CaptionOptions::default());
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].start_secs, 0.0);
        assert!((cues[0].end_secs - 3.0).abs() < 1e-9);
        assert!((cues[1].end_secs - 9.0).abs() < 1e-9);
        assert_eq!(cues[2].end_secs, 10.0);
    }

    #[test]
    fn test_delay_shift_drops_overflow() {
        let options = CaptionOptions::new(5, 1500);
        let cues = generate_cues("one. two. three. four.", 2.0, options);
        assert!(cues.iter().all(|c| c.start_secs < 2.0 && c.end_secs <= 2.0));
        assert!(cues.len() < 4);
        assert!((cues[0].start_secs - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_delay_clamps_to_zero() {
        let options = CaptionOptions::new(5, -2000);
        let cues = generate_cues("one. two.", 4.0, options);
        assert_eq!(cues[0].start_secs, 0.0);
        assert!((cues[1].start_secs - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_minimum_cue_length() {
        let text = format!("{}. x. {}.", "a".repeat(200), "b".repeat(200));
        let cues = generate_cues(&text, 1.0, CaptionOptions::default());
        assert_eq!(cues[1].text, "x.");
        assert!(cues[1].end_secs - cues[1].start_secs >= MIN_CUE_SECS - 1e-9);
        assert!(cues.iter().all(|c| c.end_secs <= 1.0));
    }

    #[test]
    fn test_non_finite_duration_uses_fallback() {
        let cues = generate_cues("hello world", f64::NAN, CaptionOptions::default());
        assert_eq!(cues.last().map(|c| c.end_secs), Some(30.0));
    }

    #[test]
    fn test_cues_to_frames() {
        let timed = vec![
            TimedCue {
                start_secs: 0.0,
                end_secs: 1.0,
                text: "a".into(),
            },
            TimedCue {
                start_secs: 1.99,
                end_secs: 2.5,
                text: "b".into(),
            },
        ];
        let cues = cues_to_frames(&timed, FrameRate::Fps30, 60);
        assert_eq!(cues.len(), 1);
        assert_eq!((cues[0].start, cues[0].end), (0, 30));
    }

    #[test]
    fn test_project_cues_end_at_duration() {
        let project = Project::new(FrameRate::Fps30);
        let cues = generate_project_cues(&project, "one two three. four five six.", CaptionOptions::default());
        assert_eq!(cues.len(), 2);
        assert_eq!(cues.last().map(|c| c.end), Some(project.duration));
    }
}
