//! Template instantiation.
//!
//! Turns a [`TemplatePayload`] (tracks timed in seconds, with
//! `{{title}}`/`{{topic}}` placeholders) into clips and lays them onto a
//! project. A track is replaced only when the template produced clips for
//! it; every other track is left as it was.

use std::sync::LazyLock;

use regex::Regex;

use reelcut_project_model::{
    clamp_template_secs, AnimationPreset, Clip, Frame, FrameRate, Project, TemplatePayload,
    TemplateTrack, TrackType, Tracks, Visual, MIN_CLIP_FRAMES,
};

/// Shortest timeline end a template produces, in seconds.
pub const TEMPLATE_MIN_END_SECS: f64 = 10.0;

/// Space left after the last template clip, in seconds.
pub const TEMPLATE_TAIL_SECS: f64 = 2.0;

static TITLE_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{\s*title\s*\}\}").ok());
static TOPIC_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{\s*topic\s*\}\}").ok());

/// Values substituted into template text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    pub title: String,
    pub topic: String,
}

impl TemplateVars {
    pub fn new(title: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topic: topic.into(),
        }
    }
}

/// Replace `{{title}}` and `{{topic}}` (any case, inner spaces allowed).
pub fn fill_placeholders(text: &str, vars: &TemplateVars) -> String {
    let mut out = text.to_string();
    for (token, value) in [(&*TITLE_TOKEN, &vars.title), (&*TOPIC_TOKEN, &vars.topic)] {
        if let Some(re) = token {
            out = re.replace_all(&out, regex::NoExpand(value)).into_owned();
        }
    }
    out
}

/// Build the clip for one template entry.
pub fn instantiate_track(
    entry: &TemplateTrack,
    template_name: &str,
    fps: FrameRate,
    vars: &TemplateVars,
) -> Clip {
    let track = entry.track;
    let label = entry
        .label
        .clone()
        .unwrap_or_else(|| format!("{template_name}-{track}"));
    let mut clip = Clip::new(
        track,
        label,
        fps.frames(clamp_template_secs(entry.start)),
        fps.frames(clamp_template_secs(entry.duration)).max(MIN_CLIP_FRAMES),
    );
    clip.text = entry
        .text
        .as_deref()
        .map(|t| fill_placeholders(t, vars))
        .filter(|t| !t.is_empty());
    clip.visual = track.has_visual().then(|| {
        let animation = entry.animation.unwrap_or(AnimationPreset::None);
        let style = entry.style.clone().unwrap_or_default();
        let mut visual = Visual::new(animation, style.color.as_deref().unwrap_or("#FFFFFF"));
        visual.apply_style(&style);
        visual.animation = animation;
        visual
    });
    clip
}

/// Every template entry as clips, grouped by track.
pub fn instantiate_template(
    payload: &TemplatePayload,
    template_name: &str,
    fps: FrameRate,
    vars: &TemplateVars,
) -> Tracks {
    let mut tracks = Tracks::default();
    for entry in &payload.tracks {
        let clip = instantiate_track(entry, template_name, fps, vars);
        tracks.make_mut(entry.track).push(clip);
    }
    for track in TrackType::ALL {
        reelcut_project_model::sort_clips(tracks.make_mut(track));
    }
    tracks
}

/// Lay a template onto a project. Returns the number of tracks replaced.
///
/// Locked tracks and tracks the template leaves empty keep their clips.
/// The timeline grows to cover the template plus a short tail and the
/// playhead returns to the start.
pub fn apply_template(
    project: &mut Project,
    payload: &TemplatePayload,
    template_name: &str,
    vars: &TemplateVars,
) -> usize {
    let generated = instantiate_template(payload, template_name, project.fps, vars);
    let mut replaced = 0;
    for (track, clips) in generated.iter() {
        if clips.is_empty() {
            continue;
        }
        if project.is_locked(track) {
            tracing::debug!(%track, "Template skipped locked track");
            continue;
        }
        project.tracks.replace(track, clips.to_vec());
        replaced += 1;
    }

    let end: Frame = generated
        .max_end()
        .max(project.frames(TEMPLATE_MIN_END_SECS));
    project.duration = project
        .duration
        .max(end.saturating_add(project.frames(TEMPLATE_TAIL_SECS)))
        .max(project.tracks.max_end());
    project.set_playhead(0);
    tracing::info!(
        template = template_name,
        entries = payload.tracks.len(),
        replaced,
        duration = project.duration,
        "Applied template"
    );
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_project_model::parse_template_payload;

    fn payload(json: &str) -> TemplatePayload {
        parse_template_payload(json).unwrap()
    }

    #[test]
    fn test_fill_placeholders_any_case() {
        let vars = TemplateVars::new("Big News", "rust");
        assert_eq!(
            fill_placeholders("{{title}} / {{ TOPIC }} / {{Title}}", &vars),
            "Big News / rust / Big News"
        );
        let dollar = TemplateVars::new("$1 deals", "");
        assert_eq!(fill_placeholders("{{title}}", &dollar), "$1 deals");
    }

    #[test]
    fn test_instantiate_text_entry() {
        let p = payload(
            r##"{"tracks":[{"type":"text","start":1,"duration":0.05,"text":"{{title}}",
                "animation":"slide","style":{"y":80,"color":"#FF0000"}}]}"##,
        );
        let clip = instantiate_track(&p.tracks[0], "Hook", FrameRate::Fps30, &TemplateVars::new("Hi", ""));

        assert_eq!(clip.label, "Hook-text");
        assert_eq!(clip.start, 30);
        assert_eq!(clip.duration, MIN_CLIP_FRAMES);
        assert_eq!(clip.text.as_deref(), Some("Hi"));
        assert_eq!(clip.color, "#facc15");
        let visual = clip.visual.unwrap();
        assert_eq!(visual.animation, AnimationPreset::Slide);
        assert_eq!(visual.y, 80.0);
        assert_eq!(visual.x, 50.0);
        assert_eq!(visual.color, "#FF0000");
    }

    #[test]
    fn test_media_entries_have_no_visual() {
        let p = payload(r#"{"tracks":[{"type":"video","start":0,"duration":5,"label":"Bg","text":""}]}"#);
        let clip = instantiate_track(&p.tracks[0], "T", FrameRate::Fps60, &TemplateVars::default());
        assert_eq!(clip.label, "Bg");
        assert_eq!(clip.duration, 300);
        assert!(clip.visual.is_none());
        assert!(clip.text.is_none());
    }

    #[test]
    fn test_apply_replaces_only_produced_tracks() {
        let mut project = Project::starter(FrameRate::Fps30);
        let original_audio = project.tracks.get(TrackType::Audio).to_vec();
        project.set_playhead(200);
        let p = payload(
            r#"{"tracks":[
                {"type":"video","start":0,"duration":50},
                {"type":"text","start":2,"duration":3,"text":"{{topic}}"},
                {"type":"text","start":0,"duration":2,"text":"first"}
            ]}"#,
        );

        let replaced = apply_template(&mut project, &p, "Long", &TemplateVars::new("", "Cats"));
        assert_eq!(replaced, 2);
        assert_eq!(project.tracks.get(TrackType::Audio), original_audio.as_slice());
        let text = project.tracks.get(TrackType::Text);
        assert_eq!(text[0].text.as_deref(), Some("first"));
        assert_eq!(text[1].text.as_deref(), Some("Cats"));
        assert_eq!(project.duration, 1560);
        assert_eq!(project.playhead, 0);
        assert!(project.violations().is_empty());
    }

    #[test]
    fn test_apply_skips_locked_tracks() {
        let mut project = Project::starter(FrameRate::Fps30);
        project.set_locked(TrackType::Video, true);
        let before = project.tracks.get(TrackType::Video).to_vec();
        let p = payload(r#"{"tracks":[{"type":"video","start":0,"duration":5}]}"#);

        assert_eq!(apply_template(&mut project, &p, "T", &TemplateVars::default()), 0);
        assert_eq!(project.tracks.get(TrackType::Video), before.as_slice());
    }

    #[test]
    fn test_short_template_keeps_minimum_tail() {
        let mut project = Project::new(FrameRate::Fps30);
        project.duration = 60;
        let p = payload(r#"{"tracks":[{"type":"effect","start":0,"duration":1}]}"#);
        apply_template(&mut project, &p, "T", &TemplateVars::default());
        assert_eq!(project.duration, 360);
    }
}
