//! Media bootstrap decisions, kept free of DOM types.
//!
//! The wasm layer looks up the host page's logo image, welcome video, and
//! secondary frame, then applies the [`MediaLayout`] values computed here.

/// Page shown in the secondary frame when inline playback is refused.
pub const FALLBACK_PAGE: &str = "video/sonic.html";

/// Which media elements the host page provides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaSlots {
    /// Dedicated `<video>` element present.
    pub video: bool,
    /// Secondary `<iframe>` viewer present.
    pub frame: bool,
}

/// Change to apply to one element; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotUpdate {
    /// Show (`Some(true)`) or hide (`Some(false)`) the element.
    pub visible: Option<bool>,
    /// New `src` attribute.
    pub src: Option<String>,
}

impl SlotUpdate {
    fn show(src: impl Into<String>) -> Self {
        Self {
            visible: Some(true),
            src: Some(src.into()),
        }
    }

    const fn hide() -> Self {
        Self {
            visible: Some(false),
            src: None,
        }
    }
}

/// Element updates for the video element and the secondary frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaLayout {
    /// Update for the `<video>` element.
    pub video: SlotUpdate,
    /// Update for the secondary frame.
    pub frame: SlotUpdate,
}

/// Outcome of planning the welcome video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoPlan {
    /// No URL or nowhere to put it.
    Nothing,
    /// Show the video element and attempt inline playback.
    Inline(MediaLayout),
    /// No video element: point the frame at the URL directly.
    FrameOnly(MediaLayout),
}

/// Logo `src` to apply, when both a URL and an image element exist.
#[must_use]
pub fn logo_source(url: Option<String>, has_logo_element: bool) -> Option<String> {
    url.filter(|url| has_logo_element && !url.trim().is_empty())
}

/// Decide how to present the welcome video.
#[must_use]
pub fn plan_video(url: Option<&str>, slots: MediaSlots) -> VideoPlan {
    let Some(url) = url.map(str::trim).filter(|url| !url.is_empty()) else {
        return VideoPlan::Nothing;
    };
    if slots.video {
        let frame = if slots.frame {
            SlotUpdate {
                visible: Some(false),
                src: Some(String::new()),
            }
        } else {
            SlotUpdate::default()
        };
        VideoPlan::Inline(MediaLayout {
            video: SlotUpdate::show(url),
            frame,
        })
    } else if slots.frame {
        VideoPlan::FrameOnly(MediaLayout {
            video: SlotUpdate::default(),
            frame: SlotUpdate {
                visible: None,
                src: Some(url.to_string()),
            },
        })
    } else {
        VideoPlan::Nothing
    }
}

/// Layout after inline playback was rejected or threw.
#[must_use]
pub fn playback_fallback(slots: MediaSlots, fallback_page: &str) -> MediaLayout {
    MediaLayout {
        video: SlotUpdate::hide(),
        frame: if slots.frame {
            SlotUpdate::show(fallback_page)
        } else {
            SlotUpdate::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: MediaSlots = MediaSlots {
        video: true,
        frame: true,
    };

    #[test]
    fn video_url_goes_inline_and_hides_the_frame() {
        let plan = plan_video(Some("https://cdn/welcome.mp4"), BOTH);
        let VideoPlan::Inline(layout) = plan else {
            panic!("expected inline plan");
        };
        assert_eq!(layout.video.visible, Some(true));
        assert_eq!(layout.video.src.as_deref(), Some("https://cdn/welcome.mp4"));
        assert_eq!(layout.frame.visible, Some(false));
        assert_eq!(layout.frame.src.as_deref(), Some(""));
    }

    #[test]
    fn rejected_playback_hides_video_and_shows_fallback_page() {
        let layout = playback_fallback(BOTH, FALLBACK_PAGE);
        assert_eq!(layout.video.visible, Some(false));
        assert_eq!(layout.frame.visible, Some(true));
        assert_eq!(layout.frame.src.as_deref(), Some(FALLBACK_PAGE));
    }

    #[test]
    fn missing_video_element_points_the_frame_at_the_url() {
        let slots = MediaSlots {
            video: false,
            frame: true,
        };
        let VideoPlan::FrameOnly(layout) = plan_video(Some("/static/video/w.mp4"), slots) else {
            panic!("expected frame-only plan");
        };
        assert_eq!(layout.frame.src.as_deref(), Some("/static/video/w.mp4"));
        assert_eq!(layout.frame.visible, None);
        assert_eq!(layout.video, SlotUpdate::default());
    }

    #[test]
    fn nothing_happens_without_a_url_or_elements() {
        assert_eq!(plan_video(None, BOTH), VideoPlan::Nothing);
        assert_eq!(plan_video(Some("  "), BOTH), VideoPlan::Nothing);
        assert_eq!(
            plan_video(Some("https://cdn/v.mp4"), MediaSlots::default()),
            VideoPlan::Nothing
        );
    }

    #[test]
    fn logo_requires_url_and_element() {
        assert_eq!(
            logo_source(Some("https://cdn/logo.png".into()), true).as_deref(),
            Some("https://cdn/logo.png")
        );
        assert_eq!(logo_source(Some("https://cdn/logo.png".into()), false), None);
        assert_eq!(logo_source(None, true), None);
    }
}
