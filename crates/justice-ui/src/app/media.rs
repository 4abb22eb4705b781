//! One-shot media bootstrap against the host page.

use crate::core::media::{
    FALLBACK_PAGE, MediaLayout, MediaSlots, SlotUpdate, VideoPlan, logo_source,
    playback_fallback, plan_video,
};
use gloo::console;
use gloo::utils::document;
use justice_client::ApiClient;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, HtmlIFrameElement, HtmlImageElement, HtmlVideoElement};

pub(crate) const LOGO_ID: &str = "logo";
pub(crate) const VIDEO_ID: &str = "welcomeVideo";
pub(crate) const FRAME_ID: &str = "content-frame";

fn element<T: JsCast>(id: &str) -> Option<T> {
    document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Fetch logo and video URLs and apply them to the page.
pub(crate) fn bootstrap_media(client: Rc<ApiClient>) {
    yew::platform::spawn_local(async move {
        match client.logo_url().await {
            Ok(url) => apply_logo(url),
            Err(err) => console::error!("logo fetch failed", err.to_string()),
        }
        match client.video_url().await {
            Ok(url) => apply_video(url).await,
            Err(err) => console::error!("video fetch failed", err.to_string()),
        }
    });
}

fn apply_logo(url: Option<String>) {
    let logo = element::<HtmlImageElement>(LOGO_ID);
    if let (Some(src), Some(logo)) = (logo_source(url, logo.is_some()), logo) {
        logo.set_src(&src);
    }
}

async fn apply_video(url: Option<String>) {
    let video = element::<HtmlVideoElement>(VIDEO_ID);
    let frame = element::<HtmlIFrameElement>(FRAME_ID);
    let slots = MediaSlots {
        video: video.is_some(),
        frame: frame.is_some(),
    };

    match plan_video(url.as_deref(), slots) {
        VideoPlan::Nothing => {}
        VideoPlan::FrameOnly(layout) => apply_layout(video.as_ref(), frame.as_ref(), &layout),
        VideoPlan::Inline(layout) => {
            apply_layout(video.as_ref(), frame.as_ref(), &layout);
            let Some(player) = video.as_ref() else {
                return;
            };
            let played = match player.play() {
                Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
                Err(err) => Err(err),
            };
            if let Err(err) = played {
                console::warn!("autoplay blocked, falling back to frame", err);
                let fallback = playback_fallback(slots, FALLBACK_PAGE);
                apply_layout(video.as_ref(), frame.as_ref(), &fallback);
            }
        }
    }
}

fn apply_layout(
    video: Option<&HtmlVideoElement>,
    frame: Option<&HtmlIFrameElement>,
    layout: &MediaLayout,
) {
    if let Some(video) = video {
        apply_slot(video, &layout.video, |src| video.set_src(src));
    }
    if let Some(frame) = frame {
        apply_slot(frame, &layout.frame, |src| frame.set_src(src));
    }
}

fn apply_slot(element: &HtmlElement, update: &SlotUpdate, set_src: impl Fn(&str)) {
    if let Some(visible) = update.visible {
        let display = if visible { "block" } else { "none" };
        if let Err(err) = element.style().set_property("display", display) {
            console::error!("style update failed", err);
        }
    }
    if let Some(src) = &update.src {
        set_src(src);
    }
}
