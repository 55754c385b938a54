//! Standalone SVG documents for the "copy SVG" card action.
//!
//! The markup mirrors what the live card shows: a gradient fill path, a
//! glowing stroke path and one circle per vertex. A revealing scene gets
//! the dash and pop-in animations as inline CSS so the copy replays them.

use std::fmt::Write;

use crate::path::polyline_length;
use crate::reveal::{MARKER_POP_SECONDS, REVEAL_SECONDS};
use crate::scene::{
    hex, ParcelScene, BLUE, EMPTY_OPACITY, FILL_OPACITY, FRAME_SIZE, GLOW_STD_DEVIATION,
    MARKER_RADIUS, SLATE, STROKE_WIDTH, VIOLET,
};

/// Text shown in place of a card when there is nothing to draw.
pub const EMPTY_CAPTION: &str = "Parsel bilgisi giriniz";

fn open_svg(out: &mut String) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {s} {s}" width="{s}" height="{s}">"#,
        s = FRAME_SIZE
    );
}

fn gradient(out: &mut String, id: &str, opacity: f32) {
    let _ = write!(
        out,
        r#"<linearGradient id="{id}" x1="0%" y1="0%" x2="100%" y2="100%"><stop offset="0%" stop-color="{a}" stop-opacity="{opacity}"/><stop offset="100%" stop-color="{b}" stop-opacity="{opacity}"/></linearGradient>"#,
        a = hex(BLUE),
        b = hex(VIOLET),
    );
}

fn reveal_style(out: &mut String, length: f32) {
    let _ = write!(
        out,
        "<style>\
         .animating{{stroke-dasharray:{length};stroke-dashoffset:{length};\
         animation:reveal {REVEAL_SECONDS}s ease-in-out forwards}}\
         @keyframes reveal{{to{{stroke-dashoffset:0}}}}\
         .point-animate{{transform-box:fill-box;transform-origin:center;transform:scale(0);\
         animation:pop {MARKER_POP_SECONDS}s ease-out forwards}}\
         @keyframes pop{{to{{transform:scale(1)}}}}\
         </style>"
    );
}

/// The card's drawing as an SVG document.
///
/// An empty scene yields just the frame, with no paths or circles.
pub fn parcel_svg(scene: &ParcelScene) -> String {
    let mut out = String::new();
    open_svg(&mut out);
    if scene.is_revealing() {
        reveal_style(&mut out, polyline_length(&scene.outline));
    }
    out.push_str("<defs>");
    gradient(&mut out, "grad", FILL_OPACITY);
    let _ = write!(
        out,
        r#"<filter id="glow"><feGaussianBlur stdDeviation="{GLOW_STD_DEVIATION}" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
    );
    out.push_str("</defs>");

    if !scene.is_empty() {
        let (line_class, point_class) = if scene.is_revealing() {
            ("animating", "point-animate")
        } else {
            ("static", "point-static")
        };
        let _ = write!(
            out,
            r#"<path d="{d}" fill="url(#grad)" stroke="none"/><path d="{d}" fill="none" stroke="{blue}" stroke-width="{STROKE_WIDTH}" filter="url(#glow)" class="{line_class}"/>"#,
            d = scene.path,
            blue = hex(BLUE),
        );
        for marker in &scene.markers {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{MARKER_RADIUS}" fill="{}" class="{point_class}" style="animation-delay: {}s"/>"#,
                marker.center.x,
                marker.center.y,
                hex(BLUE),
                marker.delay,
            );
        }
    }
    out.push_str("</svg>");
    out
}

/// Placeholder shown when the working set is empty.
pub fn empty_state_svg() -> String {
    let mut out = String::new();
    open_svg(&mut out);
    out.push_str("<defs>");
    gradient(&mut out, "emptyGrad", EMPTY_OPACITY);
    out.push_str("</defs>");
    let _ = write!(
        out,
        r#"<rect width="{s}" height="{s}" fill="url(#emptyGrad)" rx="8"/><text x="{c}" y="{c}" text-anchor="middle" fill="{slate}" font-size="16">{EMPTY_CAPTION}</text></svg>"#,
        s = FRAME_SIZE,
        c = FRAME_SIZE / 2.0,
        slate = hex(SLATE),
    );
    out
}
