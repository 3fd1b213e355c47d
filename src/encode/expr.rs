//! ffmpeg filter expression and option-string builders.
//!
//! Everything here is pure string construction so the generated graph can be
//! checked without an ffmpeg binary.

use crate::{
    animation::ease::Ease,
    animation::rect::RectAnim,
    foundation::core::Size,
};

/// Shortest decimal form of `v` (at most 6 fractional digits, no trailing zeros).
pub fn num(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Half-open activity window `[start, end)` over the graph time `t`.
pub fn window(start: f64, end: f64) -> String {
    format!("gte(t,{})*lt(t,{})", num(start), num(end))
}

/// Eased progress of a transition of length `secs`, with `local` the elapsed-time expression.
pub fn eased(local: &str, secs: f64, ease: Ease) -> String {
    if secs <= 0.0 {
        return "1".to_string();
    }
    let p = format!("clip(({local})/{},0,1)", num(secs));
    match ease {
        Ease::Linear => p,
        Ease::Smoothstep => format!("(3*pow({p},2)-2*pow({p},3))"),
    }
}

/// `a*(1-e)+b*e`, folded to a constant when both ends match.
pub fn lerp(a: f64, b: f64, e: &str) -> String {
    if a == b {
        return num(a);
    }
    format!("({}*(1-{e})+{}*{e})", num(a), num(b))
}

/// Width and height expressions for an image of size `original` following `anim`.
///
/// The image is scaled uniformly by the smaller axis ratio of the interpolated box,
/// matching [`RectAnim::sample`].
pub fn scaled_size(anim: &RectAnim, original: Size, local: &str) -> (String, String) {
    let e = eased(local, anim.window, anim.ease);
    let w = lerp(anim.from.size.width, anim.to.size.width, &e);
    let h = lerp(anim.from.size.height, anim.to.size.height, &e);
    let scale = format!(
        "min({w}/{},{h}/{})",
        num(original.width),
        num(original.height)
    );
    (
        format!("max(1,trunc({}*{scale}))", num(original.width)),
        format!("max(1,trunc({}*{scale}))", num(original.height)),
    )
}

/// Top-left position expressions for `anim` at elapsed time `local`.
pub fn position(anim: &RectAnim, local: &str) -> (String, String) {
    let e = eased(local, anim.window, anim.ease);
    (
        lerp(anim.from.origin.x, anim.to.origin.x, &e),
        lerp(anim.from.origin.y, anim.to.origin.y, &e),
    )
}

/// Escape a value for a filter option that ffmpeg parses twice
/// (once as part of the graph, once as an option string).
pub fn escape_option(value: &str) -> String {
    let mut level1 = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | ':') {
            level1.push('\\');
        }
        level1.push(c);
    }
    let mut level2 = String::with_capacity(level1.len());
    for c in level1.chars() {
        if matches!(c, '\\' | '\'' | '[' | ']' | ',' | ';') {
            level2.push('\\');
        }
        level2.push(c);
    }
    level2
}

#[cfg(test)]
#[path = "../../tests/unit/encode/expr.rs"]
mod tests;
