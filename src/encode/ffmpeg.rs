use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{
    composition::model::{ElementKind, Fill, Motion, TextOverlay},
    encode::expr,
    encode::sink::{EncodeConfig, ProgramEncoder},
    foundation::core::{Canvas, Fps, Placement, Rgb8},
    foundation::error::{ReelError, ReelResult},
    media::mix::AudioPlan,
    timeline::program::Program,
};

/// One `-i` input of the generated command line.
#[derive(Clone, Debug, PartialEq)]
pub enum InputSource {
    /// Still image repeated for `duration` seconds.
    Still { path: PathBuf, duration: f64 },
    /// Video looped (or cut) to `duration` seconds.
    LoopVideo { path: PathBuf, duration: f64 },
    /// Audio looped indefinitely; trimmed in the graph.
    LoopAudio { path: PathBuf },
    /// Audio played once.
    Audio { path: PathBuf },
}

impl InputSource {
    fn push_args(&self, fps: Fps, args: &mut Vec<OsString>) {
        let mut push = |s: &str| args.push(OsString::from(s));
        match self {
            Self::Still { duration, .. } => {
                push("-loop");
                push("1");
                push("-framerate");
                push(&fps.ffmpeg_rate());
                push("-t");
                push(&expr::num(*duration));
            }
            Self::LoopVideo { duration, .. } => {
                push("-stream_loop");
                push("-1");
                push("-t");
                push(&expr::num(*duration));
            }
            Self::LoopAudio { .. } => {
                push("-stream_loop");
                push("-1");
            }
            Self::Audio { .. } => {}
        }
        args.push(OsString::from("-i"));
        args.push(self.path().as_os_str().to_os_string());
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Still { path, .. }
            | Self::LoopVideo { path, .. }
            | Self::LoopAudio { path }
            | Self::Audio { path } => path,
        }
    }
}

/// A fully planned ffmpeg invocation: inputs plus one `-filter_complex` graph.
#[derive(Clone, Debug)]
pub struct FfmpegJob {
    pub inputs: Vec<InputSource>,
    pub filter_graph: String,
    /// `true` when the graph produces an `[aout]` stream.
    pub has_audio: bool,
    pub duration: f64,
    pub fps: Fps,
}

impl FfmpegJob {
    /// Full argument list (without the `ffmpeg` program name).
    pub fn args(&self, cfg: &EncodeConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push(if cfg.overwrite { "-y" } else { "-n" }.into());
        args.push("-loglevel".into());
        args.push("error".into());
        for input in &self.inputs {
            input.push_args(self.fps, &mut args);
        }
        args.push("-filter_complex".into());
        args.push(self.filter_graph.clone().into());
        args.push("-map".into());
        args.push("[vout]".into());
        if self.has_audio {
            for a in ["-map", "[aout]", "-c:a", "aac", "-b:a", "192k"] {
                args.push(a.into());
            }
        } else {
            args.push("-an".into());
        }
        for a in ["-c:v", "libx264", "-pix_fmt", "yuv420p", "-r"] {
            args.push(a.into());
        }
        args.push(self.fps.ffmpeg_rate().into());
        args.push("-t".into());
        args.push(expr::num(self.duration).into());
        args.push("-movflags".into());
        args.push("+faststart".into());
        args.push(cfg.out_path.as_os_str().to_os_string());
        args
    }
}

struct GraphBuilder {
    inputs: Vec<InputSource>,
    chains: Vec<String>,
    next: usize,
}

impl GraphBuilder {
    fn input(&mut self, src: InputSource) -> usize {
        self.inputs.push(src);
        self.inputs.len() - 1
    }

    fn label(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{prefix}{}", self.next)
    }

    fn chain(&mut self, s: String) {
        self.chains.push(s);
    }

    /// Overlay `layer` onto `base` during `[start, end)` and return the new base label.
    fn overlay(&mut self, base: &str, layer: &str, x: &str, y: &str, start: f64, end: f64) -> String {
        let out = self.label("v");
        self.chain(format!(
            "[{base}][{layer}]overlay=x='{x}':y='{y}':eval=frame:eof_action=pass:enable='{}'[{out}]",
            expr::window(start, end)
        ));
        out
    }
}

fn frame_size(canvas: Canvas) -> String {
    format!("{}x{}", canvas.width, canvas.height)
}

fn px(v: f64) -> String {
    expr::num(v.round().max(1.0))
}

fn drawtext(text: &TextOverlay, font: Option<&Path>, start: f64, end: f64) -> String {
    let mut f = format!(
        "drawtext=text={}:expansion=none:fontsize={}:fontcolor={}:text_align=C:\
         x=(w-text_w)/2:y=(h-text_h)/2+({}):enable='{}'",
        expr::escape_option(&text.text),
        expr::num(f64::from(text.font_size)),
        text.color.to_ffmpeg_hex(),
        expr::num(text.offset_y),
        expr::window(start, end),
    );
    if let Some(font) = font {
        f.push_str(":fontfile=");
        f.push_str(&expr::escape_option(&font.to_string_lossy()));
    }
    f
}

/// Translate a program and its audio plan into a single ffmpeg job.
///
/// Every segment contributes its background layer and then its elements, in paint
/// order, each gated to its absolute `[start, end)` window.
pub fn plan_job(program: &Program, audio: &AudioPlan, cfg: &EncodeConfig) -> ReelResult<FfmpegJob> {
    program.canvas.validate()?;
    let canvas = program.canvas;
    let fps = program.fps;
    let rate = fps.ffmpeg_rate();
    let total = program.duration();

    let mut g = GraphBuilder {
        inputs: Vec::new(),
        chains: Vec::new(),
        next: 0,
    };
    let mut base = g.label("v");
    g.chain(format!(
        "color=c={}:s={}:r={rate}:d={}[{base}]",
        Rgb8::BLACK.to_ffmpeg_hex(),
        frame_size(canvas),
        expr::num(total)
    ));

    for entry in &program.entries {
        let seg = &entry.segment;
        let (start, end) = (entry.start, entry.end());
        let shift = format!("setpts=PTS-STARTPTS+{}/TB", expr::num(start));

        let bg = g.label("bg");
        match &seg.background {
            Fill::Solid(color) => g.chain(format!(
                "color=c={}:s={}:r={rate}:d={},{shift}[{bg}]",
                color.to_ffmpeg_hex(),
                frame_size(canvas),
                expr::num(seg.duration)
            )),
            Fill::Loop { source } => {
                let idx = g.input(InputSource::LoopVideo {
                    path: source.clone(),
                    duration: seg.duration,
                });
                g.chain(format!(
                    "[{idx}:v]scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},\
                     setsar=1,fps={rate},{shift}[{bg}]",
                    w = canvas.width,
                    h = canvas.height
                ));
            }
        }
        base = g.overlay(&base, &bg, "0", "0", start, end);

        for el in &seg.elements {
            let (el_start, el_end) = (start + el.start, start + el.end());
            match &el.kind {
                ElementKind::Text(text) => {
                    let out = g.label("v");
                    g.chain(format!(
                        "[{base}]{}[{out}]",
                        drawtext(text, cfg.font_file.as_deref(), el_start, el_end)
                    ));
                    base = out;
                }
                ElementKind::Image(img) => {
                    let idx = g.input(InputSource::Still {
                        path: img.source.clone(),
                        duration: el.duration,
                    });
                    let layer = g.label("img");
                    let el_shift = format!("setpts=PTS-STARTPTS+{}/TB", expr::num(el_start));
                    match img.motion {
                        Motion::Fixed(Placement { origin, size }) => {
                            g.chain(format!(
                                "[{idx}:v]scale={}:{},setsar=1,format=rgba,{el_shift}[{layer}]",
                                px(size.width),
                                px(size.height)
                            ));
                            base = g.overlay(
                                &base,
                                &layer,
                                &expr::num(origin.x),
                                &expr::num(origin.y),
                                el_start,
                                el_end,
                            );
                        }
                        Motion::Animated(anim) => {
                            // The still stream starts at 0, so the scale filter sees element-local t.
                            let (w, h) = expr::scaled_size(&anim, img.intrinsic, "t");
                            g.chain(format!(
                                "[{idx}:v]scale=w='{w}':h='{h}':eval=frame,setsar=1,format=rgba,\
                                 {el_shift}[{layer}]"
                            ));
                            let local = format!("t-{}", expr::num(el_start));
                            let (x, y) = expr::position(&anim, &local);
                            base = g.overlay(&base, &layer, &x, &y, el_start, el_end);
                        }
                    }
                }
            }
        }
    }
    g.chain(format!("[{base}]format=yuv420p[vout]"));

    let mut mix_inputs = Vec::new();
    if let Some(bed) = &audio.background {
        let idx = g.input(InputSource::LoopAudio {
            path: bed.source.clone(),
        });
        let label = g.label("a");
        g.chain(format!(
            "[{idx}:a]volume={},atrim=end={},asetpts=PTS-STARTPTS[{label}]",
            expr::num(bed.volume),
            expr::num(bed.duration)
        ));
        mix_inputs.push(label);
    }
    for cue in &audio.cues {
        let idx = g.input(InputSource::Audio {
            path: cue.source.clone(),
        });
        let label = g.label("a");
        let delay_ms = (cue.start * 1000.0).round() as u64;
        g.chain(format!(
            "[{idx}:a]apad=whole_dur={pad},atrim=end={pad},asetpts=PTS-STARTPTS,\
             adelay={delay_ms}:all=1[{label}]",
            pad = expr::num(cue.pad_to)
        ));
        mix_inputs.push(label);
    }
    let has_audio = !mix_inputs.is_empty();
    if has_audio {
        let ins: String = mix_inputs.iter().map(|l| format!("[{l}]")).collect();
        g.chain(format!(
            "{ins}amix=inputs={}:duration=longest:dropout_transition=0:normalize=0,\
             apad=whole_dur={total},atrim=end={total}[aout]",
            mix_inputs.len(),
            total = expr::num(total)
        ));
    }

    Ok(FfmpegJob {
        inputs: g.inputs,
        filter_graph: g.chains.join(";"),
        has_audio,
        duration: total,
        fps,
    })
}

/// [`ProgramEncoder`] that drives the system `ffmpeg` binary with one filter graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegEncoder;

impl ProgramEncoder for FfmpegEncoder {
    #[tracing::instrument(skip_all, fields(out = %cfg.out_path.display()))]
    fn encode(&self, program: &Program, audio: &AudioPlan, cfg: &EncodeConfig) -> ReelResult<()> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(ReelError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let job = plan_job(program, audio, cfg)?;
        tracing::debug!(
            inputs = job.inputs.len(),
            graph_len = job.filter_graph.len(),
            "spawning ffmpeg"
        );

        let mut child = Command::new("ffmpeg")
            .args(job.args(cfg))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ReelError::encode(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok::<_, std::io::Error>(stderr_bytes)
        });

        let status = child
            .wait()
            .map_err(|e| ReelError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| ReelError::encode("ffmpeg stderr drain thread panicked"))?
            .map_err(|e| ReelError::encode(format!("ffmpeg stderr read failed: {e}")))?;

        if !status.success() {
            remove_partial_output(&cfg.out_path);
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ReelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        tracing::info!(duration = job.duration, "encoded program");
        Ok(())
    }
}

fn remove_partial_output(path: &Path) {
    if path.exists()
        && let Err(e) = std::fs::remove_file(path)
    {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output");
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
