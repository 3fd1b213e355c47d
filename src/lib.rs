//! reelquiz composes "guess the actor" short videos from a declarative manifest.
//!
//! The pipeline is:
//!
//! - Parse and validate a [`Manifest`]
//! - Resolve posters, headshots and narration through pluggable collaborators
//! - Build segments and fold them into a back-to-back [`Program`]
//! - Encode the program with a [`ProgramEncoder`] (system `ffmpeg` by default)
//! - Optionally upload the result through an [`Uploader`]
//!
//! [`Studio`] drives the whole job.
#![forbid(unsafe_code)]

/// Easing and rectangle animation.
pub mod animation;
/// Segment model and builders.
pub mod composition;
/// Program encoders.
pub mod encode;
/// Core types and errors.
pub mod foundation;
/// Grid layout and image fitting.
pub mod layout;
/// Render job input.
pub mod manifest;
/// Media probes and audio planning.
pub mod media;
/// Poster, headshot and narration collaborators.
pub mod resolve;
/// Job settings and credentials.
pub mod settings;
/// Render job driver.
pub mod studio;
/// Segment sequencing.
pub mod timeline;
/// Remote storage upload.
pub mod upload;

pub use crate::foundation::core::{Canvas, Fps, Placement, Point, Rgb8, Size};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::composition::model::{Fill, Narration, Segment, SegmentKind};
pub use crate::encode::ffmpeg::FfmpegEncoder;
pub use crate::encode::sink::{EncodeConfig, ProgramEncoder, RecordingEncoder};
pub use crate::manifest::generate::{CreditSource, generate_manifest};
pub use crate::manifest::model::{Answer, Hint, Manifest, MovieRef};
pub use crate::media::mix::AudioPlan;
pub use crate::media::probe::{AudioProbe, ImageProbe};
pub use crate::resolve::{HeadshotResolver, NarrationSynthesizer, PosterResolver};
pub use crate::settings::{ApiKeys, RenderSettings};
pub use crate::studio::{RenderOutcome, Studio};
pub use crate::timeline::program::Program;
pub use crate::upload::{UploadReceipt, Uploader};
