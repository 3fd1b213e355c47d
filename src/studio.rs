//! Manifest interpreter: resolves assets, builds segments, assembles the program,
//! then encodes and optionally uploads it.

use std::path::{Path, PathBuf};

use crate::{
    composition::card::{
        CardSpec, DEFAULT_ANSWER_INTRO_TEXT, DEFAULT_INTRO_TEXT, Headshot, answer_card, title_card,
    },
    composition::model::{Fill, Narration, SegmentKind},
    composition::reveal::{RevealImage, RevealSpec, reveal_segment},
    encode::ffmpeg::FfmpegEncoder,
    encode::sink::{EncodeConfig, ProgramEncoder, default_mp4_config},
    foundation::core::{Rgb8, Size},
    foundation::error::{ReelError, ReelResult},
    layout::grid::GRID_CELLS,
    manifest::model::{Manifest, MovieRef, hint_label},
    media::mix::{AudioPlan, build_audio_plan},
    media::probe::{AudioProbe, FfprobeAudio, ImageCrateProbe, ImageProbe},
    resolve::elevenlabs::ElevenLabsNarrator,
    resolve::omdb::OmdbPosters,
    resolve::tmdb::{TmdbClient, TmdbHeadshots},
    resolve::{HeadshotResolver, NarrationSynthesizer, PosterResolver},
    settings::{ApiKeys, RenderSettings},
    timeline::program::{Program, ProgramBuilder},
    upload::b2::B2Uploader,
    upload::{UploadReceipt, Uploader},
};

/// Result of a render job.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderOutcome {
    pub output_path: PathBuf,
    /// Program length in seconds.
    pub duration: f64,
    /// Segment kinds in playback order.
    pub segments: Vec<SegmentKind>,
    pub upload: Option<UploadReceipt>,
    /// Why the upload did not happen or failed; the local file is kept in that case.
    pub upload_error: Option<String>,
    /// `true` when the local file was removed after a successful upload.
    pub local_deleted: bool,
}

/// Render job driver holding settings and collaborator handles.
///
/// Collaborators are injected builder-style; the defaults are the `ffprobe` audio
/// probe, the `image` crate probe and the `ffmpeg` encoder, with no remote resolvers.
pub struct Studio {
    settings: RenderSettings,
    posters: Option<Box<dyn PosterResolver>>,
    headshots: Option<Box<dyn HeadshotResolver>>,
    narrator: Option<Box<dyn NarrationSynthesizer>>,
    uploader: Option<Box<dyn Uploader>>,
    audio_probe: Box<dyn AudioProbe>,
    image_probe: Box<dyn ImageProbe>,
    encoder: Box<dyn ProgramEncoder>,
}

impl Studio {
    pub fn new(settings: RenderSettings) -> ReelResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            posters: None,
            headshots: None,
            narrator: None,
            uploader: None,
            audio_probe: Box::new(FfprobeAudio),
            image_probe: Box::new(ImageCrateProbe),
            encoder: Box::new(FfmpegEncoder),
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Wire the network collaborators whose keys are present.
    pub fn with_remote_collaborators(mut self, keys: &ApiKeys) -> ReelResult<Self> {
        let cache = self.settings.cache_dir.clone();
        if let Some(key) = &keys.omdb {
            self.posters = Some(Box::new(OmdbPosters::new(key.as_str()).cached(&cache)));
        }
        if let Some(key) = &keys.tmdb {
            self.headshots = Some(Box::new(
                TmdbHeadshots::new(TmdbClient::new(key.as_str())).cached(&cache),
            ));
        }
        if let Some(key) = &keys.elevenlabs {
            self.narrator = Some(Box::new(
                ElevenLabsNarrator::new(key.as_str(), &cache)
                    .with_voice(self.settings.voice_id.as_str()),
            ));
        }
        if let Some(creds) = keys.b2() {
            self.uploader = Some(Box::new(B2Uploader::new(creds)?));
        }
        Ok(self)
    }

    pub fn with_posters(mut self, posters: impl PosterResolver + 'static) -> Self {
        self.posters = Some(Box::new(posters));
        self
    }

    pub fn with_headshots(mut self, headshots: impl HeadshotResolver + 'static) -> Self {
        self.headshots = Some(Box::new(headshots));
        self
    }

    pub fn with_narrator(mut self, narrator: impl NarrationSynthesizer + 'static) -> Self {
        self.narrator = Some(Box::new(narrator));
        self
    }

    pub fn with_uploader(mut self, uploader: impl Uploader + 'static) -> Self {
        self.uploader = Some(Box::new(uploader));
        self
    }

    pub fn with_audio_probe(mut self, probe: impl AudioProbe + 'static) -> Self {
        self.audio_probe = Box::new(probe);
        self
    }

    pub fn with_image_probe(mut self, probe: impl ImageProbe + 'static) -> Self {
        self.image_probe = Box::new(probe);
        self
    }

    pub fn with_encoder(mut self, encoder: impl ProgramEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Build the full timeline: intro, one reveal per hint, answer-intro, answer.
    #[tracing::instrument(skip_all, fields(hints = manifest.hints.len()))]
    pub fn build_program(&self, manifest: &Manifest) -> ReelResult<Program> {
        manifest.validate()?;
        let canvas = self.settings.canvas;
        let background = match &manifest.background_video {
            Some(source) => Fill::Loop {
                source: source.clone(),
            },
            None => Fill::Solid(Rgb8::BLACK),
        };
        let voice = manifest.enable_voice_overs;
        let card = |mut spec: CardSpec, narration: Option<Narration>| {
            spec.text_color = self.settings.text_color;
            spec.with_background(background.clone()).with_narration(narration)
        };

        let mut timeline = ProgramBuilder::new(canvas, self.settings.fps);

        let intro_text = manifest.intro_text.as_deref().unwrap_or(DEFAULT_INTRO_TEXT);
        timeline = timeline.push(title_card(&card(
            CardSpec::intro(intro_text, canvas),
            self.narrate(voice, intro_text),
        ))?);

        for (i, hint) in manifest.hints.iter().enumerate() {
            let label = hint_label(i);
            let images = hint
                .movies
                .iter()
                .map(|movie| self.poster_image(movie))
                .collect::<ReelResult<Vec<_>>>()?;
            let images: [RevealImage; GRID_CELLS] = images.try_into().map_err(|_| {
                ReelError::validation(format!("{label} must have exactly {GRID_CELLS} movies"))
            })?;
            timeline = timeline.push(reveal_segment(&RevealSpec {
                label,
                caption: hint.caption.clone(),
                images,
                canvas,
                text_color: self.settings.text_color,
                background: background.clone(),
                narration: self.narrate(voice, &hint.caption),
            })?);
        }

        let answer_intro_text = manifest
            .answer_intro_text
            .as_deref()
            .unwrap_or(DEFAULT_ANSWER_INTRO_TEXT);
        timeline = timeline.push(title_card(&card(
            CardSpec::answer_intro(answer_intro_text, canvas),
            None,
        ))?);

        let name = manifest.answer.caption.as_str();
        let headshot = self.headshot(manifest)?;
        timeline = timeline.push(answer_card(
            &card(CardSpec::answer(name, canvas), self.narrate(voice, name)),
            &headshot,
        )?);

        let program = timeline.build()?;
        tracing::info!(
            segments = program.entries.len(),
            duration = program.duration(),
            "assembled program"
        );
        Ok(program)
    }

    /// Audio mixing plan for a program built from `manifest`.
    pub fn audio_plan(&self, manifest: &Manifest, program: &Program) -> ReelResult<AudioPlan> {
        build_audio_plan(
            program,
            manifest.background_audio.as_deref(),
            self.settings.background_volume,
        )
    }

    /// Encoder options for `out_path` under the current settings.
    pub fn encode_config(&self, out_path: &Path) -> EncodeConfig {
        EncodeConfig {
            overwrite: self.settings.overwrite,
            font_file: self.settings.font_file.clone(),
            ..default_mp4_config(out_path)
        }
    }

    /// Build, encode to `out_path`, then upload when asked.
    ///
    /// Validation and encode failures are fatal. Upload failures are recorded on
    /// the outcome and leave the local file in place.
    #[tracing::instrument(skip(self, manifest), fields(out = %out_path.display()))]
    pub fn render(
        &self,
        manifest: &Manifest,
        out_path: &Path,
        upload: bool,
    ) -> ReelResult<RenderOutcome> {
        let program = self.build_program(manifest)?;
        let audio = self.audio_plan(manifest, &program)?;
        let cfg = self.encode_config(out_path);
        self.encoder.encode(&program, &audio, &cfg)?;
        tracing::info!(duration = program.duration(), "render finished");

        let mut outcome = RenderOutcome {
            output_path: out_path.to_path_buf(),
            duration: program.duration(),
            segments: program.kinds(),
            upload: None,
            upload_error: None,
            local_deleted: false,
        };
        if upload {
            self.upload(&mut outcome);
        }
        Ok(outcome)
    }

    fn upload(&self, outcome: &mut RenderOutcome) {
        let Some(uploader) = &self.uploader else {
            tracing::warn!("upload requested but no uploader is configured");
            outcome.upload_error = Some("no uploader configured".to_string());
            return;
        };
        let remote_name = outcome
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());
        match uploader.upload(&outcome.output_path, &remote_name) {
            Ok(receipt) => {
                outcome.upload = Some(receipt);
                if self.settings.delete_local_after_upload {
                    match std::fs::remove_file(&outcome.output_path) {
                        Ok(()) => outcome.local_deleted = true,
                        Err(e) => tracing::warn!(error = %e, "failed to delete local video"),
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed; keeping local file");
                outcome.upload_error = Some(e.to_string());
            }
        }
    }

    fn narrate(&self, enabled: bool, text: &str) -> Option<Narration> {
        if !enabled {
            return None;
        }
        let narrator = self.narrator.as_ref()?;
        let source = match narrator.synthesize(text) {
            Ok(Some(path)) => path,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "narration unavailable; segment stays silent");
                return None;
            }
        };
        match self.audio_probe.duration_secs(&source) {
            Ok(duration) => Some(Narration { source, duration }),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %source.display(),
                    "narration length unknown; segment stays silent"
                );
                None
            }
        }
    }

    fn poster_image(&self, movie: &MovieRef) -> ReelResult<RevealImage> {
        let resolved = match (&movie.poster_path, &self.posters) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(posters)) => posters.resolve(movie),
            (None, None) => Err(ReelError::not_found("no poster resolver configured")),
        };
        let (source, intrinsic) = self.probe_or_placeholder(resolved, &movie.display_name())?;
        Ok(RevealImage { source, intrinsic })
    }

    fn headshot(&self, manifest: &Manifest) -> ReelResult<Headshot> {
        let name = manifest.answer.caption.as_str();
        let resolved = match (&manifest.answer.image_path, &self.headshots) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(headshots)) => headshots.resolve(name),
            (None, None) => Err(ReelError::not_found("no headshot resolver configured")),
        };
        let (source, intrinsic) = self.probe_or_placeholder(resolved, name)?;
        Ok(Headshot { source, intrinsic })
    }

    /// Probe a resolved image; on a recoverable failure use the placeholder instead.
    fn probe_or_placeholder(
        &self,
        resolved: ReelResult<PathBuf>,
        what: &str,
    ) -> ReelResult<(PathBuf, Size)> {
        let attempt =
            resolved.and_then(|path| self.image_probe.dimensions(&path).map(|size| (path, size)));
        match attempt {
            Ok(found) => Ok(found),
            Err(e) if e.is_recoverable() => {
                tracing::warn!(asset = what, error = %e, "using placeholder image");
                let placeholder = self.settings.placeholder_image.clone();
                let size = self.image_probe.dimensions(&placeholder).map_err(|pe| {
                    ReelError::validation(format!(
                        "placeholder image '{}' is unusable: {pe}",
                        placeholder.display()
                    ))
                })?;
                Ok((placeholder, size))
            }
            Err(e) => Err(e),
        }
    }
}
