//! Walkthru Engine
//!
//! The engine owns the loaded walkthrough and carries activations through to a
//! [`Host`]:
//! - loads documents, keeping the previous one when a load fails
//! - materializes the outline and tracks folder expansion
//! - executes item and context actions, including diff prompts and quizzes
//! - gates every sound on the [`SoundState`] mute flag
//!
//! Effect failures are reported through [`Host::report_error`] and come back
//! as [`Outcome::Failed`]; they never touch the loaded state.
use std::{path::Path, sync::Arc};

use config::{Configuration, DiffAction, ItemKind, ItemPath};
use outline::{
    ActionDescriptor, DiffChoice, NodeId, Outline, QuizSession, RenderNode, RevealOutcome,
    action_for, context_action_for,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

mod error;
mod host;
mod sound;
pub mod test_support;

pub use error::{Error, HostError, HostResult, Result};
pub use host::{Host, QuizSignal};
pub use sound::SoundState;

/// How an activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The effect ran.
    Done,
    /// The item has nothing to run (folders, silent titles).
    NoAction,
    /// The user dismissed a prompt; nothing ran.
    Cancelled,
    /// The host failed; the message was reported.
    Failed {
        /// Reported failure text.
        message: String,
    },
    /// The caller should pick and load a walkthrough document.
    LoadRequested,
}

/// Engine drives a walkthrough against a host.
///
/// Construct with [`Engine::new`], load a document, then feed host signals in
/// through [`Engine::set_expanded`] and the `activate*` methods.
pub struct Engine<H: Host> {
    /// Effect collaborator.
    host: H,
    /// Loaded document and expansion state.
    outline: Outline,
    /// Mute flag shared with whoever toggles it.
    sounds: Arc<SoundState>,
    /// Source of quiz shuffles.
    rng: StdRng,
}

impl<H: Host> Engine<H> {
    /// Create an engine with an OS-seeded shuffle source.
    pub fn new(host: H) -> Self {
        Self::with_rng(host, StdRng::from_os_rng())
    }

    /// Create an engine whose quiz shuffles are reproducible from `seed`.
    pub fn with_seed(host: H, seed: u64) -> Self {
        Self::with_rng(host, StdRng::seed_from_u64(seed))
    }

    /// Create an engine with an explicit shuffle source.
    pub fn with_rng(host: H, rng: StdRng) -> Self {
        Self {
            host,
            outline: Outline::new(),
            sounds: Arc::new(SoundState::new()),
            rng,
        }
    }

    /// The host this engine drives.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Loaded document and expansion state.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// The loaded walkthrough, if any.
    pub fn config(&self) -> Option<&Arc<Configuration>> {
        self.outline.config()
    }

    /// Shared handle to the mute flag.
    pub fn sounds(&self) -> Arc<SoundState> {
        Arc::clone(&self.sounds)
    }

    /// Install `cfg`, replacing any loaded walkthrough.
    pub fn load(&mut self, cfg: Configuration) {
        info!(title = %cfg.title, "walkthrough loaded");
        self.outline.load(cfg);
    }

    /// Parse `source` and install it. On failure the previous walkthrough stays.
    pub fn load_str(&mut self, source: &str, path: Option<&Path>) -> Result<()> {
        let cfg = config::load_from_str(source, path).inspect_err(|e| {
            warn!(error = %e, "walkthrough load failed; keeping previous");
        })?;
        self.load(cfg);
        Ok(())
    }

    /// Read, parse, and install the document at `path`. On failure the
    /// previous walkthrough stays.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let cfg = config::load_from_path(path).inspect_err(|e| {
            warn!(error = %e, "walkthrough load failed; keeping previous");
        })?;
        self.load(cfg);
        Ok(())
    }

    /// Discard the loaded walkthrough.
    pub fn reset(&mut self) {
        info!("walkthrough reset");
        self.outline.reset();
    }

    /// Children of `node` (roots, or the bootstrap node, for `None`).
    pub fn children_of(&self, node: Option<&RenderNode>) -> Vec<RenderNode> {
        self.outline.children_of(node)
    }

    /// Record a host expand/collapse signal. Returns false for non-folders.
    pub fn set_expanded(&mut self, path: &ItemPath, expanded: bool) -> bool {
        debug!(path = %path, expanded, "expansion signal");
        self.outline.set_expanded(path, expanded)
    }

    /// Suppress sounds.
    pub fn mute(&self) {
        self.sounds.mute();
    }

    /// Allow sounds.
    pub fn unmute(&self) {
        self.sounds.unmute();
    }

    /// Flip the mute flag and return the new state.
    pub fn toggle_mute(&self) -> bool {
        self.sounds.toggle_mute()
    }

    /// Activate a render node as the host's tree would.
    pub async fn activate_node(&mut self, node: &RenderNode) -> Result<Outcome> {
        match &node.id {
            NodeId::Bootstrap => Ok(Outcome::LoadRequested),
            NodeId::Item(path) => self.activate(path).await,
        }
    }

    /// Run the primary action of the item at `path`, then its accompanying
    /// `soundPath` for anything other than a title.
    pub async fn activate(&mut self, path: &ItemPath) -> Result<Outcome> {
        let cfg = Arc::clone(self.config().ok_or(Error::NotLoaded)?);
        let item = cfg
            .get(path)
            .ok_or_else(|| Error::ItemNotFound(path.clone()))?;
        let Some(action) = action_for(item) else {
            debug!(path = %path, "activation has no action");
            return Ok(Outcome::NoAction);
        };
        let accompaniment = match item.kind {
            ItemKind::Title => None,
            _ => item.base.sound_path.as_deref(),
        };
        debug!(path = %path, action = action.name(), "activating");

        let mut run = self.execute(action).await;
        if let (Ok(Outcome::Done), Some(sound)) = (&run, accompaniment) {
            run = self.play(sound).await.map(|()| Outcome::Done);
        }
        Ok(self.settle(run).await)
    }

    /// Run the context action (close file, revert diff) of the item at `path`.
    pub async fn activate_context(&mut self, path: &ItemPath) -> Result<Outcome> {
        let cfg = Arc::clone(self.config().ok_or(Error::NotLoaded)?);
        let item = cfg
            .get(path)
            .ok_or_else(|| Error::ItemNotFound(path.clone()))?;
        let Some(action) = context_action_for(item) else {
            debug!(path = %path, "no context action");
            return Ok(Outcome::NoAction);
        };
        debug!(path = %path, action = action.name(), "activating context action");
        let run = self.execute(action).await;
        Ok(self.settle(run).await)
    }

    /// Turn a host failure into a reported [`Outcome::Failed`].
    async fn settle(&self, run: HostResult<Outcome>) -> Outcome {
        match run {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "action failed");
                self.host.report_error(&message).await;
                Outcome::Failed { message }
            }
        }
    }

    /// Perform one action against the host.
    async fn execute(&mut self, action: ActionDescriptor) -> HostResult<Outcome> {
        match action {
            ActionDescriptor::LoadConfiguration => return Ok(Outcome::LoadRequested),
            ActionDescriptor::PlaySound { path } => self.play(&path).await?,
            ActionDescriptor::OpenFile {
                path,
                line,
                highlight,
            } => {
                info!(path = %path, ?line, "open file");
                self.host.open_file(&path, line, highlight.as_ref()).await?;
            }
            ActionDescriptor::CloseFile { path, sound } => {
                info!(path = %path, "close file");
                self.host.close_file(&path).await?;
                self.play_opt(sound.as_deref()).await?;
            }
            ActionDescriptor::ShowDialog { message, severity } => {
                self.host.show_dialog(&message, severity).await?;
            }
            ActionDescriptor::ApplyDiff { diff_path, choice } => {
                let Some(action) = self.decide(&diff_path, choice).await? else {
                    info!(diff = %diff_path, "diff prompt dismissed");
                    return Ok(Outcome::Cancelled);
                };
                info!(diff = %diff_path, action = action.as_str(), "diff");
                self.host.apply_diff(&diff_path, action).await?;
            }
            ActionDescriptor::RevertDiff { diff_path, sound } => {
                info!(diff = %diff_path, "revert diff");
                self.host.revert_diff(&diff_path).await?;
                self.play_opt(sound.as_deref()).await?;
            }
            ActionDescriptor::RunQuiz(quiz) => {
                let session = QuizSession::new(&quiz, &mut self.rng);
                self.run_quiz(session).await?;
            }
            ActionDescriptor::OpenBrowser {
                url,
                browser_type,
                title,
            } => {
                info!(url = %url, ?browser_type, "open browser");
                self.host.open_browser(&url, browser_type, &title).await?;
            }
        }
        Ok(Outcome::Done)
    }

    /// Resolve a diff choice, prompting the host when the document left it open.
    async fn decide(
        &self,
        diff_path: &str,
        choice: DiffChoice,
    ) -> HostResult<Option<DiffAction>> {
        match choice {
            DiffChoice::Decided(a) => Ok(Some(a)),
            DiffChoice::Prompt(choices) => self.host.choose_diff_action(diff_path, &choices).await,
        }
    }

    /// Present `session` until the host closes it.
    async fn run_quiz(&self, mut session: QuizSession) -> HostResult<()> {
        loop {
            match self.host.show_quiz(&session.view()).await? {
                QuizSignal::Close => return Ok(()),
                QuizSignal::Reveal => match session.reveal() {
                    RevealOutcome::Revealed { sound } => {
                        debug!("quiz revealed");
                        if let Some(ActionDescriptor::PlaySound { path }) = sound {
                            // The revealed view is still shown when the sound fails.
                            if let Err(e) = self.play(&path).await {
                                let message = e.to_string();
                                warn!(error = %message, "reveal sound failed");
                                self.host.report_error(&message).await;
                            }
                        }
                    }
                    RevealOutcome::AlreadyRevealed => {}
                },
            }
        }
    }

    /// Play `path` unless muted.
    async fn play(&self, path: &str) -> HostResult<()> {
        if self.sounds.is_muted() {
            debug!(path, "muted; skipping sound");
            return Ok(());
        }
        self.host.play_sound(path).await
    }

    /// Play `path` when present.
    async fn play_opt(&self, path: Option<&str>) -> HostResult<()> {
        match path {
            Some(p) => self.play(p).await,
            None => Ok(()),
        }
    }
}
