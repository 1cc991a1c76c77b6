//! Session state and flows

use crate::error::{Error, Result};
use hunt_core::progress::{owned_items, progress_report};
use hunt_core::{
    AreaProgress, Catalog, ChapterGate, GameId, ItemId, LoreFragment, MinigameResult, Profile,
    ProgressSnapshot, Resolution, ScanDecision, UnlockFlag, UnlockStore, UserId,
};
use hunt_db::Store;
use hunt_sync::login::check_credentials;
use hunt_sync::{login_failure_message, ApiClient, Dispatcher};
use tracing::{debug, info, warn};

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub profile: Profile,
    /// The intro story has not been shown to this user yet
    pub show_intro: bool,
}

/// What a scan led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A previous result is still on screen, the scan was ignored
    Busy,
    /// The item belongs to a chapter that is not open yet
    Blocked { item: ItemId, reason: String },
    /// The item was found; `unlocked` is non-empty the first time a trigger
    /// item is scanned
    Discovered { item: ItemId, unlocked: Resolution },
}

/// One player's session on this device.
///
/// Operations run one at a time (`&mut self`). After a scan produces a
/// result the scanner stays off until [`HuntSession::resume_scanning`] is
/// called, once the player has dismissed whatever the result showed.
///
/// Network problems never fail an operation. They are logged and the local
/// state stays authoritative.
pub struct HuntSession {
    catalog: Catalog,
    gate: ChapterGate,
    store: Store,
    client: ApiClient,
    dispatcher: Dispatcher,
    profile: Option<Profile>,
    snapshot: ProgressSnapshot,
    scanner_enabled: bool,
}

impl HuntSession {
    /// Fails only when the catalog has no chapters.
    pub fn new(catalog: Catalog, store: Store, client: ApiClient) -> Result<Self> {
        let gate = ChapterGate::new(catalog.chapters.clone())?;
        let dispatcher = Dispatcher::new(client.clone());
        Ok(Self {
            catalog,
            gate,
            store,
            client,
            dispatcher,
            profile: None,
            snapshot: ProgressSnapshot::default(),
            scanner_enabled: true,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gate(&self) -> &ChapterGate {
        &self.gate
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Last snapshot pulled from the server, or restored from the cache
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn is_scanning(&self) -> bool {
        self.scanner_enabled
    }

    fn user_id(&self) -> Option<UserId> {
        self.profile.as_ref().map(|p| p.user_id)
    }

    /// Pick up where the last launch left off: profile and cached snapshot.
    pub fn restore(&mut self) -> Result<Option<Profile>> {
        self.profile = self.store.load_profile()?;
        self.snapshot = self.store.load_snapshot()?.unwrap_or_default();
        self.gate.refresh(&self.snapshot.unlocked_ids);
        info!(
            logged_in = self.profile.is_some(),
            chapter = self.gate.current_index(),
            "session restored"
        );
        Ok(self.profile.clone())
    }

    /// Log in and seed the profile. A failure carries the message to show.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginOutcome> {
        check_credentials(email, password).map_err(|m| Error::Login(m.to_string()))?;

        let user = match self.client.login(email, password).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "login failed");
                return Err(Error::Login(login_failure_message(&e)));
            }
        };

        let profile = user.into_profile();
        self.store.save_profile(&profile)?;
        let show_intro = !self.store.has_seen_intro(profile.user_id)?;
        info!(user = %profile.user_id, show_intro, "logged in");
        self.profile = Some(profile.clone());

        self.pull_progress().await?;
        Ok(LoginOutcome {
            profile,
            show_intro,
        })
    }

    pub fn mark_intro_seen(&mut self) -> Result<()> {
        if let Some(user) = self.user_id() {
            self.store.mark_intro_seen(user)?;
        }
        Ok(())
    }

    /// Forget the player: cancel in-flight calls, reset the story to the
    /// first chapter and wipe the store.
    ///
    /// The session is logged out in memory and ready for the next login even
    /// when wiping the store fails; that error is still returned.
    pub fn logout(&mut self) -> Result<()> {
        self.client.cancel();
        self.client.renew_cancel_token();
        self.dispatcher = Dispatcher::new(self.client.clone());
        self.profile = None;
        self.snapshot = ProgressSnapshot::default();
        self.gate.refresh::<String>(&[]);
        self.scanner_enabled = true;

        self.store.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Handle one scanner result.
    pub async fn scan(&mut self, raw_tag: &str) -> Result<ScanOutcome> {
        if !self.scanner_enabled {
            debug!(tag = raw_tag, "scan ignored while a result is showing");
            return Ok(ScanOutcome::Busy);
        }

        let item = self.catalog.normalize(raw_tag);
        if let ScanDecision::Locked { message, .. } = self.gate.is_scan_allowed(item.as_str()) {
            info!(%item, "scan blocked by story progress");
            self.scanner_enabled = false;
            return Ok(ScanOutcome::Blocked {
                item,
                reason: message,
            });
        }

        let unlocked = self.catalog.triggers.resolve(&item, &mut self.store)?;
        self.scanner_enabled = false;
        info!(tag = raw_tag, %item, "item discovered");

        if let Some(user) = self.user_id() {
            let marker_id = self.catalog.server_id(&item);
            if let Err(e) = self.client.unlock(user, &marker_id).await {
                warn!(%marker_id, error = %e, "unlock push failed");
            }
            self.pull_progress().await?;
        }

        Ok(ScanOutcome::Discovered { item, unlocked })
    }

    /// The result of the last scan has been dismissed
    pub fn resume_scanning(&mut self) {
        self.scanner_enabled = true;
    }

    /// Record a finished minigame. Returns the reward items granted for the
    /// first time by this result.
    pub async fn finish_minigame(&mut self, result: MinigameResult) -> Result<Vec<ItemId>> {
        let user = self.user_id();
        if let Some(user) = user {
            self.dispatcher.submit_score(user, result.game, result.score);
        }
        if !result.won {
            return Ok(Vec::new());
        }

        let granted = self
            .catalog
            .triggers
            .award(result.game, result.score, &mut self.store)?;
        if let Some(user) = user {
            for item in &granted {
                self.dispatcher.unlock(user, item.as_str());
            }
        }
        Ok(granted)
    }

    /// Wait for background score and reward pushes to finish
    pub async fn settle(&mut self) {
        self.dispatcher.settle().await;
    }

    /// Per-area completion for the progress screen. `None` when logged out.
    pub async fn refresh_progress(&mut self) -> Result<Option<Vec<AreaProgress>>> {
        if self.profile.is_none() {
            return Ok(None);
        }
        self.pull_progress().await?;
        Ok(Some(progress_report(&self.catalog, &self.snapshot)))
    }

    /// Items shown in the personal museum
    pub fn museum_items(&self) -> Vec<&ItemId> {
        owned_items(&self.catalog, &self.snapshot)
    }

    /// Lore of one chapter, each fragment paired with whether it is readable
    pub fn story(&self, chapter: usize) -> Vec<(&LoreFragment, bool)> {
        self.gate
            .fragment_status(chapter, &self.snapshot.unlocked_ids)
    }

    /// Lock state of a game menu entry
    pub fn is_game_unlocked(&self, game: GameId) -> Result<bool> {
        Ok(self.store.is_unlocked(&UnlockFlag::Game(game))?)
    }

    /// Every game with its lock state, in menu order
    pub fn game_menu(&self) -> Result<Vec<(GameId, bool)>> {
        let unlocked = self.store.unlocked_games()?;
        Ok(GameId::ALL
            .iter()
            .map(|g| (*g, unlocked.contains(g)))
            .collect())
    }

    /// Fetch the server snapshot and apply it. A failed fetch keeps the
    /// current snapshot.
    async fn pull_progress(&mut self) -> Result<()> {
        let Some(user) = self.user_id() else {
            return Ok(());
        };
        match self.client.fetch_progress(user).await {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(e) => {
                warn!(error = %e, "progress pull failed, keeping cached snapshot");
                Ok(())
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: ProgressSnapshot) -> Result<()> {
        self.gate.refresh(&snapshot.unlocked_ids);
        let restored = self
            .catalog
            .reconcile(&snapshot.unlocked_ids, &mut self.store)?;
        if !restored.is_empty() {
            info!(count = restored.len(), "restored unlocks from server");
        }
        self.store.save_snapshot(&snapshot)?;
        self.snapshot = snapshot;
        Ok(())
    }
}
