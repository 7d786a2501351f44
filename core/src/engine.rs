//! Client state machine
//!
//! `ClientState` is driven by two closed sets of inputs: user [`Intent`]s and
//! server [`ApiEvent`]s. Each step returns an [`Effect`] for the host to
//! perform (an HTTP call or a timer); the host feeds the outcome back in.
//! Rendering reads `GameView::from_state` after every step.

use serde::{Deserialize, Serialize};

use crate::allocation::{apply_level_up, verify_allocation, verify_confirmation, StatDraft};
use crate::api::*;
use crate::error::{ClientError, ClientResult};
use crate::log;
use crate::reconciler::{next_transition, reconcile, Transition};
use crate::state::*;
use crate::types::*;

/// Everything a user can ask for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    SelectType { creature_type: CreatureTypeId },
    SetName { name: String },
    AdjustStat { stat: Stat, delta: i32 },
    StartGame,
    SubmitMove { move_type: MoveType },
    AdjustLevelUp { stat: Stat, delta: i32 },
    ConfirmLevelUp,
    NextMatch,
    NewGame,
    DismissNotice,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectType { .. } => "select_type",
            Intent::SetName { .. } => "set_name",
            Intent::AdjustStat { .. } => "adjust_stat",
            Intent::StartGame => "start_game",
            Intent::SubmitMove { .. } => "submit_move",
            Intent::AdjustLevelUp { .. } => "adjust_level_up",
            Intent::ConfirmLevelUp => "confirm_level_up",
            Intent::NextMatch => "next_match",
            Intent::NewGame => "new_game",
            Intent::DismissNotice => "dismiss_notice",
        }
    }
}

/// Outcomes delivered back to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    TypesLoaded(Vec<CreatureTypeInfo>),
    CreatureCreated(CreatedCreature),
    GameStarted(StartGameResponse),
    MoveResolved(MoveResponse),
    StateLoaded(GameStateResponse),
    StatsAllocated(AllocateStatsResponse),
    RequestFailed {
        request: RequestKind,
        error: ClientError,
    },
    /// The cosmetic delay after a round has passed
    ResumeTimerElapsed,
    /// The delay after elimination has passed
    ResetTimerElapsed,
}

impl ApiEvent {
    /// The request this event answers, if any
    pub fn request_kind(&self) -> Option<RequestKind> {
        match self {
            ApiEvent::TypesLoaded(_) => Some(RequestKind::LoadCreatureTypes),
            ApiEvent::CreatureCreated(_) => Some(RequestKind::CreateCreature),
            ApiEvent::GameStarted(_) => Some(RequestKind::StartGame),
            ApiEvent::MoveResolved(_) => Some(RequestKind::SubmitMove),
            ApiEvent::StateLoaded(_) => Some(RequestKind::GetState),
            ApiEvent::StatsAllocated(_) => Some(RequestKind::AllocateStats),
            ApiEvent::RequestFailed { request, .. } => Some(*request),
            ApiEvent::ResumeTimerElapsed | ApiEvent::ResetTimerElapsed => None,
        }
    }

    /// Decode a successful response body for `kind`.
    pub fn decode(kind: RequestKind, body: &str) -> ClientResult<ApiEvent> {
        fn parse<T: serde::de::DeserializeOwned>(body: &str) -> ClientResult<T> {
            serde_json::from_str(body).map_err(|e| ClientError::decode(&e.to_string()))
        }
        Ok(match kind {
            RequestKind::LoadCreatureTypes => ApiEvent::TypesLoaded(parse(body)?),
            RequestKind::CreateCreature => ApiEvent::CreatureCreated(parse(body)?),
            RequestKind::StartGame => ApiEvent::GameStarted(parse(body)?),
            RequestKind::SubmitMove => ApiEvent::MoveResolved(parse(body)?),
            RequestKind::GetState => ApiEvent::StateLoaded(parse(body)?),
            RequestKind::AllocateStats => ApiEvent::StatsAllocated(parse(body)?),
        })
    }

    /// Fold a transport result into an event
    pub fn from_result(kind: RequestKind, result: ClientResult<ApiEvent>) -> ApiEvent {
        result.unwrap_or_else(|error| ApiEvent::RequestFailed {
            request: kind,
            error,
        })
    }
}

/// Side effect the host must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Request(ApiRequest),
    /// Deliver `ResumeTimerElapsed` after the delay
    EnableMovesAfter { delay_ms: u32 },
    /// Deliver `ResetTimerElapsed` after the delay
    ResetAfter { delay_ms: u32 },
}

impl ClientState {
    /// First effect after construction: fetch the creature type catalogue
    pub fn boot(&mut self) -> Effect {
        log::info("=== PET BATTLER CLIENT INITIALIZED ===");
        self.request(ApiRequest::LoadCreatureTypes)
    }

    /// Apply a user intent.
    ///
    /// Rejected intents leave the state untouched apart from the notice,
    /// and the error is returned to the host as well.
    pub fn dispatch(&mut self, intent: Intent) -> ClientResult<Effect> {
        log::action(intent.name(), &format!("screen={}", self.screen.as_str()));
        let result = self.apply_intent(intent);
        match &result {
            Ok(_) => self.log_state(),
            Err(err) => {
                log::result(false, &err.to_string());
                self.notice = Some(Notice::warning(&err.to_string()));
            }
        }
        result
    }

    /// Apply a server outcome or timer tick.
    pub fn receive(&mut self, event: ApiEvent) -> Effect {
        if let Some(kind) = event.request_kind() {
            if self.in_flight != Some(kind) {
                log::warn(&format!(
                    "ignoring stale {} response (in flight: {:?})",
                    kind.as_str(),
                    self.in_flight.map(|k| k.as_str())
                ));
                return Effect::None;
            }
            self.in_flight = None;
        }

        let effect = match event {
            ApiEvent::TypesLoaded(types) => {
                log::debug("receive", &format!("{} creature types", types.len()));
                self.creature_types = types;
                Effect::None
            }
            ApiEvent::CreatureCreated(created) => self.on_creature_created(created),
            ApiEvent::GameStarted(started) => self.on_game_started(started),
            ApiEvent::MoveResolved(result) => self.on_move_resolved(result),
            ApiEvent::StateLoaded(state) => self.on_state_loaded(state),
            ApiEvent::StatsAllocated(confirmation) => self.on_stats_allocated(confirmation),
            ApiEvent::RequestFailed { request, error } => self.on_request_failed(request, error),
            ApiEvent::ResumeTimerElapsed => {
                if self.screen == Screen::Battle
                    && !self.awaiting_next_match
                    && !self.eliminated
                    && self.snapshot.as_ref().is_some_and(|m| !m.is_complete)
                {
                    self.moves_enabled = true;
                }
                Effect::None
            }
            ApiEvent::ResetTimerElapsed => {
                if self.eliminated {
                    log::info("eliminated, returning to setup");
                    self.enter(Screen::Setup);
                    self.reset();
                }
                Effect::None
            }
        };
        self.log_state();
        effect
    }
}

// Intent handling
impl ClientState {
    fn apply_intent(&mut self, intent: Intent) -> ClientResult<Effect> {
        match intent {
            Intent::DismissNotice => {
                self.notice = None;
                Ok(Effect::None)
            }
            Intent::SelectType { creature_type } => {
                self.expect_screen(Screen::Setup)?;
                if !self.creature_types.is_empty()
                    && !self
                        .creature_types
                        .iter()
                        .any(|t| t.creature_type == creature_type)
                {
                    return Err(ClientError::Incomplete(format!(
                        "unknown creature type '{}'",
                        creature_type
                    )));
                }
                self.selected_type = Some(creature_type);
                Ok(Effect::None)
            }
            Intent::SetName { name } => {
                self.expect_screen(Screen::Setup)?;
                self.name_input = name;
                Ok(Effect::None)
            }
            Intent::AdjustStat { stat, delta } => {
                self.expect_screen(Screen::Setup)?;
                if !self.setup_draft.adjust(stat, delta) {
                    log::debug("adjust_stat", "adjustment out of range, ignored");
                }
                Ok(Effect::None)
            }
            Intent::StartGame => self.start_game(),
            Intent::SubmitMove { move_type } => self.submit_move(move_type),
            Intent::AdjustLevelUp { stat, delta } => {
                self.expect_screen(Screen::LevelUp)?;
                let stage = self.level_up.as_mut().ok_or(ClientError::WrongScreen {
                    screen: Screen::LevelUp,
                })?;
                if !stage.draft.adjust(stat, delta) {
                    log::debug("adjust_level_up", "adjustment out of range, ignored");
                }
                Ok(Effect::None)
            }
            Intent::ConfirmLevelUp => self.confirm_level_up(),
            Intent::NextMatch => {
                self.expect_screen(Screen::Battle)?;
                self.expect_idle()?;
                if !self.awaiting_next_match {
                    return Err(ClientError::Incomplete(String::from(
                        "the current match is still running",
                    )));
                }
                let game_id = self.require_game()?;
                Ok(self.request(ApiRequest::GetState { game_id }))
            }
            Intent::NewGame => {
                let allowed = self.screen == Screen::Victory
                    || (self.screen == Screen::Battle && self.eliminated);
                if !allowed {
                    return Err(ClientError::WrongScreen {
                        screen: self.screen,
                    });
                }
                self.enter(Screen::Setup);
                self.reset();
                if self.creature_types.is_empty() {
                    return Ok(self.request(ApiRequest::LoadCreatureTypes));
                }
                Ok(Effect::None)
            }
        }
    }

    fn start_game(&mut self) -> ClientResult<Effect> {
        self.expect_screen(Screen::Setup)?;
        self.expect_idle()?;
        let creature_type = match (&self.selected_type, self.trimmed_name().is_empty()) {
            (Some(t), false) => t.clone(),
            _ => {
                return Err(ClientError::Incomplete(String::from(
                    "enter a name and pick a creature type first",
                )))
            }
        };
        let allocation = *self.setup_draft.allocation();
        verify_allocation(&allocation, self.setup_draft.budget())?;

        let profile = PlayerProfile::new(self.trimmed_name(), &creature_type, allocation);
        let request = CreateCreatureRequest {
            name: profile.name.clone(),
            creature_type,
            stat_allocations: allocation,
        };
        self.profile = Some(profile);
        Ok(self.request(ApiRequest::CreateCreature(request)))
    }

    fn submit_move(&mut self, move_type: MoveType) -> ClientResult<Effect> {
        self.expect_screen(Screen::Battle)?;
        self.expect_idle()?;
        if !self.moves_enabled {
            return Err(ClientError::InputLocked);
        }
        let game_id = self.require_game()?;
        let creature_id = self
            .creature_id()
            .cloned()
            .ok_or_else(|| ClientError::Incomplete(String::from("no creature in play")))?;

        self.moves_enabled = false;
        Ok(self.request(ApiRequest::SubmitMove {
            game_id,
            body: SubmitMoveRequest {
                creature_id,
                move_type,
            },
        }))
    }

    fn confirm_level_up(&mut self) -> ClientResult<Effect> {
        self.expect_screen(Screen::LevelUp)?;
        self.expect_idle()?;
        let game_id = self.require_game()?;
        let creature_id = self
            .creature_id()
            .cloned()
            .ok_or_else(|| ClientError::Incomplete(String::from("no creature in play")))?;
        let stage = self.level_up.as_mut().ok_or(ClientError::WrongScreen {
            screen: Screen::LevelUp,
        })?;

        let allocation = *stage.draft.allocation();
        apply_level_up(&stage.baseline, &allocation)?;
        stage.submitted = Some(allocation);

        Ok(self.request(ApiRequest::AllocateStats {
            game_id,
            body: AllocateStatsRequest {
                creature_id,
                stat_allocations: allocation,
            },
        }))
    }
}

// Response handling
impl ClientState {
    fn on_creature_created(&mut self, created: CreatedCreature) -> Effect {
        let Some(profile) = self.profile.as_mut() else {
            log::warn("creature created without a profile, ignoring");
            return Effect::None;
        };
        log::result(true, &format!("creature {} created", created.id));
        profile.creature_id = Some(created.id.clone());
        self.known_stats = None;
        self.request(ApiRequest::StartGame(StartGameRequest {
            num_players: self.config.num_players,
            creature_ids: vec![created.id],
            tournament_size: self.config.tournament_size,
        }))
    }

    fn on_game_started(&mut self, started: StartGameResponse) -> Effect {
        log::result(true, &format!("game {} started", started.game_id));
        self.game_id = Some(started.game_id);
        self.enter(Screen::Battle);
        self.battle_log.clear();
        self.awaiting_next_match = false;
        self.eliminated = false;
        match started.current_match {
            Some(record) => {
                self.apply_snapshot(record.into());
                self.moves_enabled = self.snapshot.as_ref().is_some_and(|m| !m.is_complete);
            }
            None => {
                self.snapshot = None;
                self.view_state = None;
                self.moves_enabled = false;
                self.notice = Some(Notice::warning("The server has no match ready yet"));
            }
        }
        Effect::None
    }

    fn on_move_resolved(&mut self, result: MoveResponse) -> Effect {
        if let Some(record) = result.current_match.clone() {
            self.apply_snapshot(record.into());
        }

        let transition = next_transition(&result);
        log::debug("move_resolved", &format!("{:?}", transition));
        match transition {
            Transition::ShowVictory { champion_name } => {
                self.finish(champion_name);
                Effect::None
            }
            Transition::ShowLevelUp { current_stats } => {
                let baseline = current_stats.or(self.known_stats).unwrap_or_else(|| {
                    log::warn("level-up without current stats, using zero baseline");
                    StatBlock::default()
                });
                self.known_stats = Some(baseline);
                self.moves_enabled = false;
                self.level_up = Some(LevelUpStage {
                    baseline,
                    draft: StatDraft::level_up(),
                    submitted: None,
                });
                self.enter(Screen::LevelUp);
                Effect::None
            }
            Transition::Eliminated => {
                self.eliminated = true;
                self.moves_enabled = false;
                self.notice = Some(Notice::info(
                    "Your creature was defeated. You have been eliminated from the tournament.",
                ));
                Effect::ResetAfter {
                    delay_ms: self.config.reset_delay_ms,
                }
            }
            Transition::AwaitNextMatch => {
                self.moves_enabled = false;
                self.awaiting_next_match = true;
                Effect::None
            }
            Transition::ContinueRound => Effect::EnableMovesAfter {
                delay_ms: self.config.resume_delay_ms,
            },
        }
    }

    fn on_state_loaded(&mut self, state: GameStateResponse) -> Effect {
        if state.tournament_complete {
            self.finish(state.champion_name);
            return Effect::None;
        }

        self.level_up = None;
        self.awaiting_next_match = false;
        self.enter(Screen::Battle);
        self.battle_log.clear();
        match state.current_match {
            Some(record) => {
                self.apply_snapshot(record.into());
                self.moves_enabled = self.snapshot.as_ref().is_some_and(|m| !m.is_complete);
                if !self.moves_enabled {
                    self.awaiting_next_match = true;
                }
            }
            None => {
                self.snapshot = None;
                self.view_state = None;
                self.moves_enabled = false;
                self.awaiting_next_match = true;
                self.notice = Some(Notice::warning("The next match is not ready yet"));
            }
        }
        Effect::None
    }

    fn on_stats_allocated(&mut self, confirmation: AllocateStatsResponse) -> Effect {
        let Some(stage) = self.level_up.take() else {
            log::warn("stat confirmation without a level-up in progress");
            return Effect::None;
        };
        let Some(submitted) = stage.submitted else {
            log::warn("stat confirmation without a submitted allocation");
            self.level_up = Some(stage);
            return Effect::None;
        };

        if !confirmation.success {
            self.level_up = Some(LevelUpStage {
                submitted: None,
                ..stage
            });
            self.notice = Some(Notice::error("The server did not accept the stat allocation"));
            return Effect::None;
        }

        match verify_confirmation(
            &stage.baseline,
            &submitted,
            confirmation.updated_stats.as_ref(),
        ) {
            Ok(stats) => {
                log::result(true, "stats allocated");
                self.known_stats = Some(stats);
            }
            Err(err) => {
                // The server already applied its version; adopt it.
                log::warn(&err.to_string());
                self.known_stats = confirmation.updated_stats;
                self.notice = Some(Notice::warning(&err.to_string()));
            }
        }

        // Behind the next-match control so a failed load can be retried.
        self.enter(Screen::Battle);
        self.awaiting_next_match = true;
        self.moves_enabled = false;
        match self.game_id.clone() {
            Some(game_id) => self.request(ApiRequest::GetState { game_id }),
            None => Effect::None,
        }
    }

    fn on_request_failed(&mut self, request: RequestKind, error: ClientError) -> Effect {
        log::error(&format!("{} failed: {}", request.as_str(), error));
        let message = match request {
            RequestKind::LoadCreatureTypes => format!(
                "Failed to load creature types. Make sure the backend is running. ({})",
                error
            ),
            RequestKind::CreateCreature | RequestKind::StartGame => {
                self.profile = None;
                self.game_id = None;
                format!("Failed to start game: {}", error)
            }
            RequestKind::SubmitMove => {
                self.moves_enabled = self.snapshot.as_ref().is_some_and(|m| !m.is_complete);
                format!("Failed to submit move: {}", error)
            }
            RequestKind::GetState => format!("Failed to load match: {}", error),
            RequestKind::AllocateStats => {
                if let Some(stage) = self.level_up.as_mut() {
                    stage.submitted = None;
                }
                format!("Failed to allocate stats: {}", error)
            }
        };
        self.notice = Some(Notice::error(&message));
        Effect::None
    }
}

// Private helpers
impl ClientState {
    fn request(&mut self, request: ApiRequest) -> Effect {
        log::debug("request", &format!("{} {}", request.method(), request.path()));
        self.in_flight = Some(request.kind());
        Effect::Request(request)
    }

    /// Replace the snapshot wholesale and recompute the view state.
    fn apply_snapshot(&mut self, snapshot: MatchSnapshot) {
        if let Some(profile) = self.profile.as_ref() {
            let reconciled = reconcile(&snapshot, profile, self.screen);
            if let Some(desync) = reconciled.desync {
                self.notice = Some(Notice::warning(&desync.to_string()));
            }
            self.view_state = Some(reconciled.view_state);
        } else {
            self.view_state = None;
        }
        self.battle_log.extend(snapshot.latest_messages.iter().cloned());
        self.snapshot = Some(snapshot);
    }

    fn finish(&mut self, champion_name: Option<String>) {
        log::info(&format!("tournament complete, champion: {:?}", champion_name));
        self.moves_enabled = false;
        self.awaiting_next_match = false;
        self.level_up = None;
        self.outcome = Some(TournamentOutcome { champion_name });
        self.enter(Screen::Victory);
    }

    fn enter(&mut self, next: Screen) {
        if !self.screen.can_transition_to(next) && self.screen != next {
            log::warn(&format!(
                "unexpected screen change {} -> {}",
                self.screen.as_str(),
                next.as_str()
            ));
        }
        self.screen = next;
        if let Some(view_state) = self.view_state.as_mut() {
            view_state.screen = next;
        }
    }

    fn expect_screen(&self, screen: Screen) -> ClientResult<()> {
        if self.screen != screen {
            return Err(ClientError::WrongScreen {
                screen: self.screen,
            });
        }
        Ok(())
    }

    fn expect_idle(&self) -> ClientResult<()> {
        if self.is_busy() {
            return Err(ClientError::InputLocked);
        }
        Ok(())
    }

    fn require_game(&self) -> ClientResult<GameId> {
        self.game_id
            .clone()
            .ok_or_else(|| ClientError::Incomplete(String::from("no game in progress")))
    }

    fn log_state(&self) {
        log::state_summary(
            self.screen.as_str(),
            self.snapshot.as_ref().map(|m| m.round_index + 1),
            self.moves_enabled,
            self.battle_log.len(),
        );
    }
}
