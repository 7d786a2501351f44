//! Blocking driver for hosts with a synchronous transport
//!
//! `Session` runs request effects against a [`GameApi`] until the chain
//! settles and hands timer effects back to the caller.

use crate::api::{ApiRequest, GameApi};
use crate::engine::{ApiEvent, Effect, Intent};
use crate::error::ClientResult;
use crate::log;
use crate::state::{ClientConfig, ClientState};
use crate::view::GameView;

/// Perform one request and wrap the outcome as an event
pub fn execute<A: GameApi + ?Sized>(api: &mut A, request: &ApiRequest) -> ApiEvent {
    let kind = request.kind();
    log::debug("execute", &format!("{} {}", request.method(), request.path()));
    let result = match request {
        ApiRequest::LoadCreatureTypes => api.creature_types().map(ApiEvent::TypesLoaded),
        ApiRequest::CreateCreature(body) => {
            api.create_creature(body).map(ApiEvent::CreatureCreated)
        }
        ApiRequest::StartGame(body) => api.start_game(body).map(ApiEvent::GameStarted),
        ApiRequest::SubmitMove { game_id, body } => {
            api.submit_move(game_id, body).map(ApiEvent::MoveResolved)
        }
        ApiRequest::GetState { game_id } => api.game_state(game_id).map(ApiEvent::StateLoaded),
        ApiRequest::AllocateStats { game_id, body } => api
            .allocate_stats(game_id, body)
            .map(ApiEvent::StatsAllocated),
    };
    ApiEvent::from_result(kind, result)
}

pub struct Session<A: GameApi> {
    api: A,
    state: ClientState,
}

impl<A: GameApi> Session<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        Self {
            api,
            state: ClientState::new(config),
        }
    }

    /// Load the creature type catalogue
    pub fn start(&mut self) -> Effect {
        let effect = self.state.boot();
        self.run(effect)
    }

    /// Dispatch an intent and run any requests it triggers.
    ///
    /// Returns the trailing timer effect, if any.
    pub fn handle(&mut self, intent: Intent) -> ClientResult<Effect> {
        let effect = self.state.dispatch(intent)?;
        Ok(self.run(effect))
    }

    /// Deliver a timer event once the host has waited it out
    pub fn deliver(&mut self, event: ApiEvent) -> Effect {
        let effect = self.state.receive(event);
        self.run(effect)
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn run(&mut self, mut effect: Effect) -> Effect {
        while let Effect::Request(request) = effect {
            let event = execute(&mut self.api, &request);
            effect = self.state.receive(event);
        }
        effect
    }
}
