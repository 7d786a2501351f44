//! Blocking HTTP implementation of `GameApi`

use std::time::Duration;

use battler_core::api::*;
use battler_core::error::{ClientError, ClientResult};
use battler_core::state::ClientConfig;
use serde::de::DeserializeOwned;

pub struct HttpApi {
    agent: ureq::Agent,
    base: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build();
        Self {
            agent,
            base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Send a request to the endpoint it names
    fn send<T: DeserializeOwned>(&self, request: &ApiRequest) -> ClientResult<T> {
        let path = request.path();
        log::debug!(target: "battler", "{} {}", request.method(), path);
        let call = self.agent.request(request.method(), &self.url(&path));
        match request.body() {
            Some(body) => read_json(call.send_json(body)),
            None => read_json(call.call()),
        }
    }
}

fn read_json<T: DeserializeOwned>(
    response: Result<ureq::Response, ureq::Error>,
) -> ClientResult<T> {
    match response {
        Ok(response) => {
            let body = response
                .into_string()
                .map_err(|e| ClientError::network(&e.to_string()))?;
            serde_json::from_str(&body).map_err(|e| ClientError::decode(&e.to_string()))
        }
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(failure_from_body(status, &body))
        }
        Err(ureq::Error::Transport(transport)) => Err(ClientError::network(&transport.to_string())),
    }
}

impl GameApi for HttpApi {
    fn creature_types(&mut self) -> ClientResult<Vec<CreatureTypeInfo>> {
        self.send(&ApiRequest::LoadCreatureTypes)
    }

    fn create_creature(&mut self, request: &CreateCreatureRequest) -> ClientResult<CreatedCreature> {
        self.send(&ApiRequest::CreateCreature(request.clone()))
    }

    fn start_game(&mut self, request: &StartGameRequest) -> ClientResult<StartGameResponse> {
        self.send(&ApiRequest::StartGame(request.clone()))
    }

    fn submit_move(
        &mut self,
        game_id: &str,
        request: &SubmitMoveRequest,
    ) -> ClientResult<MoveResponse> {
        self.send(&ApiRequest::SubmitMove {
            game_id: game_id.to_string(),
            body: request.clone(),
        })
    }

    fn game_state(&mut self, game_id: &str) -> ClientResult<GameStateResponse> {
        self.send(&ApiRequest::GetState {
            game_id: game_id.to_string(),
        })
    }

    fn allocate_stats(
        &mut self,
        game_id: &str,
        request: &AllocateStatsRequest,
    ) -> ClientResult<AllocateStatsResponse> {
        self.send(&ApiRequest::AllocateStats {
            game_id: game_id.to_string(),
            body: request.clone(),
        })
    }
}
