use async_trait::async_trait;
use log::{info, warn};
use reqwest::Url;

use crate::error::TransportError;
use crate::event::{
    ClientRequest, LoadResponse, MoveRequest, MoveResponse, OutgoingRequest, ServerReply,
    ServerResponse, SuggestResponse,
};


// The move-validation/AI/coaching service. One method per endpoint.
#[async_trait]
pub trait ChessServer: Send + Sync {
    async fn make_move(&self, request: &MoveRequest) -> Result<MoveResponse, TransportError>;
    async fn suggest(&self) -> Result<SuggestResponse, TransportError>;
    async fn load(&self) -> Result<LoadResponse, TransportError>;
    async fn save(&self) -> Result<(), TransportError>;
}

pub struct HttpChessServer {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpChessServer {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| TransportError::Http(format!("invalid server URL {base_url:?}: {err}")))?;
        // Without the trailing slash `join` would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(HttpChessServer { base_url, client: reqwest::Client::new() })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|err| TransportError::Http(format!("cannot build URL for {path}: {err}")))
    }
}

#[async_trait]
impl ChessServer for HttpChessServer {
    async fn make_move(&self, request: &MoveRequest) -> Result<MoveResponse, TransportError> {
        let response = self.client.post(self.endpoint("move")?).json(request).send().await?;
        // The server reports rejected moves in the body, so the status is not checked here.
        Ok(response.json().await?)
    }

    async fn suggest(&self) -> Result<SuggestResponse, TransportError> {
        let response = self.client.get(self.endpoint("suggest")?).send().await?;
        Ok(response.error_for_status()?.json().await?)
    }

    async fn load(&self) -> Result<LoadResponse, TransportError> {
        let response = self.client.get(self.endpoint("load")?).send().await?;
        Ok(response.error_for_status()?.json().await?)
    }

    async fn save(&self) -> Result<(), TransportError> {
        self.client.post(self.endpoint("save")?).send().await?.error_for_status()?;
        Ok(())
    }
}

// Runs one request to completion. Never fails: transport problems are reported in the reply.
pub async fn execute(server: &dyn ChessServer, outgoing: OutgoingRequest) -> ServerReply {
    let OutgoingRequest { id, request } = outgoing;
    info!("Request {id}: {request:?}");
    let result = match &request {
        ClientRequest::Move { .. } | ClientRequest::AiMove { .. } => {
            match request.to_move_request() {
                Some(body) => server.make_move(&body).await.map(ServerResponse::Move),
                None => Err(TransportError::Malformed(crate::internal_error_message!(
                    "no move body for {request:?}"
                ))),
            }
        }
        ClientRequest::Suggest => server.suggest().await.map(ServerResponse::Suggest),
        ClientRequest::Load { .. } => server.load().await.map(ServerResponse::Load),
        ClientRequest::Save => server.save().await.map(|()| ServerResponse::Save),
    };
    if let Err(err) = &result {
        warn!("Request {id} failed: {err}");
    }
    ServerReply { id, request, result }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let server = HttpChessServer::new("http://localhost:5000").unwrap();
        assert_eq!(server.endpoint("move").unwrap().as_str(), "http://localhost:5000/move");
        let server = HttpChessServer::new("http://example.com/chess").unwrap();
        assert_eq!(server.endpoint("load").unwrap().as_str(), "http://example.com/chess/load");
        assert!(HttpChessServer::new("not a url").is_err());
    }
}
