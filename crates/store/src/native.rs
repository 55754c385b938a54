//! Desktop transport: blocking `ureq` calls on Bevy's IO task pool.

use std::time::Duration;

use bevy::tasks::IoTaskPool;

use parcels::StoreError;

use crate::rest::{RestRequest, RestResponse};
use crate::{Completion, Transport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: RestRequest, done: Completion) {
        let agent = self.agent.clone();
        IoTaskPool::get()
            .spawn(async move {
                done(send(&agent, &request));
            })
            .detach();
    }
}

fn send(agent: &ureq::Agent, request: &RestRequest) -> Result<RestResponse, StoreError> {
    let mut call = agent.request(request.method.as_str(), &request.url);
    for (name, value) in &request.headers {
        call = call.set(name, value);
    }

    let outcome = match &request.body {
        Some(body) => call.send_string(body),
        None => call.call(),
    };

    match outcome {
        Ok(response) => {
            let status = response.status();
            let body = response
                .into_string()
                .map_err(|e| StoreError::Transport(format!("reading response body: {e}")))?;
            Ok(RestResponse { status, body })
        }
        // Non-2xx still carries a body worth parsing for the error message.
        Err(ureq::Error::Status(status, response)) => Ok(RestResponse {
            status,
            body: response.into_string().unwrap_or_default(),
        }),
        Err(ureq::Error::Transport(e)) => Err(StoreError::Transport(e.to_string())),
    }
}
