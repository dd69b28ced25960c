//! Test double for [`Transport`].

use std::cell::RefCell;
use std::collections::VecDeque;

use super::http::{ApiError, ApiRequest, ApiResponse, Transport};

/// Records every request and replays canned responses in order.
/// Once the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    pub requests: RefCell<Vec<ApiRequest>>,
    pub responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        let transport = Self::default();
        transport.push(status, body);
        transport
    }

    pub fn push(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, body: body.to_owned() }));
    }

    pub fn push_err(&self, err: ApiError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn last(&self) -> ApiRequest {
        self.requests.borrow().last().cloned().expect("no request recorded")
    }

    pub fn count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(ApiResponse { status: 200, body: "{}".to_owned() }))
    }
}
