//! Scripted fakes for the injected browser capabilities, letting ceremony
//! and profile flows run natively without a browser or a server.

use std::cell::RefCell;
use std::collections::VecDeque;

use doork_client::features::auth::types::{
    AssertedCredential, CreatedCredential, CreationOptions, RequestOptions,
};
use doork_client::{ApiRequest, ApiResponse, AuthError, Authenticator, Transport};

/// Transport that replays scripted responses and records every request.
pub struct FakeTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<ApiResponse>>,
}

impl FakeTransport {
    pub fn scripted(responses: Vec<ApiResponse>) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            responses: RefCell::new(responses.into()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| AuthError::Network("no scripted response left".to_string()))
    }
}

pub fn response(status: u16, headers: &[(&str, &str)], body: &str) -> ApiResponse {
    ApiResponse {
        status,
        headers: headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        body: body.to_string(),
    }
}

/// Authenticator that returns canned credentials and records the options it
/// was invoked with.
pub struct FakeAuthenticator {
    fail: bool,
    pub seen_creation: RefCell<Option<CreationOptions>>,
    pub seen_request: RefCell<Option<RequestOptions>>,
}

impl FakeAuthenticator {
    pub fn working() -> Self {
        Self {
            fail: false,
            seen_creation: RefCell::new(None),
            seen_request: RefCell::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::working()
        }
    }
}

impl Authenticator for FakeAuthenticator {
    async fn create(&self, options: &CreationOptions) -> Result<CreatedCredential, AuthError> {
        self.seen_creation.borrow_mut().replace(options.clone());
        if self.fail {
            return Err(AuthError::Platform(
                "Failed to create credentials".to_string(),
            ));
        }
        Ok(CreatedCredential {
            id: "AQID".to_string(),
            kind: "public-key".to_string(),
            raw_id: vec![1, 2, 3],
            client_data_json: br#"{"type":"webauthn.create"}"#.to_vec(),
            attestation_object: vec![0xa3, 0x01, 0x02],
        })
    }

    async fn get(&self, options: &RequestOptions) -> Result<AssertedCredential, AuthError> {
        self.seen_request.borrow_mut().replace(options.clone());
        if self.fail {
            return Err(AuthError::Platform("Failed to get credentials".to_string()));
        }
        Ok(AssertedCredential {
            id: "AQID".to_string(),
            kind: "public-key".to_string(),
            raw_id: vec![1, 2, 3],
            client_data_json: br#"{"type":"webauthn.get"}"#.to_vec(),
            authenticator_data: vec![4, 5, 6],
            signature: vec![7, 8, 9],
            user_handle: None,
        })
    }
}
