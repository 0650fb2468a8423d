pub mod comment;
pub mod file;
pub mod pin;
pub mod user;

use serde::Serialize;

/// Success body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListEnvelope<T> {
    pub count: usize,
    pub data: Vec<T>,
    pub message: String,
}

impl<T> ListEnvelope<T> {
    pub fn new(data: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            count: data.len(),
            data,
            message: message.into(),
        }
    }
}
