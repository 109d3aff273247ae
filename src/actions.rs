//! Messages exchanged between the controller and the playlist worker
use crate::api::{PlaylistResult, Query};
use crate::error::PlaylistError;

// Requests from the controller to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    GeneratePlaylist { generation: u64, query: Query },
}

// Responses from the worker back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    PlaylistGenerated { generation: u64, result: Result<PlaylistResult, PlaylistError> },
}
