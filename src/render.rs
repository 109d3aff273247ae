//! Projection of controller state into what the result panel should show
use crate::controller::RequestState;
use crate::error::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayInstruction {
    /// No result panel at all.
    Hidden,
    Loading,
    Embed {
        src: String,
        weather_category: Option<String>,
        emotion_category: Option<String>,
        playlist_url: Option<String>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

pub fn render(state: &RequestState) -> DisplayInstruction {
    match state {
        RequestState::Idle => DisplayInstruction::Hidden,
        RequestState::Loading => DisplayInstruction::Loading,
        RequestState::Success(result) => DisplayInstruction::Embed {
            src: result.embed_url.clone(),
            weather_category: result.weather_category.clone(),
            emotion_category: result.emotion_category.clone(),
            playlist_url: result.playlist_url.clone(),
        },
        RequestState::Failure(kind, message) => DisplayInstruction::Error {
            kind: *kind,
            message: message.clone(),
        },
    }
}

impl DisplayInstruction {
    /// Plain-text form, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            DisplayInstruction::Hidden => Vec::new(),
            DisplayInstruction::Loading => vec!["Generating playlist…".to_string()],
            DisplayInstruction::Embed { src, weather_category, emotion_category, playlist_url } => {
                let mut lines = Vec::new();
                if let Some(weather) = weather_category {
                    lines.push(format!("Weather: {}", weather));
                }
                if let Some(emotion) = emotion_category {
                    lines.push(format!("Mood: {}", emotion));
                }
                lines.push(format!("Player: {}", src));
                if let Some(url) = playlist_url {
                    lines.push(format!("Playlist: {}", url));
                }
                lines
            }
            DisplayInstruction::Error { kind, message } => {
                vec![format!("{}: {}", kind.label(), message)]
            }
        }
    }
}
