use serde::{Deserialize, Serialize};
use super::ScanMode;

/// Estado del modo de escaneo
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    ScanningSingle,
    ScanningMulti,
}

impl SessionMode {
    pub fn scanning(mode: ScanMode) -> Self {
        match mode {
            ScanMode::Single => SessionMode::ScanningSingle,
            ScanMode::Multi => SessionMode::ScanningMulti,
        }
    }

    pub fn is_scanning(&self) -> bool {
        !matches!(self, SessionMode::Idle)
    }

    pub fn scan_mode(&self) -> Option<ScanMode> {
        match self {
            SessionMode::Idle => None,
            SessionMode::ScanningSingle => Some(ScanMode::Single),
            SessionMode::ScanningMulti => Some(ScanMode::Multi),
        }
    }
}

/// Tipo de feedback (solo afecta al estilo del toast)
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    #[default]
    Info,
    Success,
    Duplicate,
    Error,
}

impl FeedbackKind {
    /// Clase CSS del toast
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackKind::Info => "feedback--info",
            FeedbackKind::Success => "feedback--success",
            FeedbackKind::Duplicate => "feedback--duplicate",
            FeedbackKind::Error => "feedback--error",
        }
    }
}

/// Estado de la sesión de escaneo (solo en memoria)
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SessionState {
    pub mode: SessionMode,
    pub last_result: Option<String>,
    pub is_duplicate: bool,
    pub feedback_message: Option<String>,
    pub feedback_kind: FeedbackKind,
    pub feedback_visible: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mostrar un mensaje de feedback
    pub fn show_feedback(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        self.feedback_kind = kind;
        self.feedback_message = Some(message.into());
        self.feedback_visible = true;
    }

    /// Ocultar el toast; mensaje y flag de duplicado se conservan
    pub fn hide_feedback(&mut self) {
        self.feedback_visible = false;
    }
}
