//! Generation request validation and prompt construction.
//!
//! A request is validated in full before anything is sent to the completion
//! provider: an invalid request must never reach the network.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::catalog::{RevisionType, Subject};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum topic description length in characters.
pub const MAX_PROMPT_LENGTH: usize = 10_000;

/// Media type assumed when the image bytes match no known signature.
const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An image of course material attached to a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// MIME type, e.g. `image/png`.
    pub media_type: String,
    /// Standard base64 payload without any `data:` prefix.
    pub base64: String,
}

impl ImageAttachment {
    /// Render the attachment as a `data:` URL.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.base64)
    }
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
    pub prompt: String,
    pub subject: Subject,
    pub revision_type: RevisionType,
    pub image: Option<ImageAttachment>,
}

impl GenerationInput {
    /// Validate raw request fields.
    ///
    /// The prompt is trimmed. A blank `image_base64` is treated as absent.
    pub fn parse(
        prompt: &str,
        subject: &str,
        revision_type: &str,
        image_base64: Option<&str>,
    ) -> Result<Self, CoreError> {
        let prompt = validate_prompt(prompt)?;
        let subject: Subject = subject.parse()?;
        let revision_type: RevisionType = revision_type.parse()?;
        let image = match image_base64.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_image(raw)?),
            _ => None,
        };

        Ok(Self {
            prompt,
            subject,
            revision_type,
            image,
        })
    }

    /// System message specialised for this subject and revision type.
    pub fn system_prompt(&self) -> String {
        system_prompt(self.subject, self.revision_type)
    }

    /// User message carrying the topic description.
    pub fn user_message(&self) -> String {
        user_message(&self.prompt, self.image.is_some())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a topic description: non-blank and within the length limit.
///
/// Returns the trimmed prompt.
pub fn validate_prompt(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidRequest(
            "Prompt must not be empty".to_string(),
        ));
    }
    let length = trimmed.chars().count();
    if length > MAX_PROMPT_LENGTH {
        return Err(CoreError::InvalidRequest(format!(
            "Prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {length})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse an uploaded image, accepting either bare base64 or a
/// `data:<mime>;base64,<payload>` URL. ASCII whitespace in the payload
/// (MIME-style line wrapping) is dropped before decoding.
pub fn parse_image(raw: &str) -> Result<ImageAttachment, CoreError> {
    let (declared_type, payload) = match raw.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or_else(|| {
                CoreError::InvalidRequest("Malformed image data URL".to_string())
            })?;
            let media_type = header.strip_suffix(";base64").ok_or_else(|| {
                CoreError::InvalidRequest("Image data URL must be base64-encoded".to_string())
            })?;
            if !media_type.starts_with("image/") {
                return Err(CoreError::InvalidRequest(format!(
                    "Unsupported attachment type '{media_type}'"
                )));
            }
            (Some(media_type.to_string()), payload)
        }
        None => (None, raw),
    };

    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(&payload)
        .map_err(|e| CoreError::InvalidRequest(format!("Image is not valid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(CoreError::InvalidRequest("Image must not be empty".to_string()));
    }

    let media_type = declared_type
        .or_else(|| sniff_media_type(&bytes).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_IMAGE_MEDIA_TYPE.to_string());

    Ok(ImageAttachment {
        media_type,
        base64: payload,
    })
}

/// Identify common image formats from their magic bytes.
fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// Build the system message for a subject and revision type.
pub fn system_prompt(subject: Subject, revision_type: RevisionType) -> String {
    let persona = format!(
        "Tu es un expert pédagogue français spécialisé en {} pour les élèves de 3ème.",
        subject.name()
    );

    let instructions = match revision_type {
        RevisionType::StudySheet => {
            "Crée une fiche de révision claire et structurée avec:
- Un titre accrocheur
- Les notions clés en gras
- Des définitions simples
- Des exemples concrets
- Des astuces pour retenir
Utilise des emojis pour rendre la fiche attractive. Format en Markdown."
        }
        RevisionType::Quiz => {
            "Crée un QCM de 10 questions avec:
- 4 réponses possibles (A, B, C, D)
- Une seule bonne réponse par question
- Des explications courtes après chaque réponse
À la fin, donne les réponses correctes.
Format clair et lisible en Markdown."
        }
        RevisionType::Flashcards => {
            "Crée 10 flashcards de révision avec:
- RECTO: Question ou terme à définir
- VERSO: Réponse ou définition
Sépare chaque flashcard clairement.
Format en Markdown avec --- entre chaque carte."
        }
        RevisionType::Summary => {
            "Crée un résumé synthétique avec:
- Les points essentiels à retenir
- Maximum 500 mots
- Structure claire avec titres
- Mots-clés en gras
Format en Markdown."
        }
        RevisionType::FillInTheBlank => {
            "Crée un exercice de texte à trous avec:
- 10-15 mots manquants (remplacés par _____)
- Un texte cohérent sur le sujet demandé
- La liste des mots à placer en désordre
- Les réponses à la fin
Format en Markdown."
        }
    };

    format!("{persona}\n{instructions}")
}

/// Build the user message for a topic description.
pub fn user_message(prompt: &str, has_image: bool) -> String {
    if has_image {
        format!(
            "Voici le sujet/cours à réviser: {prompt}\n\nAnalyse également l'image jointe si pertinente."
        )
    } else {
        format!("Voici le sujet/cours à réviser: {prompt}")
    }
}
