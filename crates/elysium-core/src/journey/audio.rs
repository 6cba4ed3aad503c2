//! Voice recording references.
//!
//! The store never looks inside the audio. It only checks that a reference
//! is either a base64 `data:` URI or an absolute URL before accepting it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::Url;

/// Schemes accepted for URL references.
const URL_SCHEMES: &[&str] = &["http", "https", "blob", "file"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioRefKind {
    /// Inline `data:<mime>;base64,<payload>`
    DataUri,
    /// A fetchable or object URL
    Url,
}

/// Classify an audio reference, or `None` if it is neither form.
pub fn classify(audio_ref: &str) -> Option<AudioRefKind> {
    if let Some(rest) = audio_ref.strip_prefix("data:") {
        let (meta, payload) = rest.split_once(',')?;
        if !meta.ends_with(";base64") || payload.is_empty() {
            return None;
        }
        return STANDARD.decode(payload).ok().map(|_| AudioRefKind::DataUri);
    }
    let url = Url::parse(audio_ref).ok()?;
    URL_SCHEMES
        .contains(&url.scheme())
        .then_some(AudioRefKind::Url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_base64_data_uri() {
        assert_eq!(
            classify("data:audio/webm;base64,GkXfo59ChoEBQveBAULygQRC84EI"),
            Some(AudioRefKind::DataUri)
        );
    }

    #[test]
    fn accepts_urls() {
        assert_eq!(classify("https://cdn.example.org/voice/3.mp3"), Some(AudioRefKind::Url));
        assert_eq!(
            classify("blob:https://app.example.org/0b6c1a2e-4f7d-4b8e-9a51-0c7d1f3e2a11"),
            Some(AudioRefKind::Url)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("voice.mp3"), None);
        assert_eq!(classify("data:audio/webm;base64,"), None);
        assert_eq!(classify("data:audio/webm,plain"), None);
        assert_eq!(classify("data:audio/webm;base64,@@not-base64@@"), None);
        assert_eq!(classify("mailto:someone@example.org"), None);
    }
}
