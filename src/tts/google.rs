//! Google Translate text-to-speech.
//!
//! The `translate_tts` endpoint accepts at most 100 characters per request,
//! so replies are split at word boundaries and the returned MP3 segments are
//! concatenated in order.

use async_trait::async_trait;

use crate::config::{ApiConfig, SynthesizerConfig};

use super::synthesizer::{SynthesisError, SynthesizedAudio, Synthesizer};

/// Per-request character limit of the endpoint.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Language codes the endpoint speaks.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "ar", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "es", "et", "fi",
    "fr", "gu", "hi", "hr", "hu", "id", "is", "it", "iw", "ja", "jw", "km", "kn", "ko", "la",
    "lv", "ml", "mr", "ms", "my", "ne", "nl", "no", "pl", "pt", "ro", "ru", "si", "sk", "sq",
    "sr", "su", "sv", "sw", "ta", "te", "th", "tl", "tr", "uk", "ur", "vi", "zh", "zh-CN",
    "zh-TW",
];

/// `true` if `language` can be synthesized.
pub fn is_supported_language(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Words are never broken unless a single word is longer than `max_chars`.
/// Runs of whitespace collapse to a single space.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in hard_wrap(word, max_chars) {
            let piece_len = piece.chars().count();
            let needed = if current.is_empty() {
                piece_len
            } else {
                current_len + 1 + piece_len
            };
            if needed > max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Break a single word into `max_chars`-sized pieces on char boundaries.
fn hard_wrap(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|c| c.iter().collect())
        .collect()
}

/// Synthesizes speech through `translate.google.com/translate_tts`.
pub struct GoogleTranslateSynthesizer {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateSynthesizer {
    pub fn from_config(api: &ApiConfig, tts: &SynthesizerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(api.timeout_secs))
            .user_agent("Mozilla/5.0")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: tts.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let url = format!("{}/translate_tts", self.base_url);
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Synthesizer for GoogleTranslateSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        if !is_supported_language(language) {
            return Err(SynthesisError::UnsupportedLanguage(language.to_string()));
        }

        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        log::debug!("tts: synthesizing {} chunk(s) in {language}", chunks.len());

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        Ok(SynthesizedAudio::mp3(audio))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesizer(base_url: &str) -> GoogleTranslateSynthesizer {
        let tts = SynthesizerConfig {
            language: "ko".into(),
            base_url: base_url.into(),
        };
        GoogleTranslateSynthesizer::from_config(&ApiConfig::default(), &tts)
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_text("hello  there", 100), vec!["hello there".to_string()]);
    }

    #[test]
    fn long_text_respects_limit_and_keeps_words() {
        let text = "word ".repeat(60);
        let chunks = split_text(&text, MAX_CHUNK_CHARS);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert!(chunks.iter().flat_map(|c| c.split(' ')).all(|w| w == "word"));
        assert_eq!(chunks.join(" "), text.trim_end());
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "안녕하세요".repeat(30);
        let chunks = split_text(&text, MAX_CHUNK_CHARS);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1].chars().count(), 50);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(split_text("   \n\t", 100).is_empty());
    }

    #[test]
    fn language_support() {
        assert!(is_supported_language("ko"));
        assert!(is_supported_language("en"));
        assert!(!is_supported_language("xx"));
    }

    #[tokio::test]
    async fn unsupported_language_fails_before_any_request() {
        let tts = synthesizer("http://127.0.0.1:9");
        let err = tts.synthesize("hello", "xx").await.unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedLanguage(ref l) if l == "xx"));
    }

    #[tokio::test]
    async fn empty_text_fails_before_any_request() {
        let tts = synthesizer("http://127.0.0.1:9");
        let err = tts.synthesize("  ", "ko").await.unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyText));
    }

    #[tokio::test]
    async fn unreachable_backend_is_request_error() {
        let tts = synthesizer("http://127.0.0.1:9");
        let err = tts.synthesize("hello", "en").await.unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::Request(_) | SynthesisError::Timeout
        ));
    }
}
