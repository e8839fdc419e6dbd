//! Content-generation collaborator used by the dashboard tools.
//!
//! Navigation never depends on these calls: a failed generation leaves the
//! active view and the stored preferences untouched.

use anyhow::{Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD as Base64Standard};
use valentine_core::{DatePlan, LetterRequest, Tone};

/// Text and plan generation consumed by the tool views.
pub trait ContentGenerator {
    /// Write a love letter.
    ///
    /// # Errors
    /// Returns an error when the backend cannot produce a letter.
    fn generate_letter(&self, request: &LetterRequest) -> Result<String>;

    /// Plan a date from free-form preferences.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be reached.
    fn generate_date_plan(&self, preferences: &str) -> Result<DatePlan>;

    /// Caption a photo given as a `data:` URL.
    ///
    /// # Errors
    /// Returns an error when the image is missing or malformed.
    fn curate_memory(&self, image_data_url: &str, context: &str) -> Result<String>;
}

/// Encode raw image bytes as a `data:` URL.
#[must_use]
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", Base64Standard.encode(bytes))
}

/// Image MIME type for a file extension.
#[must_use]
pub fn image_mime(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Split a `data:image/...;base64,` URL into its MIME type and decoded bytes.
fn decode_image(image_data_url: &str) -> Result<(&str, Vec<u8>)> {
    let Some(rest) = image_data_url.strip_prefix("data:") else {
        bail!("memory image must be a data: URL");
    };
    let Some((header, payload)) = rest.split_once(',') else {
        bail!("memory image data URL has no payload");
    };
    let Some(mime) = header.strip_suffix(";base64") else {
        bail!("memory image must be base64 encoded");
    };
    if !mime.starts_with("image/") {
        bail!("unsupported memory type: {mime}");
    }
    let bytes = Base64Standard.decode(payload)?;
    if bytes.is_empty() {
        bail!("memory image is empty");
    }
    Ok((mime, bytes))
}

/// Offline generator built from fixed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    const PLANS: [(&'static [&'static str], &'static str); 3] = [
        (
            &["beach", "ocean", "sea", "jazz", "wine"],
            r#"{"title":"Moonlight by the Water","activities":["Sunset walk along the shore","Live jazz and a shared glass of wine","Long talk under the stars"],"vibe":"Breezy and unhurried","surpriseTip":"Hide a handwritten note in their coat pocket."}"#,
        ),
        (
            &["city", "food", "dinner", "restaurant", "cook"],
            r#"{"title":"A Feast for Two","activities":["Cook a three-course dinner together","Dessert on the balcony","Dance in the kitchen"],"vibe":"Warm and playful","surpriseTip":"Print the menu with their name at the top."}"#,
        ),
        (
            &["hike", "mountain", "forest", "adventure", "nature"],
            r#"{"title":"Trail to the Lookout","activities":["Morning hike to a viewpoint","Picnic at the summit","Campfire stories"],"vibe":"Adventurous and tender","surpriseTip":"Pack their favorite snack they think you forgot."}"#,
        ),
    ];

    const fn opening(tone: Tone) -> &'static str {
        match tone {
            Tone::Passionate => "Every beat of my heart burns with your name",
            Tone::Sweet => "You make ordinary days feel like sunshine",
            Tone::Funny => "I checked the manual and you are definitely the best thing that ever happened to me",
            Tone::Poetic => "Like the tide that always finds the moon, I keep finding my way back to you",
        }
    }
}

impl ContentGenerator for TemplateGenerator {
    fn generate_letter(&self, request: &LetterRequest) -> Result<String> {
        let name = request.name.trim();
        if name.is_empty() {
            bail!("a letter needs someone to write to");
        }
        let mut letter = format!("My dearest {name},\n\n{}.", Self::opening(request.tone));
        let memories = request.memories.trim();
        if !memories.is_empty() {
            letter.push_str(&format!(" I still think about {memories}, and I smile every time."));
        }
        letter.push_str("\n\nYours, today and always.");
        Ok(letter)
    }

    fn generate_date_plan(&self, preferences: &str) -> Result<DatePlan> {
        let preferences = preferences.trim().to_lowercase();
        if preferences.is_empty() {
            bail!("describe the kind of date you have in mind");
        }
        let json = Self::PLANS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| preferences.contains(k)))
            .map_or("", |(_, json)| json);
        Ok(DatePlan::parse_or_fallback(json))
    }

    fn curate_memory(&self, image_data_url: &str, context: &str) -> Result<String> {
        let (mime, bytes) = decode_image(image_data_url)?;
        let context = context.trim();
        let moment = if context.is_empty() { "this moment" } else { context };
        tracing::debug!(mime, size = bytes.len(), "captioning memory");
        Ok(format!(
            "Captured forever: {moment}. A love that knows no bounds, held still in a single frame."
        ))
    }
}
