//! Itinerary export as a paginated PDF document.

use crate::{Error, Result, images::PhotoDownloader, planner::Itinerary};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, image_crate,
};
use std::collections::HashMap;
use tracing::{debug, warn};

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;
const BOTTOM_MARGIN: f32 = 6.35;
const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;
const MM_PER_INCH: f32 = 25.4;
// Embedded photos are drawn into a 4x3 inch box.
const PHOTO_WIDTH: f32 = 4.0 * MM_PER_INCH;
const PHOTO_HEIGHT: f32 = 3.0 * MM_PER_INCH;
const PHOTO_DPI: f32 = 300.0;

#[derive(Clone, Copy)]
enum Style {
    Title,
    Heading,
    Subheading,
    Body,
    Caption,
}

impl Style {
    fn size(self) -> f32 {
        match self {
            Style::Title => 20.0,
            Style::Heading => 15.0,
            Style::Subheading => 12.5,
            Style::Body => 10.0,
            Style::Caption => 9.0,
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Cursor over the document that starts a new page when the current one
/// runs out of room.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: add_font(&doc, BuiltinFont::Helvetica)?,
            bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
            italic: add_font(&doc, BuiltinFont::HelveticaOblique)?,
        };
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            fonts,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn paragraph(&mut self, text: &str, style: Style) {
        self.indented(text, style, 0.0);
    }

    fn indented(&mut self, text: &str, style: Style, indent: f32) {
        let size = style.size();
        let line_height = size * PT_TO_MM * 1.4;
        let width = PAGE_WIDTH - 2.0 * MARGIN - indent;
        let max_chars = (width / (size * GLYPH_WIDTH * PT_TO_MM)).floor() as usize;

        for line in wrap(text, max_chars.max(1)) {
            self.reserve(line_height);
            self.y -= line_height;
            let font = match style {
                Style::Title | Style::Heading | Style::Subheading => &self.fonts.bold,
                Style::Caption => &self.fonts.italic,
                Style::Body => &self.fonts.regular,
            };
            self.layer
                .use_text(line, size, Mm(MARGIN + indent), Mm(self.y), font);
        }
    }

    /// Decodes `bytes` and draws the picture stretched to the photo box.
    fn photo(&mut self, bytes: &[u8]) -> Result<()> {
        let decoded = image_crate::load_from_memory(bytes)
            .map_err(|e| Error::pdf(format!("Failed to decode image: {}", e)))?;
        let rgb = decoded.to_rgb8();
        let (width_px, height_px) = rgb.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(Error::pdf("Image has no pixels"));
        }

        // Size in mm when placed unscaled at PHOTO_DPI.
        let natural_width = width_px as f32 / PHOTO_DPI * MM_PER_INCH;
        let natural_height = height_px as f32 / PHOTO_DPI * MM_PER_INCH;

        self.reserve(PHOTO_HEIGHT);
        self.y -= PHOTO_HEIGHT;

        Image::from_dynamic_image(&image_crate::DynamicImage::ImageRgb8(rgb)).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN)),
                translate_y: Some(Mm(self.y)),
                scale_x: Some(PHOTO_WIDTH / natural_width),
                scale_y: Some(PHOTO_HEIGHT / natural_height),
                dpi: Some(PHOTO_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn spacer(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.y - height < BOTTOM_MARGIN + MARGIN / 2.0 {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| Error::pdf(format!("Failed to serialize PDF: {}", e)))
    }
}

fn add_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| Error::pdf(format!("Failed to load font: {}", e)))
}

/// Greedy word wrap; words longer than `max_chars` are hard-split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Downloads every image attached to the itinerary, keyed by URL.
/// Failed downloads are logged and left out.
pub async fn fetch_photos(
    downloader: &PhotoDownloader,
    itinerary: &Itinerary,
) -> HashMap<String, Vec<u8>> {
    let mut photos = HashMap::new();

    for image in itinerary.images.iter().flatten() {
        if photos.contains_key(&image.url) {
            continue;
        }
        match downloader.download(&image.url).await {
            Ok(bytes) => {
                photos.insert(image.url.clone(), bytes);
            }
            Err(e) => warn!("Error downloading image for '{}': {}", image.search_term, e),
        }
    }

    photos
}

/// Downloads the itinerary's images and renders the document.
pub async fn export_itinerary(
    itinerary: &Itinerary,
    downloader: &PhotoDownloader,
) -> Result<Vec<u8>> {
    let photos = fetch_photos(downloader, itinerary).await;
    render_itinerary(itinerary, &photos)
}

/// Renders the itinerary. Each image whose bytes are present in `photos`
/// is embedded under "Trip Highlights" with its attribution below; images
/// that are missing or fail to decode are skipped.
pub fn render_itinerary(
    itinerary: &Itinerary,
    photos: &HashMap<String, Vec<u8>>,
) -> Result<Vec<u8>> {
    let mut writer = PageWriter::new("Trip Itinerary")?;

    writer.paragraph("Your Trip Itinerary", Style::Title);
    writer.spacer(4.0);

    writer.paragraph("Trip Summary:", Style::Heading);
    writer.paragraph(&itinerary.summary, Style::Body);
    writer.spacer(4.0);

    writer.paragraph("Daily Itinerary:", Style::Heading);
    for day in &itinerary.daily_itinerary {
        writer.paragraph(&format!("Day {}", day.day), Style::Subheading);
        writer.indented(
            &format!("Activities: {}", day.activities.join(", ")),
            Style::Body,
            4.0,
        );
        writer.indented(&format!("Meals: {}", day.meals.join(", ")), Style::Body, 4.0);
        writer.indented(
            &format!("Transportation: {}", day.transportation.join(", ")),
            Style::Body,
            4.0,
        );
        writer.spacer(3.0);
    }

    writer.paragraph("Accommodations:", Style::Heading);
    for accommodation in &itinerary.accommodations {
        writer.paragraph(accommodation, Style::Body);
    }
    writer.spacer(4.0);

    writer.paragraph("Travel Tips:", Style::Heading);
    for tip in &itinerary.tips {
        writer.indented(&format!("- {}", tip), Style::Body, 2.0);
    }
    writer.spacer(4.0);

    let mut embedded = 0;
    if let Some(images) = itinerary.images.as_ref().filter(|images| !images.is_empty()) {
        writer.paragraph("Trip Highlights:", Style::Heading);
        writer.spacer(4.0);

        for image in images {
            let Some(bytes) = photos.get(&image.url) else {
                continue;
            };
            if let Err(e) = writer.photo(bytes) {
                warn!("Error processing image for '{}': {}", image.search_term, e);
                continue;
            }
            writer.paragraph(&image.attribution, Style::Caption);
            writer.spacer(4.0);
            embedded += 1;
        }
    }

    let bytes = writer.finish()?;
    debug!(
        "Rendered itinerary PDF ({} bytes, {} photos)",
        bytes.len(),
        embedded
    );
    Ok(bytes)
}
