//! Deck assembly: title slide, per-slide dispatch, closing slide,
//! persistence.

use crate::decor::{IconMatcher, IconStore, LexicalIconMatcher, NoPhotos, PhotoSearch};
use crate::layout::{classify, LayoutKind, TITLE_LAYOUT};
use crate::options::LayoutOptions;
use crate::placeholder::{Role, RoleMap};
use crate::render::{
    render_bullets, render_double_column, render_icon_grid, render_step_process, render_table,
    RenderContext,
};
use deckgen_core::{strip_slide_number, Error, Result, SlideSpec};
use deckgen_model::{Presentation, Shape, Template};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

const AUTHOR_SUBTITLE: &str = "by Myself and DeckGen :)";
const CLOSING_TITLE: &str = "Thank you!";

/// Builds a presentation document from deck content.
///
/// Generation is best-effort: a slide that cannot be rendered is logged and
/// skipped, and missing decoration never fails a slide. Only missing
/// top-level keys, an unknown template, or a persistence failure abort.
pub struct Assembler {
    options: LayoutOptions,
    photos: Box<dyn PhotoSearch>,
    icons: IconStore,
    matcher: Option<Box<dyn IconMatcher>>,
    rng: StdRng,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// An assembler with default options, no photo backend, and an icon
    /// store rooted at `icons/` in the working directory.
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
            photos: Box::new(NoPhotos),
            icons: IconStore::new("icons"),
            matcher: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the layout options.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a photo search backend for image decoration.
    pub fn with_photo_search(mut self, photos: impl PhotoSearch + 'static) -> Self {
        self.photos = Box::new(photos);
        self
    }

    /// Use a different icon asset directory.
    pub fn with_icon_store(mut self, icons: IconStore) -> Self {
        self.icons = icons;
        self
    }

    /// Replace the icon matcher. Without this, a lexical matcher over the
    /// icon store is used.
    pub fn with_icon_matcher(mut self, matcher: impl IconMatcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Seed the RNG, making decoration choices reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Build the deck described by `content`, persist it to `out_path`, and
    /// return the deck title followed by each rendered slide heading.
    ///
    /// `content` must carry a string `title` and an array `slides`; anything
    /// else about a slide is recoverable.
    pub fn generate(
        &mut self,
        content: &serde_json::Value,
        template_id: &str,
        out_path: &Path,
    ) -> Result<Vec<String>> {
        let title = content
            .get("title")
            .and_then(serde_json::Value::as_str)
            .ok_or(Error::MissingField("title"))?;
        let slides = content
            .get("slides")
            .and_then(serde_json::Value::as_array)
            .ok_or(Error::MissingField("slides"))?;

        let template = Template::builtin(template_id)
            .ok_or_else(|| Error::UnknownTemplate(template_id.to_string()))?;
        let roles = RoleMap::for_template(&template);
        let title_layout = template.layout(TITLE_LAYOUT).ok_or_else(|| {
            Error::Render(format!("template '{}' has no title layout", template.id))
        })?;

        let mut doc = Presentation::from_template(&template);
        let (slide_w, slide_h) = doc.slide_size_inches();

        log::info!(
            "Deck title: {} | #slides: {} | template: {}",
            title,
            slides.len(),
            template.name
        );

        let slide = doc.add_slide(title_layout);
        slide.set_title(title);
        if let Some(idx) = roles.get(Role::Subtitle) {
            if let Some(frame) = slide.placeholder_mut(idx).and_then(Shape::frame_mut) {
                frame.set_text(AUTHOR_SUBTITLE);
            }
        }
        let mut headers = vec![title.to_string()];

        let lexical;
        let matcher: &dyn IconMatcher = match &self.matcher {
            Some(matcher) => matcher.as_ref(),
            None => {
                lexical = LexicalIconMatcher::for_store(&self.icons);
                &lexical
            }
        };

        for (number, value) in slides.iter().enumerate() {
            let mut ctx = RenderContext {
                doc: &mut doc,
                template: &template,
                roles: &roles,
                options: &self.options,
                photos: self.photos.as_ref(),
                icons: &self.icons,
                matcher,
                rng: &mut self.rng,
                slide_w,
                slide_h,
            };

            match render_one(&mut ctx, value) {
                Ok(heading) => headers.push(heading),
                Err(e) => {
                    // One bad slide must not abort the deck.
                    log::error!(
                        "Error while processing slide {}: {e}...continuing with the next one",
                        number + 1
                    );
                }
            }
        }

        let slide = doc.add_slide(title_layout);
        slide.set_title(CLOSING_TITLE);

        doc.save(out_path)?;
        Ok(headers)
    }
}

/// Parse, classify, and render one slide. Returns its cleaned heading.
fn render_one(ctx: &mut RenderContext, value: &serde_json::Value) -> Result<String> {
    let spec: SlideSpec = serde_json::from_value(value.clone())
        .map_err(|e| Error::Render(format!("unrenderable slide content: {e}")))?;

    let kind = classify(&spec, ctx.options);
    log::debug!("Slide '{}' classified as {:?}", spec.heading, kind);

    match kind {
        LayoutKind::IconGrid => render_icon_grid(ctx, &spec)?,
        LayoutKind::Table => render_table(ctx, &spec)?,
        LayoutKind::DoubleColumn => render_double_column(ctx, &spec)?,
        LayoutKind::StepProcess => render_step_process(ctx, &spec)?,
        LayoutKind::Bullets => render_bullets(ctx, &spec)?,
    }

    Ok(strip_slide_number(&spec.heading).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::{Photo, PhotoSet, PhotoSize, PhotoSources};
    use deckgen_model::{AutoShapeType, ShapeContent};
    use serde_json::json;

    /// A photo backend that always returns one scripted photo.
    struct ScriptedPhotos;

    impl PhotoSearch for ScriptedPhotos {
        fn search(&self, _query: &str, _size: PhotoSize) -> deckgen_core::Result<PhotoSet> {
            Ok(PhotoSet {
                photos: vec![Photo {
                    url: Some("https://photos.example/page".into()),
                    src: Some(PhotoSources {
                        large: Some("https://photos.example/large.jpg".into()),
                        original: None,
                    }),
                }],
            })
        }

        fn fetch(&self, _url: &str) -> deckgen_core::Result<Vec<u8>> {
            Ok(vec![0xFF, 0xD8, 0xFF])
        }
    }

    fn generate(content: serde_json::Value) -> (Vec<String>, Presentation) {
        generate_with(Assembler::new().with_seed(42), content)
    }

    fn generate_with(
        mut assembler: Assembler,
        content: serde_json::Value,
    ) -> (Vec<String>, Presentation) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let headers = assembler.generate(&content, "basic", &path).unwrap();
        let doc = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        (headers, doc)
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let mut assembler = Assembler::new();
        let dir = tempfile::tempdir().unwrap();
        let err = assembler
            .generate(&json!({"slides": []}), "basic", &dir.path().join("x.json"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("title")));
    }

    #[test]
    fn test_missing_slides_is_fatal() {
        let mut assembler = Assembler::new();
        let dir = tempfile::tempdir().unwrap();
        let err = assembler
            .generate(&json!({"title": "T"}), "basic", &dir.path().join("x.json"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("slides")));
    }

    #[test]
    fn test_unknown_template_is_fatal() {
        let mut assembler = Assembler::new();
        let dir = tempfile::tempdir().unwrap();
        let err = assembler
            .generate(
                &json!({"title": "T", "slides": []}),
                "vaporwave",
                &dir.path().join("x.json"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate(_)));
    }

    #[test]
    fn test_empty_deck_has_title_and_closing_slides() {
        let (headers, doc) = generate(json!({"title": "T", "slides": []}));

        assert_eq!(headers, vec!["T"]);
        assert_eq!(doc.slides.len(), 2);
        assert_eq!(doc.slides[0].title().as_deref(), Some("T"));
        assert_eq!(doc.slides[1].title().as_deref(), Some("Thank you!"));
    }

    #[test]
    fn test_title_slide_carries_author_subtitle() {
        let (_, doc) = generate(json!({"title": "T", "slides": []}));
        let subtitle = doc.slides[0].placeholder(1).unwrap().frame().unwrap();
        assert_eq!(subtitle.text(), AUTHOR_SUBTITLE);
    }

    #[test]
    fn test_scenario_plain_bullets() {
        // Nested bullets, number-prefixed heading, empty key message and
        // keywords: one plain content slide, three bullets at depths 0/1/1.
        let (headers, doc) = generate(json!({
            "title": "T",
            "slides": [{
                "heading": "Slide 1: Intro",
                "bullet_points": ["a", ["b", "c"]],
                "key_message": "",
                "img_keywords": ""
            }]
        }));

        assert_eq!(headers, vec!["T", "Intro"]);
        assert_eq!(doc.slides.len(), 3);

        let slide = &doc.slides[1];
        assert_eq!(slide.layout_index, 1);
        assert_eq!(slide.title().as_deref(), Some("Intro"));

        let body = slide.placeholder(1).unwrap().frame().unwrap();
        assert_eq!(body.paragraphs.len(), 3);
        let levels: Vec<usize> = body.paragraphs.iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![0, 1, 1]);
        assert_eq!(body.text(), "a\nb\nc");

        // No decoration and no key-message callout: just the two layout
        // placeholders.
        assert_eq!(slide.shapes.len(), 2);
    }

    #[test]
    fn test_scenario_double_column() {
        let (_, doc) = generate(json!({
            "title": "T",
            "slides": [{
                "heading": "Compare",
                "bullet_points": [
                    {"heading": "A", "bullet_points": ["x"]},
                    {"heading": "B", "bullet_points": ["y"]}
                ]
            }]
        }));

        let slide = &doc.slides[1];
        assert_eq!(slide.layout_index, 4);
        assert_eq!(slide.placeholder(1).unwrap().frame().unwrap().text(), "A");
        assert_eq!(slide.placeholder(2).unwrap().frame().unwrap().text(), "x");
        assert_eq!(slide.placeholder(3).unwrap().frame().unwrap().text(), "B");
        assert_eq!(slide.placeholder(4).unwrap().frame().unwrap().text(), "y");
    }

    #[test]
    fn test_scenario_step_process_chevrons() {
        let (_, doc) = generate(json!({
            "title": "T",
            "slides": [{
                "heading": "Process",
                "bullet_points": [">> s1", ">> s2", ">> s3"]
            }]
        }));

        let slide = &doc.slides[1];
        let chevrons: Vec<&Shape> = slide
            .shapes
            .iter()
            .filter(|s| {
                matches!(
                    s.content,
                    ShapeContent::AutoShape {
                        shape_type: AutoShapeType::Chevron,
                        ..
                    }
                )
            })
            .collect();

        assert_eq!(chevrons.len(), 3);
        let texts: Vec<String> = chevrons
            .iter()
            .map(|s| s.frame().unwrap().text())
            .collect();
        assert_eq!(texts, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_six_steps_render_as_pentagons() {
        let steps: Vec<String> = (1..=6).map(|i| format!(">> step {i}")).collect();
        let (_, doc) = generate(json!({
            "title": "T",
            "slides": [{"heading": "Process", "bullet_points": steps}]
        }));

        let pentagons = doc.slides[1]
            .shapes
            .iter()
            .filter(|s| {
                matches!(
                    s.content,
                    ShapeContent::AutoShape {
                        shape_type: AutoShapeType::Pentagon,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(pentagons, 6);
    }

    #[test]
    fn test_scenario_table() {
        let (_, doc) = generate(json!({
            "title": "T",
            "slides": [{
                "heading": "Compare",
                "table": {
                    "headers": ["Feature", "Value"],
                    "rows": [["Speed", "Fast"], ["Cost", "Low"]]
                }
            }]
        }));

        let slide = &doc.slides[1];
        let table = slide
            .shapes
            .iter()
            .find_map(|s| match &s.content {
                ShapeContent::Table { table } => Some(table),
                _ => None,
            })
            .expect("table shape");

        assert_eq!(table.rows(), 3);
        assert_eq!(table.cols(), 2);
        assert_eq!(table.cell(0, 0).unwrap().text(), "Feature");
        assert!(table.cell(0, 0).unwrap().paragraphs[0].runs[0].bold);
        assert!(table.cell(0, 1).unwrap().paragraphs[0].runs[0].bold);
        assert_eq!(table.cell(1, 0).unwrap().text(), "Speed");
        assert_eq!(table.cell(2, 1).unwrap().text(), "Low");
        assert!(!table.cell(1, 0).unwrap().paragraphs[0].runs[0].bold);
    }

    #[test]
    fn test_key_message_callout_on_default_layout() {
        let (_, doc) = generate(json!({
            "title": "T",
            "slides": [{
                "heading": "H",
                "bullet_points": ["a"],
                "key_message": "Takeaway"
            }]
        }));

        let slide = &doc.slides[1];
        let callout = slide
            .shapes
            .iter()
            .find(|s| {
                matches!(
                    s.content,
                    ShapeContent::AutoShape {
                        shape_type: AutoShapeType::RoundedRectangle,
                        ..
                    }
                )
            })
            .expect("key message callout");
        assert_eq!(callout.frame().unwrap().text(), "Takeaway");
    }

    #[test]
    fn test_icon_grid_omits_key_message() {
        let (_, doc) = generate(json!({
            "title": "T",
            "slides": [{
                "heading": "H",
                "bullet_points": ["[[a]] one", "[[b]] two"],
                "key_message": "Should not appear"
            }]
        }));

        let slide = &doc.slides[1];
        assert_eq!(slide.layout_index, 5);
        let texts: Vec<String> = slide
            .shapes
            .iter()
            .filter_map(|s| s.frame().map(deckgen_model::TextFrame::text))
            .collect();
        assert!(texts.iter().all(|t| t != "Should not appear"));
    }

    #[test]
    fn test_bad_slide_is_skipped_not_fatal() {
        let (headers, doc) = generate(json!({
            "title": "T",
            "slides": [
                {"heading": "Good", "bullet_points": ["a"]},
                42,
                {"heading": "Also good", "bullet_points": ["b"]}
            ]
        }));

        assert_eq!(headers, vec!["T", "Good", "Also good"]);
        // Title + two rendered slides + closing.
        assert_eq!(doc.slides.len(), 4);
    }

    #[test]
    fn test_forced_foreground_decoration_without_backend_degrades() {
        let options = LayoutOptions {
            image_probability: 1.0,
            foreground_probability: 1.0,
            ..LayoutOptions::default()
        };
        let assembler = Assembler::new().with_seed(7).with_options(options);
        let (_, doc) = generate_with(
            assembler,
            json!({
                "title": "T",
                "slides": [{
                    "heading": "H",
                    "bullet_points": ["a"],
                    "img_keywords": "city skyline"
                }]
            }),
        );

        let slide = &doc.slides[1];
        assert_eq!(slide.layout_index, 8);
        // No backend: picture placeholder stays empty, no footer appears.
        let picture = slide.placeholder(1).unwrap();
        assert!(matches!(
            picture.content,
            ShapeContent::Placeholder { picture: None, .. }
        ));
        assert!(!slide
            .shapes
            .iter()
            .any(|s| matches!(s.content, ShapeContent::TextBox { .. })));
    }

    #[test]
    fn test_forced_foreground_decoration_with_backend() {
        let options = LayoutOptions {
            image_probability: 1.0,
            foreground_probability: 1.0,
            ..LayoutOptions::default()
        };
        let assembler = Assembler::new()
            .with_seed(7)
            .with_options(options)
            .with_photo_search(ScriptedPhotos);
        let (_, doc) = generate_with(
            assembler,
            json!({
                "title": "T",
                "slides": [{
                    "heading": "H",
                    "bullet_points": ["a"],
                    "img_keywords": "city skyline"
                }]
            }),
        );

        let slide = &doc.slides[1];
        assert_eq!(slide.layout_index, 8);
        match &slide.placeholder(1).unwrap().content {
            ShapeContent::Placeholder {
                picture: Some(picture),
                ..
            } => {
                assert_eq!(picture.data, vec![0xFF, 0xD8, 0xFF]);
                assert_eq!(
                    picture.source_url.as_deref(),
                    Some("https://photos.example/page")
                );
            }
            other => panic!("expected filled picture placeholder, got {other:?}"),
        }

        // Attribution footer with the page hyperlink.
        let footer = slide
            .shapes
            .iter()
            .find(|s| matches!(s.content, ShapeContent::TextBox { .. }))
            .expect("attribution footer");
        let run = &footer.frame().unwrap().paragraphs[0].runs[0];
        assert_eq!(run.text, "Photo provided by Pexels");
        assert_eq!(run.hyperlink.as_deref(), Some("https://photos.example/page"));
    }

    #[test]
    fn test_forced_background_decoration_sits_behind_everything() {
        let options = LayoutOptions {
            image_probability: 1.0,
            foreground_probability: 0.0,
            ..LayoutOptions::default()
        };
        let assembler = Assembler::new()
            .with_seed(7)
            .with_options(options)
            .with_photo_search(ScriptedPhotos);
        let (_, doc) = generate_with(
            assembler,
            json!({
                "title": "T",
                "slides": [{
                    "heading": "H",
                    "bullet_points": ["a"],
                    "img_keywords": "forest"
                }]
            }),
        );

        let slide = &doc.slides[1];
        assert_eq!(slide.layout_index, 1);
        match &slide.shapes[0].content {
            ShapeContent::Picture { picture } => {
                assert_eq!(picture.opacity_pct, Some(50));
            }
            other => panic!("expected background picture first in z-order, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_keywords_never_decorate() {
        let options = LayoutOptions {
            image_probability: 1.0,
            ..LayoutOptions::default()
        };
        let assembler = Assembler::new()
            .with_seed(7)
            .with_options(options)
            .with_photo_search(ScriptedPhotos);
        let (_, doc) = generate_with(
            assembler,
            json!({
                "title": "T",
                "slides": [{
                    "heading": "H",
                    "bullet_points": ["a"],
                    "img_keywords": "  "
                }]
            }),
        );

        assert_eq!(doc.slides[1].layout_index, 1);
        assert_eq!(doc.slides[1].shapes.len(), 2);
    }

    #[test]
    fn test_same_seed_same_document() {
        let content = json!({
            "title": "T",
            "slides": [
                {"heading": "A", "bullet_points": ["a"], "img_keywords": "x"},
                {"heading": "B", "bullet_points": ["b"], "img_keywords": "y"},
                {"heading": "C", "bullet_points": ["c"], "img_keywords": "z"}
            ]
        });

        let layouts = |doc: &Presentation| -> Vec<usize> {
            doc.slides.iter().map(|s| s.layout_index).collect()
        };

        let (_, first) = generate_with(
            Assembler::new().with_seed(99).with_photo_search(ScriptedPhotos),
            content.clone(),
        );
        let (_, second) = generate_with(
            Assembler::new().with_seed(99).with_photo_search(ScriptedPhotos),
            content,
        );

        assert_eq!(layouts(&first), layouts(&second));
    }
}
