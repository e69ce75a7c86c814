//! Renderers for the five slide layouts, plus the shared text helpers.
//!
//! Each renderer adds exactly one slide to the document. Decoration
//! failures are logged and swallowed here; only structural problems (a
//! template without the required layout) surface as render errors, which
//! the assembler turns into a skipped slide.

use crate::decor::{fetch_photo, IconMatcher, IconStore, PhotoSearch, PhotoSize};
use crate::layout::{
    parse_icon_item, BODY_LAYOUT, COMPARISON_LAYOUT, PICTURE_LAYOUT, TITLE_ONLY_LAYOUT,
};
use crate::options::LayoutOptions;
use crate::placeholder::{Role, RoleMap};
use deckgen_core::{
    emphasis, flatten, strip_slide_number, ColumnSpec, Error, FlatBullet, Result, SlideSpec,
};
use deckgen_model::{
    Alignment, Anchor, AutoShapeType, Color, Paragraph, Picture, Presentation, Rect, Shape, Slide,
    SlideLayout, Template, TextFrame, ThemeColor,
};
use rand::rngs::StdRng;
use rand::Rng;

/// Backgrounds cycled behind icons.
const ICON_COLORS: [&str; 6] = [
    "800000", // maroon
    "6A5ACD", // slate blue
    "556B2F", // dark olive green
    "2F4F4F", // dark slate gray
    "4682B4", // steel blue
    "5F9EA0", // cadet blue
];

const ICON_ROW_TOP_IN: f64 = 3.0;
const ICON_CAPTION_BOX_IN: f64 = 2.0;
const ICON_CAPTION_GAP_IN: f64 = 0.2;
const ICON_CREDIT_TEXT: &str = "Icons by Bootstrap Icons";
const ICON_CREDIT_URL: &str = "https://icons.getbootstrap.com";

const PHOTO_CREDIT_TEXT: &str = "Photo provided by Pexels";
const BACKGROUND_OPACITY_PCT: u8 = 50;

const CHEVRON_HEIGHT_IN: f64 = 1.5;
const CHEVRON_OVERLAP_IN: f64 = 0.4;
const PENTAGON_HEIGHT_IN: f64 = 0.65;
const PENTAGON_ROW_GAP_IN: f64 = 0.3;
const PENTAGON_STAGGER_IN: f64 = 0.5;
/// Pentagon width per character of step text: 20 pt.
const STEP_CHAR_WIDTH_IN: f64 = 20.0 / 72.0;

const KEY_MESSAGE_HEIGHT_IN: f64 = 1.6;
const KEY_MESSAGE_WIDTH_DIVISOR: f64 = 2.3;
const KEY_MESSAGE_BOTTOM_GAP_IN: f64 = 0.1;

const FOOTER_HEIGHT_IN: f64 = 0.5;
const FOOTER_FONT_PT: f64 = 10.0;

/// Everything a renderer needs to put one slide into the document.
pub(crate) struct RenderContext<'a> {
    pub doc: &'a mut Presentation,
    pub template: &'a Template,
    pub roles: &'a RoleMap,
    pub options: &'a LayoutOptions,
    pub photos: &'a dyn PhotoSearch,
    pub icons: &'a IconStore,
    pub matcher: &'a dyn IconMatcher,
    pub rng: &'a mut StdRng,
    pub slide_w: f64,
    pub slide_h: f64,
}

fn required_layout<'t>(template: &'t Template, index: usize) -> Result<&'t SlideLayout> {
    template.layout(index).ok_or_else(|| {
        Error::Render(format!(
            "template '{}' has no layout {index}",
            template.id
        ))
    })
}

/// Copy parsed emphasis runs into a paragraph.
fn write_runs(paragraph: &mut Paragraph, text: &str) {
    for run in emphasis::runs(text) {
        paragraph.add_run(deckgen_model::Run {
            bold: run.bold,
            italic: run.italic,
            ..deckgen_model::Run::plain(run.text)
        });
    }
}

/// Fill a frame with flattened bullets. The first item lands in the
/// frame's existing first paragraph, matching placeholder behavior.
fn write_bullets(frame: &mut TextFrame, items: &[FlatBullet]) {
    for (i, item) in items.iter().enumerate() {
        let paragraph = if i == 0 {
            frame.first_paragraph_mut()
        } else {
            frame.add_paragraph()
        };
        paragraph.level = item.level;
        write_runs(paragraph, &item.text);
    }
}

/// Small hyperlinked text near the lower-left corner of a slide.
fn add_footer(slide: &mut Slide, slide_w: f64, slide_h: f64, text: &str, hyperlink: Option<&str>) {
    let shape = slide.add_text_box(Rect::from_inches(
        1.0,
        slide_h - FOOTER_HEIGHT_IN,
        slide_w,
        FOOTER_HEIGHT_IN,
    ));
    let frame = shape.frame_mut().expect("text boxes have frames");
    frame.first_paragraph_mut().add_run(deckgen_model::Run {
        size_pt: Some(FOOTER_FONT_PT),
        underline: Some(false),
        hyperlink: hyperlink.map(str::to_string),
        ..deckgen_model::Run::plain(text)
    });
}

/// Rounded-rectangle callout near bottom-center carrying the key message.
/// No-op when the spec has none.
fn add_key_message(slide: &mut Slide, spec: &SlideSpec, slide_w: f64, slide_h: f64) {
    let Some(message) = spec.key_message() else {
        return;
    };

    let width = slide_w / KEY_MESSAGE_WIDTH_DIVISOR;
    let top = slide_h - KEY_MESSAGE_HEIGHT_IN - KEY_MESSAGE_BOTTOM_GAP_IN;
    let left = (slide_w - width) / 2.0;

    let shape = slide.add_auto_shape(
        AutoShapeType::RoundedRectangle,
        Rect::from_inches(left, top, width, KEY_MESSAGE_HEIGHT_IN),
    );
    let frame = shape.frame_mut().expect("auto shapes have frames");
    write_runs(frame.first_paragraph_mut(), message);
}

fn write_placeholder_bullets(slide: &mut Slide, idx: Option<u32>, items: &[FlatBullet]) {
    if let Some(idx) = idx {
        if let Some(frame) = slide.placeholder_mut(idx).and_then(Shape::frame_mut) {
            write_bullets(frame, items);
        }
    }
}

/// A row of icon+caption pairs on the title-only layout.
pub(crate) fn render_icon_grid(ctx: &mut RenderContext, spec: &SlideSpec) -> Result<()> {
    let leaves = spec
        .bullet_points
        .top_leaves()
        .ok_or_else(|| Error::Render("icon grid without a flat item list".into()))?;
    let items: Vec<_> = leaves.iter().map(|text| parse_icon_item(text)).collect();

    let wanted: Vec<String> = items.iter().map(|item| item.icon.clone()).collect();
    let fallbacks = ctx.matcher.find_fallback(&wanted);

    let layout = required_layout(ctx.template, TITLE_ONLY_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);
    let icon = ctx.options.icon_size_in;
    let bg = ctx.options.icon_bg_size_in;
    let n = items.len();
    let spacing = (slide_w - n as f64 * icon) / (n as f64 + 1.0);

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));

    for (i, item) in items.iter().enumerate() {
        let left = spacing + i as f64 * (icon + spacing);
        let center = left + icon / 2.0;

        // Colored backdrop, slightly larger than the icon and centered on it.
        let color = ICON_COLORS[ctx.rng.random_range(0..ICON_COLORS.len())];
        let backdrop = slide.add_auto_shape(
            AutoShapeType::RoundedRectangle,
            Rect::from_inches(
                center - bg / 2.0,
                ICON_ROW_TOP_IN - (bg - icon) / 2.0,
                bg,
                bg,
            ),
        );
        let style = backdrop.style_mut().expect("auto shapes have styles");
        style.fill = Some(Color::rgb(color));
        style.line = Some(Color::rgb(color));
        style.shadow = false;

        let name = if ctx.icons.exists(&item.icon) {
            item.icon.clone()
        } else {
            let fallback = fallbacks.get(i).cloned().unwrap_or_default();
            log::warn!(
                "Icon not found: {}...using fallback icon: {}",
                item.icon,
                fallback
            );
            fallback
        };

        match ctx.icons.load(&name) {
            Ok(bytes) => {
                slide.add_picture(
                    Rect::from_inches(left, ICON_ROW_TOP_IN, icon, icon),
                    Picture::new(bytes),
                );
            }
            Err(e) => log::warn!("Skipping icon image '{name}': {e}"),
        }

        // Borderless caption box beneath the icon.
        let caption = slide.add_auto_shape(
            AutoShapeType::RoundedRectangle,
            Rect::from_inches(
                center - ICON_CAPTION_BOX_IN / 2.0,
                ICON_ROW_TOP_IN + icon + ICON_CAPTION_GAP_IN,
                ICON_CAPTION_BOX_IN,
                ICON_CAPTION_BOX_IN,
            ),
        );
        let style = caption.style_mut().expect("auto shapes have styles");
        style.fill = None;
        style.line = None;
        style.shadow = false;

        let frame = caption.frame_mut().expect("auto shapes have frames");
        frame.word_wrap = true;
        frame.vertical_anchor = Some(Anchor::Middle);
        let paragraph = frame.first_paragraph_mut();
        paragraph.alignment = Some(Alignment::Center);
        write_runs(paragraph, &item.caption);
        for run in &mut paragraph.runs {
            run.color = Some(Color::Theme(ThemeColor::Text2));
        }
    }

    add_footer(
        slide,
        slide_w,
        slide_h,
        ICON_CREDIT_TEXT,
        Some(ICON_CREDIT_URL),
    );
    Ok(())
}

/// A (rows+1) x headers table at the body placeholder's bounds.
pub(crate) fn render_table(ctx: &mut RenderContext, spec: &SlideSpec) -> Result<()> {
    let table_spec = spec
        .table
        .as_ref()
        .ok_or_else(|| Error::Render("table layout without table content".into()))?;

    let layout = required_layout(ctx.template, BODY_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);
    let body_idx = ctx.roles.get(Role::Body);

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));

    let bounds = body_idx
        .and_then(|idx| slide.placeholder(idx))
        .map(|shape| shape.bounds)
        .unwrap_or_else(|| Rect::from_inches(0.92, 1.75, slide_w - 1.84, slide_h - 2.5));

    let cols = table_spec.headers.len();
    let grid = slide.add_table(bounds, table_spec.rows.len() + 1, cols);

    for (col, header) in table_spec.headers.iter().enumerate() {
        if let Some(cell) = grid.cell_mut(0, col) {
            cell.first_paragraph_mut().add_run(deckgen_model::Run {
                bold: true,
                ..deckgen_model::Run::plain(header.as_str())
            });
        }
    }

    for (row, cells) in table_spec.rows.iter().enumerate() {
        // Cells beyond the header width have no column to land in.
        for (col, text) in cells.iter().enumerate().take(cols) {
            if let Some(cell) = grid.cell_mut(row + 1, col) {
                cell.set_text(text.as_str());
            }
        }
    }

    Ok(())
}

/// Two side-by-side columns on the comparison layout.
pub(crate) fn render_double_column(ctx: &mut RenderContext, spec: &SlideSpec) -> Result<()> {
    let (left, right) = spec
        .bullet_points
        .as_column_pair()
        .ok_or_else(|| Error::Render("double-column layout without a column pair".into()))?;

    let layout = required_layout(ctx.template, COMPARISON_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);
    let roles = ctx.roles;

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));

    render_column(
        slide,
        left,
        roles.get(Role::LeftHeading),
        roles.get(Role::LeftBody),
    );
    render_column(
        slide,
        right,
        roles.get(Role::RightHeading),
        roles.get(Role::RightBody),
    );

    add_key_message(slide, spec, slide_w, slide_h);
    Ok(())
}

fn render_column(
    slide: &mut Slide,
    column: &ColumnSpec,
    heading_idx: Option<u32>,
    body_idx: Option<u32>,
) {
    let heading = column.heading.trim();
    let mut fold_heading = false;

    match heading_idx {
        Some(idx) if !heading.is_empty() => {
            match slide.placeholder_mut(idx).and_then(Shape::frame_mut) {
                Some(frame) => frame.set_text(heading),
                None => fold_heading = true,
            }
        }
        _ => fold_heading = !heading.is_empty(),
    }

    let Some(body_idx) = body_idx else {
        return;
    };
    let Some(frame) = slide.placeholder_mut(body_idx).and_then(Shape::frame_mut) else {
        return;
    };

    let items = flatten(&column.bullet_points);
    if fold_heading {
        // No heading placeholder: the heading becomes the body's first line.
        frame.set_text(heading);
        for item in &items {
            let paragraph = frame.add_paragraph();
            paragraph.level = item.level;
            write_runs(paragraph, &item.text);
        }
    } else {
        write_bullets(frame, &items);
    }
}

/// Chevrons or pentagons for an ordered process.
pub(crate) fn render_step_process(ctx: &mut RenderContext, spec: &SlideSpec) -> Result<()> {
    let steps: Vec<&str> = spec
        .bullet_points
        .top_leaves()
        .ok_or_else(|| Error::Render("step layout without a flat step list".into()))?;
    let n = steps.len();

    let layout = required_layout(ctx.template, BODY_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));

    if n <= 4 {
        // Horizontal chevron chain dividing the slide width evenly.
        let width = slide_w / n as f64 - 0.01;
        let top = slide_h / 2.0;
        let mut left = (slide_w - width * n as f64) / 2.0 + 0.05;

        for step in &steps {
            let shape = slide.add_auto_shape(
                AutoShapeType::Chevron,
                Rect::from_inches(left, top, width, CHEVRON_HEIGHT_IN),
            );
            let paragraph = shape
                .frame_mut()
                .expect("auto shapes have frames")
                .first_paragraph_mut();
            paragraph.alignment = Some(Alignment::Left);
            write_runs(paragraph, step);
            left += width - CHEVRON_OVERLAP_IN;
        }
    } else {
        // Vertical pentagon stack, sized from the median step length so one
        // long outlier does not set the width.
        let cap = slide_w * 2.0 / 3.0;
        let mut widths: Vec<f64> = steps
            .iter()
            .map(|step| (STEP_CHAR_WIDTH_IN * step.chars().count() as f64).min(cap))
            .collect();
        widths.sort_by(f64::total_cmp);
        let width = widths[widths.len() / 2];

        let mut top = slide_h / 4.0;
        let mut left = 1.0;

        for step in &steps {
            let shape = slide.add_auto_shape(
                AutoShapeType::Pentagon,
                Rect::from_inches(left, top, width, PENTAGON_HEIGHT_IN),
            );
            let paragraph = shape
                .frame_mut()
                .expect("auto shapes have frames")
                .first_paragraph_mut();
            paragraph.alignment = Some(Alignment::Left);
            write_runs(paragraph, step);
            top += PENTAGON_HEIGHT_IN + PENTAGON_ROW_GAP_IN;
            left += PENTAGON_STAGGER_IN;
        }
    }

    add_key_message(slide, spec, slide_w, slide_h);
    Ok(())
}

/// The default layout: plain bullets, with a chance of photo decoration.
pub(crate) fn render_bullets(ctx: &mut RenderContext, spec: &SlideSpec) -> Result<()> {
    if let Some(keywords) = spec.image_keywords() {
        if ctx.rng.random::<f64>() < ctx.options.image_probability {
            if ctx.rng.random::<f64>() < ctx.options.foreground_probability {
                return render_picture_caption(ctx, spec, keywords);
            }
            return render_background_image(ctx, spec, keywords);
        }
    }

    render_plain_bullets(ctx, spec)
}

fn render_plain_bullets(ctx: &mut RenderContext, spec: &SlideSpec) -> Result<()> {
    let layout = required_layout(ctx.template, BODY_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);
    let body_idx = ctx.roles.get(Role::Body);

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));
    write_placeholder_bullets(slide, body_idx, &flatten(&spec.bullet_points));

    add_key_message(slide, spec, slide_w, slide_h);
    Ok(())
}

/// Bullets beside a picture placeholder, on the picture-with-caption
/// layout. The slide stands even when the photo fetch fails.
fn render_picture_caption(ctx: &mut RenderContext, spec: &SlideSpec, keywords: &str) -> Result<()> {
    let layout = required_layout(ctx.template, PICTURE_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);
    let picture_idx = ctx.roles.get(Role::Picture);
    let body_idx = ctx.roles.get(Role::CaptionBody);

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));
    write_placeholder_bullets(slide, body_idx, &flatten(&spec.bullet_points));
    add_key_message(slide, spec, slide_w, slide_h);

    match fetch_photo(
        ctx.photos,
        keywords,
        PhotoSize::Medium,
        ctx.options.max_photo_candidates,
        ctx.rng,
    ) {
        Ok(Some((bytes, page_url))) => {
            if let Some(idx) = picture_idx {
                slide.insert_picture_into(
                    idx,
                    Picture {
                        data: bytes,
                        source_url: page_url.clone(),
                        opacity_pct: None,
                    },
                );
            }
            add_footer(slide, slide_w, slide_h, PHOTO_CREDIT_TEXT, page_url.as_deref());
        }
        Ok(None) => {}
        Err(e) => log::error!("Error while adding image to slide: {e}"),
    }

    Ok(())
}

/// Plain bullets over a full-bleed background image at half opacity.
fn render_background_image(ctx: &mut RenderContext, spec: &SlideSpec, keywords: &str) -> Result<()> {
    let layout = required_layout(ctx.template, BODY_LAYOUT)?;
    let (slide_w, slide_h) = (ctx.slide_w, ctx.slide_h);
    let body_idx = ctx.roles.get(Role::Body);

    let slide = ctx.doc.add_slide(layout);
    slide.set_title(strip_slide_number(&spec.heading));
    write_placeholder_bullets(slide, body_idx, &flatten(&spec.bullet_points));
    add_key_message(slide, spec, slide_w, slide_h);

    match fetch_photo(
        ctx.photos,
        keywords,
        PhotoSize::Large,
        ctx.options.max_photo_candidates,
        ctx.rng,
    ) {
        Ok(Some((bytes, page_url))) => {
            let index = slide.add_picture(
                Rect::from_inches(0.0, 0.0, slide_w, slide_h),
                Picture {
                    data: bytes,
                    source_url: page_url.clone(),
                    opacity_pct: Some(BACKGROUND_OPACITY_PCT),
                },
            );
            slide.send_to_back(index);
            add_footer(slide, slide_w, slide_h, PHOTO_CREDIT_TEXT, page_url.as_deref());
        }
        Ok(None) => {}
        Err(e) => log::error!("Error while adding background image to slide: {e}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_model::ShapeContent;

    fn body_slide() -> (Presentation, usize) {
        let template = Template::builtin("basic").unwrap();
        let mut doc = Presentation::from_template(&template);
        doc.add_slide(template.layout(BODY_LAYOUT).unwrap());
        (doc, 0)
    }

    #[test]
    fn test_write_bullets_levels_and_first_paragraph_reuse() {
        let (mut doc, i) = body_slide();
        let frame = doc.slides[i]
            .placeholder_mut(1)
            .and_then(Shape::frame_mut)
            .unwrap();

        let items = vec![
            FlatBullet::new("a", 0),
            FlatBullet::new("b", 1),
            FlatBullet::new("c", 1),
        ];
        write_bullets(frame, &items);

        assert_eq!(frame.paragraphs.len(), 3);
        assert_eq!(frame.text(), "a\nb\nc");
        let levels: Vec<usize> = frame.paragraphs.iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![0, 1, 1]);
    }

    #[test]
    fn test_write_runs_applies_emphasis() {
        let mut paragraph = Paragraph::default();
        write_runs(&mut paragraph, "a **bold** end");

        assert_eq!(paragraph.runs.len(), 3);
        assert!(paragraph.runs[1].bold);
        assert_eq!(paragraph.text(), "a bold end");
    }

    #[test]
    fn test_key_message_skipped_when_empty() {
        let (mut doc, i) = body_slide();
        let spec: SlideSpec = serde_json::from_value(serde_json::json!({
            "heading": "H",
            "bullet_points": ["a"],
            "key_message": ""
        }))
        .unwrap();

        let before = doc.slides[i].shapes.len();
        add_key_message(&mut doc.slides[i], &spec, 13.333, 7.5);
        assert_eq!(doc.slides[i].shapes.len(), before);
    }

    #[test]
    fn test_key_message_adds_rounded_rectangle() {
        let (mut doc, i) = body_slide();
        let spec: SlideSpec = serde_json::from_value(serde_json::json!({
            "heading": "H",
            "bullet_points": ["a"],
            "key_message": "Remember *this*"
        }))
        .unwrap();

        add_key_message(&mut doc.slides[i], &spec, 13.333, 7.5);
        let shape = doc.slides[i].shapes.last().unwrap();
        assert!(matches!(
            shape.content,
            ShapeContent::AutoShape {
                shape_type: AutoShapeType::RoundedRectangle,
                ..
            }
        ));
        assert_eq!(shape.frame().unwrap().text(), "Remember this");
    }

    #[test]
    fn test_footer_run_is_small_and_linked() {
        let (mut doc, i) = body_slide();
        add_footer(&mut doc.slides[i], 13.333, 7.5, "credit", Some("https://x"));

        let shape = doc.slides[i].shapes.last().unwrap();
        let run = &shape.frame().unwrap().paragraphs[0].runs[0];
        assert_eq!(run.text, "credit");
        assert_eq!(run.size_pt, Some(FOOTER_FONT_PT));
        assert_eq!(run.hyperlink.as_deref(), Some("https://x"));
        assert_eq!(run.underline, Some(false));
    }
}
