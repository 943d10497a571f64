use super::model::State;
use super::photo::Photo;
use super::{HINT_FONT_SIZE, LABEL_FONT_SIZE, PERSPECTIVE, REFERENCE_HEIGHT, SHADOW_OFFSET};
use crate::config::CardConfig;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use stackring::AxisOffset;
use std::time::Instant;

/// Where a card lands on screen, after perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub border: f64,
    pub angle: f64,
    pub scale: f64,
}

impl CardGeometry {
    pub fn compute(
        photo: &Photo,
        offset: AxisOffset,
        card: &CardConfig,
        (cx, cy): (f64, f64),
        ui_scale: f64,
    ) -> Self {
        // depth is never positive, so cards only shrink as they recede
        let perspective = PERSPECTIVE / (PERSPECTIVE - offset.depth.min(0.0));
        let scale = ui_scale * perspective;
        Self {
            x: cx + photo.scatter.x * scale,
            y: cy + offset.vertical * scale,
            width: card.width * scale,
            height: card.height * scale,
            border: card.border * scale,
            angle: photo.scatter.degrees.to_radians(),
            scale,
        }
    }
}

struct CardRenderer<'a> {
    photo: &'a Photo,
    geometry: CardGeometry,
}

impl<'a> CardRenderer<'a> {
    fn new(photo: &'a Photo, geometry: CardGeometry) -> Self {
        Self { photo, geometry }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let g = &self.geometry;
        cr.save()?;
        cr.translate(g.x, g.y);
        cr.rotate(g.angle);

        self.draw_shadow(cr, colors)?;
        fill_rect(cr, colors.card, g.width, g.height)?;
        match &self.photo.pixbuf {
            Some(pixbuf) => self.draw_image(cr, pixbuf)?,
            None => self.draw_placeholder(cr, colors)?,
        }

        cr.restore()
    }

    fn draw_shadow(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let shift = SHADOW_OFFSET * self.geometry.scale;
        cr.save()?;
        cr.translate(shift, shift);
        fill_rect(cr, colors.shadow, self.geometry.width, self.geometry.height)?;
        cr.restore()
    }

    fn inner_size(&self) -> (f64, f64) {
        let g = &self.geometry;
        (
            (g.width - 2.0 * g.border).max(0.0),
            (g.height - 2.0 * g.border).max(0.0),
        )
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let (iw, ih) = self.inner_size();
        let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
        if iw == 0.0 || ih == 0.0 || pw == 0.0 || ph == 0.0 {
            return Ok(());
        }

        // cover the inner area, cropping the overflow
        let fit = (iw / pw).max(ih / ph);

        cr.save()?;
        cr.rectangle(-iw / 2.0, -ih / 2.0, iw, ih);
        cr.clip();
        cr.scale(fit, fit);
        cr.set_source_pixbuf(pixbuf, -pw / 2.0, -ph / 2.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_placeholder(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (iw, ih) = self.inner_size();
        fill_rect(cr, colors.placeholder, iw, ih)?;
        let font_size = LABEL_FONT_SIZE * self.geometry.scale;
        draw_centered_text(cr, self.photo.name.as_str(), font_size, colors.text)
    }
}

fn fill_rect(cr: &Context, color: Srgba<f64>, width: f64, height: f64) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.rectangle(-width / 2.0, -height / 2.0, width, height);
    cr.fill()
}

fn draw_centered_text(
    cr: &Context,
    text: &str,
    font_size: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(font_size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            -ext.width() / 2.0 - ext.x_bearing(),
            -ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)?;
    }
    Ok(())
}

pub fn draw(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let ui_scale = height / REFERENCE_HEIGHT;
    let center = (width / 2.0, height / 2.0);

    let Some(deck) = &state.deck else {
        cr.save()?;
        cr.translate(center.0, center.1);
        draw_centered_text(
            cr,
            "No photos to show",
            HINT_FONT_SIZE * ui_scale.max(0.5),
            colors.text,
        )?;
        return cr.restore();
    };

    let now = Instant::now();
    for &id in deck.paint_order() {
        let Some(photo) = state.photo(id) else {
            continue;
        };
        let geometry = CardGeometry::compute(
            photo,
            deck.offset_of(id, now),
            &state.card,
            center,
            ui_scale,
        );
        CardRenderer::new(photo, geometry).draw(cr, colors)?;
    }
    Ok(())
}
