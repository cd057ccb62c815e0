//! XML serialization of single colors.
//!
//! A color is stored as one model element inside a `<Color>` wrapper, with
//! every color channel normalized to `[0, 1]` and an optional profile name:
//!
//! ```xml
//! <Color><YCbCr Y="0.5" Cb="0.5" Cr="0.5" space="sRGB"/></Color>
//! <Color><Gray g="0.25" space="Gray-D50"/></Color>
//! ```
//!
//! Alpha is not serialized. Parsed colors come back fully opaque.
//!
//! # Example
//!
//! ```rust
//! use pxl_color::xml;
//! use pxl_core::ColorSpace;
//!
//! let cs = ColorSpace::gray_u8();
//! let text = xml::write_color(&cs, &[51, 10], Some("Gray-D50")).unwrap();
//! let parsed = xml::read_color(&cs, &text).unwrap();
//! assert_eq!(parsed.pixel, vec![51, 255]);
//! assert_eq!(parsed.space.as_deref(), Some("Gray-D50"));
//! ```

use crate::error::{ColorError, ColorResult};
use pxl_core::pixel::write_normalized;
use pxl_core::{ColorModel, ColorSpace, PixelFormatRegistry};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Attribute names of the color channels, in model order.
fn channel_attributes(model: ColorModel) -> &'static [&'static str] {
    match model {
        ColorModel::YCbCr => &["Y", "Cb", "Cr"],
        ColorModel::Gray => &["g"],
    }
}

/// A color read back from XML.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedColor {
    /// Pixel bytes in the target format, alpha opaque.
    pub pixel: Vec<u8>,
    /// Profile name from the `space` attribute.
    pub space: Option<String>,
}

/// Serializes the color channels of `pixel`.
pub fn write_color(cs: &ColorSpace, pixel: &[u8], space: Option<&str>) -> ColorResult<String> {
    let model = cs.color_model();
    let values = cs.normalised_channel_values(pixel);
    let color_values = cs
        .channels()
        .iter()
        .zip(values)
        .filter(|(c, _)| !c.is_alpha())
        .map(|(_, v)| v.to_string());

    let mut elem = BytesStart::new(model.name());
    let texts: Vec<String> = color_values.collect();
    for (name, text) in channel_attributes(model).iter().zip(texts.iter()) {
        elem.push_attribute((*name, text.as_str()));
    }
    if let Some(space) = space {
        elem.push_attribute(("space", space));
    }

    let mut xml = Writer::new(Vec::new());
    for event in [
        Event::Start(BytesStart::new("Color")),
        Event::Empty(elem),
        Event::End(BytesEnd::new("Color")),
    ] {
        xml.write_event(event)
            .map_err(|e| ColorError::WriteError(e.to_string()))?;
    }

    String::from_utf8(xml.into_inner())
        .map_err(|e| ColorError::WriteError(format!("invalid UTF-8: {}", e)))
}

/// Parses a serialized color into a pixel of `cs`.
///
/// The first element inside the `<Color>` wrapper must be the model
/// element of the format's color model; anything else is rejected with
/// [`ColorError::UnsupportedModel`].
pub fn read_color(cs: &ColorSpace, text: &str) -> ColorResult<ParsedColor> {
    let model = cs.color_model();
    let mut xml = Reader::from_str(text);
    xml.config_mut().trim_text(true);

    loop {
        match xml.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "Color" => {}
                    "YCbCr" | "Gray" if name != model.name() => {
                        return Err(ColorError::UnsupportedModel {
                            found: name.clone(),
                            expected: model.name().to_string(),
                        });
                    }
                    "YCbCr" | "Gray" => {
                        let attrs = channel_attributes(model);
                        let mut values: Vec<Option<f32>> = vec![None; attrs.len()];
                        let mut space = None;
                        for attr in e.attributes().flatten() {
                            let key = attr.key.as_ref();
                            let value = attr
                                .decode_and_unescape_value(xml.decoder())
                                .map_err(|e| ColorError::ParseError(format!("attribute value: {}", e)))?;
                            if key == b"space" {
                                space = Some(value.into_owned());
                            } else if let Some(i) = attrs.iter().position(|a| a.as_bytes() == key) {
                                let v = value.trim().parse::<f32>().map_err(|_| {
                                    ColorError::ParseError(format!("invalid value '{}' for {}", value, attrs[i]))
                                })?;
                                values[i] = Some(v);
                            }
                        }
                        return Ok(ParsedColor {
                            pixel: build_pixel(cs, attrs, &values)?,
                            space,
                        });
                    }
                    other => {
                        return Err(ColorError::UnsupportedModel {
                            found: other.to_string(),
                            expected: model.name().to_string(),
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ColorError::ParseError(format!("XML error: {}", e))),
            _ => {}
        }
    }

    Err(ColorError::ParseError(format!("missing {} element", model.name())))
}

/// Looks up `id` in `registry` and parses `text` into a pixel of it.
pub fn read_color_as(registry: &PixelFormatRegistry, id: &str, text: &str) -> ColorResult<ParsedColor> {
    let cs = registry.require(id)?;
    read_color(&cs, text)
}

fn build_pixel(cs: &ColorSpace, attrs: &[&str], values: &[Option<f32>]) -> ColorResult<Vec<u8>> {
    let mut pixel = vec![0u8; cs.pixel_size()];
    for ((c, value), name) in cs.color_channels().zip(values).zip(attrs) {
        let v = value.ok_or_else(|| ColorError::MissingAttribute((*name).to_string()))?;
        write_normalized(cs.channel_type(), v, &mut pixel[c.byte_range()]);
    }
    cs.set_opacity_u8(&mut pixel, u8::MAX, 1);
    Ok(pixel)
}
