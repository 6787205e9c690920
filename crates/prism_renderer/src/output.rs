//! Writing and reading rendered images.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use prism_math::DrawingColor;

use crate::{ImageBuffer, RenderError, RenderResult};

/// PPM flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpmFormat {
    /// `P3`, whitespace separated decimal samples
    Ascii,
    /// `P6`, raw bytes
    Binary,
}

/// Write `image` as PPM. Channels are saturated to 0..=255.
pub fn write_ppm<W: Write>(image: &ImageBuffer, format: PpmFormat, writer: W) -> RenderResult<()> {
    let mut writer = BufWriter::new(writer);
    let magic = match format {
        PpmFormat::Ascii => "P3",
        PpmFormat::Binary => "P6",
    };
    writeln!(writer, "{magic}")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    match format {
        PpmFormat::Ascii => {
            for color in &image.pixels {
                let [r, g, b] = color.to_rgb8();
                writeln!(writer, "{r} {g} {b}")?;
            }
        }
        PpmFormat::Binary => writer.write_all(&image.to_rgb8())?,
    }

    writer.flush()?;
    Ok(())
}

/// Read a `P3` or `P6` PPM with a maximum sample value of 255.
pub fn read_ppm<R: Read>(reader: R) -> RenderResult<ImageBuffer> {
    let mut data = Vec::new();
    BufReader::new(reader).read_to_end(&mut data)?;

    let mut pos = 0;
    let magic = next_token(&data, &mut pos)?;
    let format = match magic.as_str() {
        "P3" => PpmFormat::Ascii,
        "P6" => PpmFormat::Binary,
        other => return Err(RenderError::Ppm(format!("unsupported magic {other:?}"))),
    };
    let width = parse_number(&next_token(&data, &mut pos)?)?;
    let height = parse_number(&next_token(&data, &mut pos)?)?;
    let max = parse_number(&next_token(&data, &mut pos)?)?;
    if max != 255 {
        return Err(RenderError::Ppm(format!("unsupported max value {max}")));
    }

    // allocate only once the body is known to hold the whole raster
    let samples = (width as usize)
        .checked_mul(height as usize)
        .and_then(|count| count.checked_mul(3))
        .ok_or_else(|| RenderError::Ppm(format!("image size {width}x{height} is too large")))?;

    let image = match format {
        PpmFormat::Binary => {
            // exactly one whitespace byte follows the header
            let body = data.get(pos + 1..).unwrap_or_default();
            if body.len() < samples {
                return Err(RenderError::Ppm(format!(
                    "expected {samples} bytes of pixel data, found {}",
                    body.len()
                )));
            }

            let mut image = ImageBuffer::new(width, height);
            for (pixel, rgb) in image.pixels.iter_mut().zip(body.chunks_exact(3)) {
                *pixel = DrawingColor::new(rgb[0] as i32, rgb[1] as i32, rgb[2] as i32);
            }
            image
        }
        PpmFormat::Ascii => {
            let available = data[pos..]
                .split(|b| b.is_ascii_whitespace())
                .filter(|token| !token.is_empty())
                .count();
            if available < samples {
                return Err(RenderError::Ppm(format!(
                    "expected {samples} samples of pixel data, found {available}"
                )));
            }

            let mut image = ImageBuffer::new(width, height);
            for pixel in image.pixels.iter_mut() {
                let r = parse_number(&next_token(&data, &mut pos)?)?;
                let g = parse_number(&next_token(&data, &mut pos)?)?;
                let b = parse_number(&next_token(&data, &mut pos)?)?;
                *pixel = DrawingColor::new(r as i32, g as i32, b as i32);
            }
            image
        }
    };

    Ok(image)
}

/// Next whitespace separated header token, skipping `#` comments.
fn next_token(data: &[u8], pos: &mut usize) -> RenderResult<String> {
    loop {
        while *pos < data.len() && data[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < data.len() && data[*pos] == b'#' {
            while *pos < data.len() && data[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }

    let start = *pos;
    while *pos < data.len() && !data[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    if start == *pos {
        return Err(RenderError::Ppm("unexpected end of data".into()));
    }
    Ok(String::from_utf8_lossy(&data[start..*pos]).into_owned())
}

fn parse_number(token: &str) -> RenderResult<u32> {
    token
        .parse()
        .map_err(|_| RenderError::Ppm(format!("invalid number {token:?}")))
}

/// Save `image` as PNG.
pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .ok_or_else(|| RenderError::InvalidConfig("pixel buffer does not match image size".into()))?;
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save `image`, choosing the format from the file extension
/// (`.ppm` for binary PPM, anything else as PNG).
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        write_ppm(image, PpmFormat::Binary, File::create(path)?)?;
    } else {
        save_png(image, path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
