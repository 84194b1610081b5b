//! Image decoding and JPEG/base64 encoding for vision requests.
//!
//! JPEG has no alpha channel or palette, so anything other than plain
//! 8-bit RGB or grayscale is flattened to RGB8 before encoding.

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::error::EncodeError;

/// JPEG quality used for re-encoding uploads.
pub const JPEG_QUALITY: u8 = 75;

/// Extensions accepted for uploaded market maps.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Base64-encoded JPEG ready to embed in a JSON request.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded JPEG bytes
    pub data: String,
}

impl ImageInput {
    /// Re-encode a decoded image as JPEG and wrap it.
    pub fn from_image(image: &DynamicImage) -> Result<Self, EncodeError> {
        Ok(Self {
            data: encode_jpeg_base64(image)?,
        })
    }

    /// Data URL for OpenAI-style `image_url` content parts.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.data)
    }
}

/// Reject uploads whose extension isn't one we accept.
pub fn check_extension(path: &Path) -> Result<(), EncodeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(EncodeError::UnsupportedExtension(ext))
    }
}

/// Decode image bytes, detecting the format from content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, EncodeError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EncodeError::Decode(format!("Cannot detect image format: {e}")))?
        .decode()
        .map_err(|e| EncodeError::Decode(e.to_string()))
}

/// Encode an image as JPEG and return the base64 text.
pub fn encode_jpeg_base64(image: &DynamicImage) -> Result<String, EncodeError> {
    let bytes = encode_jpeg(image)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);

    let result = match image.color() {
        ColorType::Rgb8 | ColorType::L8 => image.write_with_encoder(encoder),
        other => {
            tracing::debug!("Flattening {other:?} image to RGB8 for JPEG");
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)
        }
    };
    result.map_err(|e| EncodeError::Jpeg(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, ImageFormat, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    fn decode_base64(data: &str) -> Vec<u8> {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .unwrap()
    }

    #[test]
    fn rgba_image_encodes_as_jpeg_without_alpha() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 128]));
        let encoded = encode_jpeg_base64(&DynamicImage::ImageRgba8(img)).unwrap();

        let bytes = decode_base64(&encoded);
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn gray_alpha_image_is_flattened() {
        let img = GrayAlphaImage::from_pixel(4, 4, LumaA([90, 0]));
        let encoded = encode_jpeg_base64(&DynamicImage::ImageLumaA8(img)).unwrap();

        let decoded = image::load_from_memory(&decode_base64(&encoded)).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn png_with_alpha_round_trips_through_decoder() {
        let img = RgbaImage::from_pixel(6, 3, Rgba([255, 0, 0, 0]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&png).unwrap();
        assert!(decoded.color().has_alpha());
        let input = ImageInput::from_image(&decoded).unwrap();
        let jpeg = image::load_from_memory(&decode_base64(&input.data)).unwrap();
        assert!(!jpeg.color().has_alpha());
    }

    /// 2x2 indexed PNG whose first palette entry is fully transparent.
    fn indexed_png_with_transparency() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, 2, 2);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![255u8, 0, 0, 0, 0, 255]);
            encoder.set_trns(vec![0u8, 255]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 1, 1, 0]).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn palette_png_with_transparency_is_flattened() {
        let png = indexed_png_with_transparency();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);

        let decoded = decode_image(&png).unwrap();
        assert!(decoded.color().has_alpha());

        let bytes = decode_base64(&encode_jpeg_base64(&decoded).unwrap());
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let jpeg = image::load_from_memory(&bytes).unwrap();
        assert!(!jpeg.color().has_alpha());
        assert_eq!(jpeg.color(), ColorType::Rgb8);
        assert_eq!((jpeg.width(), jpeg.height()), (2, 2));
    }

    #[test]
    fn encoding_is_deterministic() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 5, Rgb([1, 2, 3])));
        assert_eq!(
            encode_jpeg_base64(&img).unwrap(),
            encode_jpeg_base64(&img).unwrap()
        );
    }

    #[test]
    fn data_url_has_jpeg_prefix() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let input = ImageInput::from_image(&img).unwrap();
        let url = input.data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.ends_with(&input.data));
    }

    #[test]
    fn corrupt_bytes_fail_to_decode() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, EncodeError::Decode(_)));
    }

    #[test]
    fn extension_check() {
        assert!(check_extension(Path::new("map.PNG")).is_ok());
        assert!(check_extension(Path::new("map.jpeg")).is_ok());
        assert!(check_extension(Path::new("map.jpg")).is_ok());
        assert!(matches!(
            check_extension(Path::new("map.gif")),
            Err(EncodeError::UnsupportedExtension(ext)) if ext == "gif"
        ));
        assert!(check_extension(Path::new("map")).is_err());
    }
}
