//! Still and animated image decoding.
//!
//! GIF, APNG and animated WebP yield one frame per animation frame, fully
//! composited onto the canvas. Every other format the `image` crate knows
//! yields a single frame. Alpha is dropped; transparent pixels keep
//! whatever color they carry.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, DynamicImage, Frame, ImageFormat, ImageReader, RgbImage};

/// Errors from the still/animated decode attempt.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unrecognized image format: {path}")]
    UnknownFormat { path: PathBuf },

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image contains no frames")]
    NoFrames,
}

/// One decoded frame and its timing metadata, if the format carries any.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub image: RgbImage,
    pub delay: Option<Duration>,
}

/// All frames of a decoded file, in source order. Never empty.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    frames: Vec<DecodedFrame>,
}

impl DecodedImage {
    /// Wrap decoded frames, rejecting an empty list.
    pub fn new(frames: Vec<DecodedFrame>) -> Result<Self, DecodeError> {
        if frames.is_empty() {
            return Err(DecodeError::NoFrames);
        }
        Ok(Self { frames })
    }

    /// A single still frame without timing.
    pub fn still(image: RgbImage) -> Self {
        Self {
            frames: vec![DecodedFrame { image, delay: None }],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[DecodedFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<DecodedFrame> {
        self.frames
    }
}

/// Decode `path` as a still or multi-frame image.
pub fn try_decode_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    let io_err = |source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    let format = reader.format().ok_or_else(|| DecodeError::UnknownFormat {
        path: path.to_path_buf(),
    })?;

    let open = || File::open(path).map(BufReader::new).map_err(io_err);

    let decoded = match format {
        ImageFormat::Gif => animation(GifDecoder::new(open()?)?)?,
        ImageFormat::Png => {
            let decoder = PngDecoder::new(open()?)?;
            if decoder.is_apng()? {
                animation(decoder.apng()?)?
            } else {
                DecodedImage::still(DynamicImage::from_decoder(decoder)?.into_rgb8())
            }
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(open()?)?;
            if decoder.has_animation() {
                animation(decoder)?
            } else {
                DecodedImage::still(DynamicImage::from_decoder(decoder)?.into_rgb8())
            }
        }
        _ => DecodedImage::still(reader.decode()?.into_rgb8()),
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        frames = decoded.len(),
        "decoded image"
    );
    Ok(decoded)
}

fn animation<'a, D: AnimationDecoder<'a>>(decoder: D) -> Result<DecodedImage, DecodeError> {
    let frames = decoder
        .into_frames()
        .map(|frame| frame.map(decoded_frame))
        .collect::<Result<Vec<_>, _>>()?;
    DecodedImage::new(frames)
}

fn decoded_frame(frame: Frame) -> DecodedFrame {
    let (numer, denom) = frame.delay().numer_denom_ms();
    let millis = if denom > 0 { numer / denom } else { 0 };
    // A zero delay means the file carries no usable timing
    let delay = (millis > 0).then(|| Duration::from_millis(millis as u64));

    DecodedFrame {
        image: DynamicImage::ImageRgba8(frame.into_buffer()).into_rgb8(),
        delay,
    }
}
