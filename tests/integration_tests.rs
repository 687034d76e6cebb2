//! Integration tests for lsbhide
//!
//! Exercise the byte-level facade the way a front end would: encoded file
//! bytes in, encoded file bytes out.
//!
//! Note: a wrong password and an empty carrier are indistinguishable, both
//! decode to `None`.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use image::{DynamicImage, ImageBuffer, ImageFormat, LumaA, Rgb, Rgba};
use lsbhide::stego::{self, ImageCarrier};
use lsbhide::{check_capacity, decode_carrier, encode_carrier, BitCarrier, Carrier, StegoError};

fn encode_image(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

fn rgb_png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 17) % 256) as u8,
            ((y * 23) % 256) as u8,
            (((x + y) * 31) % 256) as u8,
        ])
    });
    encode_image(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// 100x100 grey+alpha PNG: 10,000 usable bits once alpha is reserved.
fn grey_alpha_png() -> Vec<u8> {
    let img = ImageBuffer::from_fn(100, 100, |x, y| {
        LumaA([((x * 7 + y * 13) % 256) as u8, 200])
    });
    encode_image(DynamicImage::ImageLumaA8(img), ImageFormat::Png)
}

fn wav(sample_count: usize, bits_per_sample: u16, channels: u16) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate: 22050,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };
    let amplitude = ((1i64 << (bits_per_sample - 1)) - 1) as f64 * 0.3;

    let mut bytes = Vec::new();
    {
        let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..sample_count {
            let t = i as f64 / 22050.0;
            let sample = (f64::sin(2.0 * std::f64::consts::PI * 330.0 * t) * amplitude) as i32;
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    bytes
}

/// Test basic encode/decode roundtrip through PNG bytes
#[test]
fn test_png_roundtrip() {
    let carrier = rgb_png(64, 64);

    let encoded = encode_carrier(&carrier, "Hello, steganography!", None).unwrap();
    let decoded = decode_carrier(&encoded, None).unwrap();

    assert_eq!(decoded.as_deref(), Some("Hello, steganography!"));
}

/// Test the "hello" / "secret" scenario
#[test]
fn test_password_scenario() {
    let carrier = rgb_png(64, 64);
    let encoded = encode_carrier(&carrier, "hello", Some("secret")).unwrap();

    assert_eq!(
        decode_carrier(&encoded, Some("secret")).unwrap().as_deref(),
        Some("hello")
    );
    assert_eq!(decode_carrier(&encoded, Some("wrong")).unwrap(), None);
    assert_eq!(decode_carrier(&encoded, None).unwrap(), None);
}

/// Test wrong passwords across several carriers never leak content
#[test]
fn test_wrong_passwords_return_none() {
    let carrier = rgb_png(80, 80);
    let encoded = encode_carrier(&carrier, "the eagle lands at dawn", Some("P")).unwrap();

    for wrong in ["p", "P ", "PP", "secret", "0", "correct horse"] {
        assert_eq!(decode_carrier(&encoded, Some(wrong)).unwrap(), None, "{}", wrong);
    }
}

/// Test the 100x100 capacity boundary
#[test]
fn test_capacity_boundary() {
    let carrier = grey_alpha_png();

    let report = check_capacity(&carrier, "", false).unwrap();
    assert_eq!(report.max_capacity, (10_000 - 41) / 8);

    let exact = "x".repeat(report.max_capacity);
    let encoded = encode_carrier(&carrier, &exact, None).unwrap();
    assert_eq!(decode_carrier(&encoded, None).unwrap(), Some(exact.clone()));

    let over = "x".repeat(report.max_capacity + 1);
    assert!(matches!(
        encode_carrier(&carrier, &over, None),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

/// Test that a failed encode leaves the carrier unchanged
#[test]
fn test_failed_encode_does_not_mutate() {
    let mut carrier = Carrier::from_bytes(&rgb_png(12, 12)).unwrap();
    let before = carrier.to_bytes().unwrap();

    let too_big = vec![b'z'; 10_000];
    assert!(stego::encode(&mut carrier, &too_big, Some("pw")).is_err());

    assert_eq!(carrier.to_bytes().unwrap(), before);
}

/// Test the capacity check is idempotent and ignores the password
#[test]
fn test_check_capacity_idempotent() {
    let carrier = rgb_png(30, 30);
    let a = check_capacity(&carrier, "some message", true).unwrap();
    let b = check_capacity(&carrier, "some message", true).unwrap();
    let c = check_capacity(&carrier, "some message", false).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.max_capacity, c.max_capacity);
    assert_eq!(a.message_size, 12);
    assert!(a.can_encode);
}

/// Test capacity grows with carrier size and not with message content
#[test]
fn test_capacity_monotonic() {
    let mut last = 0;
    for side in [1u32, 4, 8, 16, 32] {
        let carrier = rgb_png(side, side);
        let short = check_capacity(&carrier, "a", false).unwrap();
        let long = check_capacity(&carrier, &"b".repeat(500), false).unwrap();

        assert_eq!(short.max_capacity, long.max_capacity);
        assert!(short.max_capacity >= last);
        last = short.max_capacity;
    }
}

/// Test the output keeps format and dimensions
#[test]
fn test_output_keeps_format_and_size() {
    let carrier = rgb_png(33, 21);
    let encoded = encode_carrier(&carrier, "shape check", Some("k")).unwrap();

    assert_eq!(image::guess_format(&encoded).unwrap(), ImageFormat::Png);
    let decoded = image::load_from_memory(&encoded).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (33, 21));
    assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
}

/// Test alpha is preserved byte-for-byte
#[test]
fn test_alpha_preserved() {
    let img = ImageBuffer::from_fn(20, 20, |x, y| {
        Rgba([x as u8, y as u8, (x ^ y) as u8, ((x * 13 + y) % 256) as u8])
    });
    let carrier = encode_image(DynamicImage::ImageRgba8(img.clone()), ImageFormat::Png);

    let encoded = encode_carrier(&carrier, "alpha stays put", Some("a")).unwrap();
    let out = image::load_from_memory(&encoded).unwrap().to_rgba8();

    for (before, after) in img.pixels().zip(out.pixels()) {
        assert_eq!(before.0[3], after.0[3]);
        for ch in 0..3 {
            assert!((before.0[ch] as i16 - after.0[ch] as i16).abs() <= 1);
        }
    }
}

/// Test BMP carriers round-trip as BMP
#[test]
fn test_bmp_roundtrip() {
    let img = ImageBuffer::from_fn(40, 40, |x, y| Rgb([x as u8, y as u8, 99]));
    let carrier = encode_image(DynamicImage::ImageRgb8(img), ImageFormat::Bmp);

    let encoded = encode_carrier(&carrier, "bitmap", Some("bmp")).unwrap();
    assert_eq!(image::guess_format(&encoded).unwrap(), ImageFormat::Bmp);
    assert_eq!(
        decode_carrier(&encoded, Some("bmp")).unwrap().as_deref(),
        Some("bitmap")
    );
}

/// Test WAV carriers at several bit depths and channel counts
#[test]
fn test_wav_roundtrip() {
    for (bits, channels) in [(8u16, 1u16), (16, 2), (24, 1), (32, 2)] {
        let carrier = wav(8000, bits, channels);
        let message = format!("{} bit, {} channel audio", bits, channels);

        for password in [None, Some("tone")] {
            let encoded = encode_carrier(&carrier, &message, password).unwrap();
            assert_eq!(encoded.len(), carrier.len());
            assert_eq!(
                decode_carrier(&encoded, password).unwrap(),
                Some(message.clone())
            );
        }
    }
}

/// Test WAV output keeps the format header and sample count
#[test]
fn test_wav_spec_preserved() {
    let carrier = wav(5000, 16, 2);
    let encoded = encode_carrier(&carrier, "stereo", None).unwrap();

    let before = hound::WavReader::new(Cursor::new(&carrier)).unwrap();
    let after = hound::WavReader::new(Cursor::new(&encoded)).unwrap();
    assert_eq!(before.spec(), after.spec());
    assert_eq!(before.len(), after.len());
}

/// Test a clean carrier holds no message
#[test]
fn test_clean_carriers_hold_nothing() {
    assert_eq!(decode_carrier(&rgb_png(50, 50), None).unwrap(), None);
    assert_eq!(decode_carrier(&wav(4000, 16, 1), None).unwrap(), None);
    assert_eq!(decode_carrier(&wav(4000, 16, 1), Some("x")).unwrap(), None);
}

/// Test input validation
#[test]
fn test_validation_errors() {
    let carrier = rgb_png(10, 10);
    assert!(matches!(
        encode_carrier(&carrier, "", None),
        Err(StegoError::EmptyMessage)
    ));

    let empty_audio = wav(0, 16, 1);
    assert!(matches!(
        encode_carrier(&empty_audio, "x", None),
        Err(StegoError::EmptyCarrier)
    ));
}

/// Test lossy or unknown formats are refused
#[test]
fn test_unsupported_formats() {
    let jpeg_header = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x43, 0x00];
    assert!(matches!(
        encode_carrier(&jpeg_header, "x", None),
        Err(StegoError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        decode_carrier(b"plain text is not a carrier", None),
        Err(StegoError::UnsupportedFormat(_))
    ));
}

/// Test 16-bit images are refused rather than reduced to 8 bits
#[test]
fn test_sixteen_bit_png_refused() {
    let img: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::from_fn(16, 16, |x, y| {
        Rgb([(x * 4000) as u16, (y * 4000) as u16, 12345])
    });
    let carrier = encode_image(DynamicImage::ImageRgb16(img), ImageFormat::Png);

    assert!(matches!(
        encode_carrier(&carrier, "hi", None),
        Err(StegoError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        check_capacity(&carrier, "hi", false),
        Err(StegoError::UnsupportedFormat(_))
    ));
}

/// Test unicode messages survive
#[test]
fn test_unicode_message() {
    let carrier = rgb_png(64, 64);
    let message = "Hola, ¿qué tal? 你好 🦀";
    let encoded = encode_carrier(&carrier, message, Some("ü")).unwrap();
    assert_eq!(
        decode_carrier(&encoded, Some("ü")).unwrap().as_deref(),
        Some(message)
    );
}

/// Test independent carriers can be processed in parallel
#[test]
fn test_parallel_requests() {
    let carrier = rgb_png(48, 48);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let carrier = &carrier;
                scope.spawn(move || {
                    let message = format!("message number {}", i);
                    let password = format!("pw{}", i);
                    let encoded = encode_carrier(carrier, &message, Some(password.as_str())).unwrap();
                    (message, decode_carrier(&encoded, Some(password.as_str())).unwrap())
                })
            })
            .collect();

        for handle in handles {
            let (message, decoded) = handle.join().unwrap();
            assert_eq!(decoded, Some(message));
        }
    });
}

/// Test the in-memory codec over the typed carrier
#[test]
fn test_typed_carrier_api() {
    let img = ImageBuffer::from_fn(32, 32, |x, y| Rgb([x as u8, y as u8, 0]));
    let mut carrier = ImageCarrier::from_image(DynamicImage::ImageRgb8(img), ImageFormat::Png).unwrap();
    assert_eq!(carrier.sample_count(), 32 * 32 * 3);

    let summary = stego::encode(&mut carrier, b"typed", None).unwrap();
    assert_eq!(summary.bits_written, stego::frame_bit_len(5));
    assert_eq!(stego::decode_text(&carrier, None).unwrap(), "typed");
}
