//! Mask generation regression test
//!
//! Value and band masks on gray ramps; band and discriminant masks on
//! RGB images.

use grayquant_core::{Pix, PixColormap, PixMut, PixelDepth, color};
use grayquant_test::{RegParams, images};
use grayquant_threshold::{
    DistanceKind, generate_mask_by_band, generate_mask_by_band_32, generate_mask_by_discr_32,
    generate_mask_by_value,
};

fn count(pix: &Pix) -> u32 {
    let mut n = 0;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            n += pix.get_pixel_unchecked(x, y);
        }
    }
    n
}

#[test]
fn mask_gray_reg() {
    let mut rp = RegParams::new("mask_gray");
    let ramp = images::horizontal_ramp(256, 4).expect("ramp");

    // --- Band [10, 20] on a ramp ---
    eprintln!("=== Band ===");
    let mask = generate_mask_by_band(&ramp, 10, 20, true, false).expect("band");
    rp.compare_values(1.0, mask.depth().bits() as f64, 0.0);
    let mut wrong = 0;
    for x in 0..256 {
        let expected = u32::from((10..=20).contains(&x));
        if mask.get_pixel_unchecked(x, 3) != expected {
            wrong += 1;
        }
    }
    rp.compare_values(0.0, wrong as f64, 0.0);
    rp.compare_values(44.0, count(&mask) as f64, 0.0);

    // Outside the band is the complement
    let outside = generate_mask_by_band(&ramp, 10, 20, false, false).expect("out of band");
    rp.compare_values((4 * 256 - 44) as f64, count(&outside) as f64, 0.0);

    // --- Value ---
    let mask = generate_mask_by_value(&ramp, 200, false).expect("value");
    rp.compare_values(4.0, count(&mask) as f64, 0.0);
    rp.compare_values(1.0, mask.get_pixel_unchecked(200, 0) as f64, 0.0);

    // --- Colormapped source: indices versus gray values ---
    eprintln!("=== Colormapped ===");
    let cmap = PixColormap::create_linear(4, 16).expect("linear");
    let mapped =
        images::indexed(16, 2, PixelDepth::Bit4, cmap, |x, _| x).expect("indexed 4 bpp");
    let by_index = generate_mask_by_band(&mapped, 2, 4, true, true).expect("index band");
    rp.compare_values(6.0, count(&by_index) as f64, 0.0);
    // Linear gray levels are 17 * index
    let by_gray = generate_mask_by_band(&mapped, 34, 68, true, false).expect("gray band");
    rp.compare_pix(&by_index, &by_gray);
    let by_value = generate_mask_by_value(&mapped, 255, false).expect("gray value");
    rp.compare_values(2.0, count(&by_value) as f64, 0.0);
    rp.compare_values(
        1.0,
        generate_mask_by_value(&mapped, 16, true).is_err() as u8 as f64,
        0.0,
    );

    // --- Invalid arguments ---
    rp.compare_values(
        1.0,
        generate_mask_by_band(&ramp, 30, 20, true, false).is_err() as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        generate_mask_by_band(&ramp, 0, 256, true, false).is_err() as u8 as f64,
        0.0,
    );
    let pix2 = Pix::new(4, 4, PixelDepth::Bit2).expect("2 bpp");
    rp.compare_values(
        1.0,
        generate_mask_by_value(&pix2, 1, false).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "mask_gray regression test failed");
}

#[test]
fn mask_rgb_reg() {
    let mut rp = RegParams::new("mask_rgb");

    // --- Discriminant: (100, 100, 100) is closer to black ---
    eprintln!("=== Discriminant ===");
    let pix = images::uniform_rgb(3, 3, 100, 100, 100).expect("rgb");
    let black = color::compose_rgb(0, 0, 0);
    let white = color::compose_rgb(255, 255, 255);
    for kind in [DistanceKind::Manhattan, DistanceKind::Euclidean] {
        let mask = generate_mask_by_discr_32(&pix, black, white, kind).expect("discr");
        rp.compare_values(9.0, count(&mask) as f64, 0.0);
        let swapped = generate_mask_by_discr_32(&pix, white, black, kind).expect("discr");
        rp.compare_values(0.0, count(&swapped) as f64, 0.0);
    }

    // The metrics disagree: (0, 0, 120) vs refs (60, 60, 60) and (0, 0, 0)
    let mut pm = PixMut::new(1, 1, PixelDepth::Bit32).expect("pix");
    pm.set_rgb(0, 0, 0, 0, 120).expect("set");
    let pix: Pix = pm.into();
    let near = color::compose_rgb(60, 60, 60);
    let manhattan =
        generate_mask_by_discr_32(&pix, near, black, DistanceKind::Manhattan).expect("l1");
    let euclidean =
        generate_mask_by_discr_32(&pix, near, black, DistanceKind::Euclidean).expect("l2");
    // L1: 180 vs 120; L2: 10800 vs 14400
    rp.compare_values(0.0, count(&manhattan) as f64, 0.0);
    rp.compare_values(1.0, count(&euclidean) as f64, 0.0);

    // --- Band around a reference color on noise ---
    eprintln!("=== Band32 ===");
    let noise = images::rgb_noise(40, 30, 7).expect("rgb noise");
    let refval = color::compose_rgb(128, 128, 128);
    let mask = generate_mask_by_band_32(&noise, refval, 40, 20).expect("band32");
    let mut wrong = 0;
    for y in 0..30 {
        for x in 0..40 {
            let (r, g, b) = noise.get_rgb(x, y).expect("rgb");
            let inside = [r, g, b].iter().all(|&c| (88..=148).contains(&c));
            if mask.get_pixel_unchecked(x, y) != u32::from(inside) {
                wrong += 1;
            }
        }
    }
    eprintln!("  {} pixels in band", count(&mask));
    rp.compare_values(0.0, wrong as f64, 0.0);

    // Full-range band selects everything
    let all = generate_mask_by_band_32(&noise, refval, 255, 255).expect("band32 all");
    rp.compare_values(1200.0, count(&all) as f64, 0.0);

    // Band limits far beyond the component range
    let light = images::uniform_rgb(2, 2, 200, 200, 200).expect("light");
    let mid = color::compose_rgb(100, 100, 100);
    let up = generate_mask_by_band_32(&light, mid, 0, i32::MAX).expect("wide upper");
    rp.compare_values(4.0, count(&up) as f64, 0.0);
    let down = generate_mask_by_band_32(&light, white, i32::MAX, 0).expect("wide lower");
    rp.compare_values(4.0, count(&down) as f64, 0.0);
    let both =
        generate_mask_by_band_32(&noise, refval, i32::MAX, i32::MAX).expect("wide both");
    rp.compare_values(1200.0, count(&both) as f64, 0.0);
    let above_only = generate_mask_by_band_32(&light, white, 0, i32::MAX).expect("above ref only");
    rp.compare_values(0.0, count(&above_only) as f64, 0.0);

    // --- Invalid input ---
    let gray = images::uniform_gray(4, 4, 9).expect("gray");
    rp.compare_values(
        1.0,
        generate_mask_by_band_32(&gray, refval, 1, 1).is_err() as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        generate_mask_by_band_32(&noise, refval, 1, -1).is_err() as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        generate_mask_by_discr_32(&gray, black, white, DistanceKind::default()).is_err() as u8
            as f64,
        0.0,
    );

    assert!(rp.cleanup(), "mask_rgb regression test failed");
}
