//! Pointwise thresholding regression test
//!
//! Fixed, variable, multi-level and arbitrary-bin thresholding on
//! synthetic ramps and noise.

use grayquant_core::{Pix, PixColormap, PixelDepth};
use grayquant_test::{RegParams, images};
use grayquant_threshold::{
    ArbThresholdOptions, parse_edge_values, threshold_gray_arb, threshold_on_8bpp,
    threshold_to_2bpp, threshold_to_4bpp, threshold_to_binary, var_threshold_to_binary,
};

fn row_sum(pix: &Pix, y: u32) -> u32 {
    (0..pix.width()).map(|x| pix.get_pixel_unchecked(x, y)).sum()
}

#[test]
fn threshold_binary_reg() {
    let mut rp = RegParams::new("threshold_binary");

    // --- Alternating black and white rows ---
    eprintln!("=== Fixed threshold ===");
    let pixs = images::alternating_rows(37, 6, 0, 255).expect("rows");
    let pixd = threshold_to_binary(&pixs, 128).expect("threshold");
    rp.compare_values(1.0, pixd.depth().bits() as f64, 0.0);
    for y in 0..6 {
        let expected = if y % 2 == 0 { 37.0 } else { 0.0 };
        rp.compare_values(expected, row_sum(&pixd, y) as f64, 0.0);
    }

    // --- Ramp: bit set exactly below the threshold ---
    let ramp = images::horizontal_ramp(256, 3).expect("ramp");
    for thresh in [0u32, 1, 77, 200, 256] {
        let pixd = threshold_to_binary(&ramp, thresh).expect("threshold ramp");
        rp.compare_values(thresh as f64, row_sum(&pixd, 2) as f64, 0.0);
    }
    rp.compare_values(
        1.0,
        threshold_to_binary(&ramp, 257).is_err() as u8 as f64,
        0.0,
    );

    // --- Variable threshold with a constant map equals fixed ---
    eprintln!("=== Variable threshold ===");
    let noise = images::gray_noise(61, 29, 4242).expect("noise");
    for c in [0u8, 50, 128, 255] {
        let map = images::uniform_gray(61, 29, c).expect("map");
        let var = var_threshold_to_binary(&noise, &map).expect("var");
        let fixed = threshold_to_binary(&noise, c as u32).expect("fixed");
        rp.compare_pix(&fixed, &var);
    }

    // A ramp map against a flat image
    let flat = images::uniform_gray(256, 2, 100).expect("flat");
    let var = var_threshold_to_binary(&flat, &ramp_rows(2)).expect("var ramp");
    rp.compare_values(155.0, row_sum(&var, 1) as f64, 0.0);

    let small = images::uniform_gray(60, 29, 0).expect("small");
    rp.compare_values(
        1.0,
        var_threshold_to_binary(&noise, &small).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "threshold_binary regression test failed");
}

fn ramp_rows(h: u32) -> Pix {
    images::horizontal_ramp(256, h).expect("ramp")
}

#[test]
fn threshold_levels_reg() {
    let mut rp = RegParams::new("threshold_levels");
    let ramp = ramp_rows(2);

    // --- 2 bpp: full range without colormap ---
    eprintln!("=== 2 bpp ===");
    let pixd = threshold_to_2bpp(&ramp, 3, false).expect("2bpp");
    rp.compare_values(2.0, pixd.depth().bits() as f64, 0.0);
    rp.compare_values(0.0, pixd.has_colormap() as u8 as f64, 0.0);
    for (x, val) in [(0u32, 0u32), (42, 0), (43, 1), (127, 1), (128, 2), (212, 2), (213, 3)] {
        rp.compare_values(val as f64, pixd.get_pixel_unchecked(x, 0) as f64, 0.0);
    }

    // With colormap: indices into nlevels entries
    let pixd = threshold_to_2bpp(&ramp, 3, true).expect("2bpp cmap");
    let cmap = pixd.colormap().expect("cmap");
    rp.compare_values(3.0, cmap.len() as f64, 0.0);
    rp.compare_values(127.0, cmap.get_rgb(1).expect("entry").0 as f64, 0.0);
    rp.compare_values(0.0, pixd.get_pixel_unchecked(63, 0) as f64, 0.0);
    rp.compare_values(1.0, pixd.get_pixel_unchecked(64, 0) as f64, 0.0);
    rp.compare_values(2.0, pixd.get_pixel_unchecked(255, 0) as f64, 0.0);

    // --- 4 bpp ---
    eprintln!("=== 4 bpp ===");
    let pixd = threshold_to_4bpp(&ramp, 16, false).expect("4bpp");
    rp.compare_values(4.0, pixd.depth().bits() as f64, 0.0);
    let distinct: std::collections::BTreeSet<u32> =
        (0..256).map(|x| pixd.get_pixel_unchecked(x, 1)).collect();
    rp.compare_values(16.0, distinct.len() as f64, 0.0);
    let pixd = threshold_to_4bpp(&ramp, 6, true).expect("4bpp cmap");
    rp.compare_values(6.0, pixd.colormap().expect("cmap").len() as f64, 0.0);
    rp.compare_values(5.0, pixd.get_pixel_unchecked(255, 1) as f64, 0.0);

    // --- 8 bpp ---
    eprintln!("=== 8 bpp ===");
    let pixd = threshold_on_8bpp(&ramp, 5, false).expect("8bpp");
    let distinct: std::collections::BTreeSet<u32> =
        (0..256).map(|x| pixd.get_pixel_unchecked(x, 0)).collect();
    eprintln!("  levels: {distinct:?}");
    rp.compare_values(5.0, distinct.len() as f64, 0.0);
    rp.compare_values(
        1.0,
        (distinct.first() == Some(&0) && distinct.last() == Some(&255)) as u8 as f64,
        0.0,
    );
    let again = threshold_on_8bpp(&pixd, 5, false).expect("8bpp again");
    rp.compare_pix(&pixd, &again);

    // --- Colormapped source is flattened first ---
    let cmap = PixColormap::create_linear(2, 4).expect("linear");
    let mapped = images::indexed(8, 1, PixelDepth::Bit8, cmap, |x, _| x % 4).expect("indexed");
    let pixd = threshold_to_2bpp(&mapped, 4, false).expect("flattened");
    for x in 0..8 {
        rp.compare_values((x % 4) as f64, pixd.get_pixel_unchecked(x, 0) as f64, 0.0);
    }

    // --- Invalid level counts ---
    rp.compare_values(1.0, threshold_to_2bpp(&ramp, 5, true).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, threshold_to_4bpp(&ramp, 1, true).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, threshold_on_8bpp(&ramp, 257, false).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "threshold_levels regression test failed");
}

#[test]
fn threshold_arb_reg() {
    let mut rp = RegParams::new("threshold_arb");
    let ramp = ramp_rows(4);

    // --- Midpoint colormap, automatic depth ---
    let edges = parse_edge_values("64, 128, 192").expect("parse");
    let pixd = threshold_gray_arb(&ramp, &edges, &ArbThresholdOptions::default()).expect("arb");
    rp.compare_values(2.0, pixd.depth().bits() as f64, 0.0);
    let cmap = pixd.colormap().expect("cmap");
    for (i, val) in [32u8, 96, 160, 223].into_iter().enumerate() {
        rp.compare_values(val as f64, cmap.get_rgb(i).expect("entry").0 as f64, 0.0);
    }
    for (x, bin) in [(63u32, 0u32), (64, 1), (191, 2), (192, 3)] {
        rp.compare_values(bin as f64, pixd.get_pixel_unchecked(x, 3) as f64, 0.0);
    }

    // --- Average colormap with forced black and white ---
    eprintln!("=== Average colormap ===");
    let options = ArbThresholdOptions {
        outdepth: Some(8),
        use_average: true,
        set_black: true,
        set_white: true,
    };
    let pixd = threshold_gray_arb(&ramp, &edges, &options).expect("arb average");
    rp.compare_values(8.0, pixd.depth().bits() as f64, 0.0);
    let cmap = pixd.colormap().expect("cmap");
    for (i, val) in [0u8, 95, 159, 255].into_iter().enumerate() {
        let (r, g, b) = cmap.get_rgb(i).expect("entry");
        eprintln!("  entry {i}: ({r}, {g}, {b})");
        rp.compare_values(val as f64, g as f64, 0.0);
    }

    // --- Unsorted input and depth promotion ---
    let edges = parse_edge_values("200 20 100 60 140").expect("parse");
    let options = ArbThresholdOptions {
        outdepth: Some(2),
        ..Default::default()
    };
    let pixd = threshold_gray_arb(&ramp, &edges, &options).expect("arb promoted");
    rp.compare_values(4.0, pixd.depth().bits() as f64, 0.0);
    rp.compare_values(6.0, pixd.colormap().expect("cmap").len() as f64, 0.0);
    rp.compare_values(5.0, pixd.get_pixel_unchecked(255, 0) as f64, 0.0);

    // --- Rejected edges ---
    let dup = parse_edge_values("50 50").expect("parse");
    rp.compare_values(
        1.0,
        threshold_gray_arb(&ramp, &dup, &ArbThresholdOptions::default()).is_err() as u8 as f64,
        0.0,
    );
    rp.compare_values(1.0, parse_edge_values("12 x").is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "threshold_arb regression test failed");
}
