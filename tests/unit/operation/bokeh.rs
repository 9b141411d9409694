use super::*;

fn params(lens_shift: f64) -> BokehParams {
    BokehParams::builder()
        .flaps(6)
        .roundness(1.0)
        .lens_shift(lens_shift)
        .build()
        .unwrap()
}

fn full_tile(ready: &BokehImageReady<'_>) -> TileBuffer {
    let mut tile = TileBuffer::new(Area::square(ready.resolution()), ready.channels());
    ready.evaluate_tile(&mut tile, &[]).unwrap();
    tile
}

#[test]
fn canvas_ignores_preferred_area() {
    let p = params(0.0);
    let ready = BokehImageOperation::borrowed(&p)
        .with_resolution(40)
        .init()
        .unwrap();
    for preferred in [Area::default(), Area::new(5, 5, 1920, 1080)] {
        assert_eq!(ready.canvas_size(preferred), Area::square(40));
    }
}

#[test]
fn default_resolution_is_used_when_unset() {
    let ready = BokehImageOperation::owned(params(0.0)).init().unwrap();
    assert_eq!(ready.resolution(), DEFAULT_RESOLUTION);
    assert_eq!(ready.canvas_size(Area::default()), Area::square(512));
    assert!((ready.shape().aa_band() - 1.0 / 256.0).abs() < 1e-15);
}

#[test]
fn zero_resolution_is_rejected() {
    let p = params(0.0);
    let err = BokehImageOperation::borrowed(&p)
        .with_resolution(0)
        .init()
        .unwrap_err();
    assert!(err.to_string().contains("resolution"));
}

#[test]
fn ownership_is_fixed_at_construction() {
    let p = params(0.0);
    let borrowed = BokehImageOperation::borrowed(&p);
    assert_eq!(borrowed.ownership(), Ownership::Borrowed);
    let ready = borrowed.init().unwrap();
    assert_eq!(ready.ownership(), Ownership::Borrowed);
    ready.deinit();
    // The caller's record outlives the operation.
    assert_eq!(p.vertex_count(), 6);

    let owned = BokehImageOperation::owned(p);
    assert_eq!(owned.ownership(), Ownership::Owned);
    owned.deinit();

    let from_node = BokehImageOperation::from_node(&BokehImageNode::default()).unwrap();
    assert_eq!(from_node.ownership(), Ownership::Owned);
    assert_eq!(from_node.init().unwrap().ownership(), Ownership::Owned);
}

#[test]
fn from_node_validates() {
    let node = BokehImageNode {
        rounding: 2.0,
        ..BokehImageNode::default()
    };
    assert!(BokehImageOperation::from_node(&node).is_err());
}

#[test]
fn pixel_centers_map_to_unit_square_with_y_up() {
    let p = params(0.0);
    let ready = BokehImageOperation::borrowed(&p)
        .with_resolution(4)
        .init()
        .unwrap();
    assert_eq!(ready.pixel_point(0, 0), Point::new(-0.75, 0.75));
    assert_eq!(ready.pixel_point(3, 3), Point::new(0.75, -0.75));
    assert_eq!(ready.pixel_point(2, 1), Point::new(0.25, 0.25));
}

#[test]
fn mask_tile_matches_shape_per_pixel() {
    let p = BokehParams::builder()
        .flaps(5)
        .rotation(0.3)
        .catadioptric(0.25)
        .build()
        .unwrap();
    let ready = BokehImageOperation::borrowed(&p)
        .with_resolution(48)
        .init()
        .unwrap();
    let area = Area::new(7, 11, 20, 9);
    let mut tile = TileBuffer::new(area, 1);
    ready.evaluate_tile(&mut tile, &[]).unwrap();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let expected = ready.shape().evaluate(ready.pixel_point(x, y), 1.0);
            assert_eq!(tile.pixel(x, y), Some(&[expected][..]));
        }
    }
}

#[test]
fn tiles_outside_canvas_are_rejected() {
    let p = params(0.0);
    let ready = BokehImageOperation::borrowed(&p)
        .with_resolution(16)
        .init()
        .unwrap();
    let mut tile = TileBuffer::new(Area::new(10, 0, 7, 4), 1);
    assert!(ready.evaluate_tile(&mut tile, &[]).is_err());

    let mut wrong_channels = TileBuffer::new(Area::new(0, 0, 4, 4), 4);
    assert!(ready.evaluate_tile(&mut wrong_channels, &[]).is_err());
}

#[test]
fn dispersion_without_shift_repeats_the_mask() {
    let p = params(0.0);
    let ready = BokehImageOperation::borrowed(&p)
        .with_resolution(24)
        .with_output(OutputMode::Dispersion)
        .init()
        .unwrap();
    assert_eq!(ready.channels(), 4);
    let tile = full_tile(&ready);
    for px in tile.data().chunks_exact(4) {
        assert_eq!(px[0], px[2]);
        assert_eq!(px[1], px[2]);
        assert!((px[3] - px[2]).abs() < 1e-6);
    }
}

#[test]
fn dispersion_channels_use_shifted_radii() {
    for shift in [0.5, -0.5] {
        let p = params(shift);
        let ready = BokehImageOperation::borrowed(&p)
            .with_resolution(64)
            .with_output(OutputMode::Dispersion)
            .init()
            .unwrap();
        let tile = full_tile(&ready);

        // Radii are 1, 0.75 and 0.5; a pixel at ~0.83 is only inside the full shape.
        let px = tile.pixel(58, 31).unwrap();
        let (red, blue) = if shift > 0.0 { (1.0, 0.0) } else { (0.0, 1.0) };
        assert_eq!(px, &[red, 1.0, blue, 2.0 / 3.0][..]);

        let shape = ready.shape();
        for y in (0..64).step_by(5) {
            for x in (0..64).step_by(3) {
                let point = ready.pixel_point(x, y);
                let min = shape.evaluate(point, 0.5);
                let median = shape.evaluate(point, 0.75);
                let max = shape.evaluate(point, 1.0);
                let px = tile.pixel(x, y).unwrap();
                assert_eq!(px[1], median);
                if shift > 0.0 {
                    assert_eq!((px[0], px[2]), (min, max));
                } else {
                    assert_eq!((px[0], px[2]), (max, min));
                }
            }
        }
    }
}

#[test]
fn full_shift_collapses_smallest_shape() {
    let p = params(1.0);
    let ready = BokehImageOperation::borrowed(&p)
        .with_resolution(16)
        .with_output(OutputMode::Dispersion)
        .init()
        .unwrap();
    let tile = full_tile(&ready);
    assert!(tile.data().chunks_exact(4).all(|px| px[0] == 1.0));
}
