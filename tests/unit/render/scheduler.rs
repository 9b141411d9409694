use super::*;

/// Writes each pixel's linear index, so misplaced tiles are easy to spot.
struct IndexSource {
    width: u32,
    height: u32,
}

impl TileSource for IndexSource {
    fn canvas_size(&self, _preferred: Area) -> Area {
        Area::new(0, 0, self.width, self.height)
    }

    fn channels(&self) -> usize {
        1
    }

    fn evaluate_tile(&self, tile: &mut TileBuffer, _inputs: &[&MaskBuffer]) -> BokehResult<()> {
        let x0 = tile.area().x;
        let width = self.width;
        for (y, row) in tile.rows_mut() {
            for (v, x) in row.iter_mut().zip(x0..) {
                *v = (y * width + x) as f32;
            }
        }
        Ok(())
    }

    fn deinit(self) {}
}

struct FailingSource;

impl TileSource for FailingSource {
    fn canvas_size(&self, _preferred: Area) -> Area {
        Area::square(8)
    }

    fn channels(&self) -> usize {
        1
    }

    fn evaluate_tile(&self, tile: &mut TileBuffer, _inputs: &[&MaskBuffer]) -> BokehResult<()> {
        if tile.area().x > 0 {
            return Err(BokehError::evaluation("tile refused"));
        }
        Ok(())
    }

    fn deinit(self) {}
}

#[test]
fn assembles_tiles_in_place_for_any_tiling() {
    let source = IndexSource {
        width: 13,
        height: 9,
    };
    for threading in [
        TileThreading::sequential(),
        TileThreading {
            parallel: true,
            tile_size: 4,
            threads: Some(3),
        },
        TileThreading {
            parallel: true,
            tile_size: 1,
            threads: Some(2),
        },
        TileThreading {
            parallel: false,
            tile_size: 100,
            threads: None,
        },
    ] {
        let out = render_canvas(&source, &threading).unwrap();
        assert_eq!(out.width(), 13);
        assert_eq!(out.height(), 9);
        for (i, v) in out.data().iter().enumerate() {
            assert_eq!(*v, i as f32, "{threading:?}");
        }
    }
}

#[test]
fn tile_errors_propagate() {
    let err = render_canvas(
        &FailingSource,
        &TileThreading {
            parallel: true,
            tile_size: 4,
            threads: Some(2),
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("tile refused"));
}

#[test]
fn invalid_threading_is_rejected() {
    let source = IndexSource {
        width: 2,
        height: 2,
    };
    let zero_tile = TileThreading {
        tile_size: 0,
        ..TileThreading::default()
    };
    assert!(render_canvas(&source, &zero_tile).is_err());

    let zero_threads = TileThreading {
        threads: Some(0),
        ..TileThreading::sequential()
    };
    assert!(render_canvas(&source, &zero_threads).is_err());
}

#[test]
fn threading_config_deserializes_with_defaults() {
    let t: TileThreading = serde_json::from_str(r#"{ "tile_size": 32 }"#).unwrap();
    assert_eq!(
        t,
        TileThreading {
            parallel: true,
            tile_size: 32,
            threads: None,
        }
    );
}

#[test]
fn render_bokeh_produces_square_mask() {
    let params = BokehParams::builder().flaps(6).build().unwrap();
    let out = render_bokeh(&params, 32, OutputMode::Mask, &TileThreading::default()).unwrap();
    assert_eq!((out.width(), out.height(), out.channels()), (32, 32, 1));
    assert_eq!(out.pixel(16, 16), Some(&[0.0][..]));
    assert_eq!(out.pixel(0, 0), Some(&[1.0][..]));
    // Borrowed parameters are still usable after teardown.
    assert_eq!(params.vertex_count(), 6);
}
