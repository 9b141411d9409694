use crate::{
    foundation::{core::Area, error::BokehResult},
    render::buffer::{MaskBuffer, TileBuffer},
};

/// An operation that must be initialized before it can produce tiles.
///
/// Initialization consumes the configured operation, so tiles can only be requested from the
/// value it returns and configuration can no longer change once evaluation starts.
pub trait TiledOperation {
    /// Initialized state, the only one that can evaluate tiles.
    type Ready: TileSource;

    /// Validate configuration and precompute what evaluation needs.
    fn init(self) -> BokehResult<Self::Ready>;
}

/// An initialized operation that fills canvas tiles on request.
///
/// `evaluate_tile` takes `&self` and implementations are `Sync`, so a scheduler may call it from
/// many threads at once. Each call writes only into the tile it is given.
pub trait TileSource: Sync {
    /// Canvas this operation renders. The suggested area may be ignored.
    fn canvas_size(&self, preferred: Area) -> Area;

    /// Number of interleaved `f32` channels per pixel.
    fn channels(&self) -> usize;

    /// Fill `tile` with this operation's output for the tile's area.
    fn evaluate_tile(&self, tile: &mut TileBuffer, inputs: &[&MaskBuffer]) -> BokehResult<()>;

    /// Tear down, releasing any resources the operation owns.
    fn deinit(self)
    where
        Self: Sized;
}
