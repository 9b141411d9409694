pub(crate) mod bokeh;
pub(crate) mod traits;
