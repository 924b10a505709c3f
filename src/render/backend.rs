use std::rc::Rc;

use image::RgbaImage;

use crate::{filters::filter::Filter, foundation::error::FxResult};

/// Executes a filter's fragment program against a source texture.
///
/// Implementations re-read a filter's uniforms only when it reports dirty.
pub trait ShaderBackend {
    /// Run one filter stage.
    fn apply(&mut self, filter: &Filter, source: &RgbaImage) -> FxResult<RgbaImage>;

    /// Run filter stages in order, feeding each output into the next stage.
    fn apply_chain(&mut self, filters: &[Rc<Filter>], source: &RgbaImage) -> FxResult<RgbaImage> {
        let mut current = source.clone();
        for filter in filters {
            current = self.apply(filter, &current)?;
        }
        Ok(current)
    }
}
