use std::rc::Rc;

use crate::{
    animation::controller::AnimationController,
    effects::description::EffectDescription,
    filters::filter::{Filter, FilterKind},
    foundation::error::FxResult,
};

/// Live filter sequence plus the aggregate controller over all of its channels.
///
/// The aggregate exposes stage `i`'s channels as `stage_i.<name>`; it is not
/// started by [`build_effect_chain`].
#[derive(Debug)]
pub struct EffectChain {
    filters: Vec<Rc<Filter>>,
    controller: AnimationController,
}

impl EffectChain {
    pub fn filters(&self) -> &[Rc<Filter>] {
        &self.filters
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        &mut self.controller
    }

    pub fn into_parts(self) -> (Vec<Rc<Filter>>, AnimationController) {
        (self.filters, self.controller)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Parse an effect description document and build its chain.
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        build_effect_chain(&EffectDescription::from_json_str(s)?)
    }
}

/// Namespace of the `index`-th stage inside an aggregate controller.
pub fn stage_namespace(index: usize) -> String {
    format!("stage_{index}")
}

/// Interpret an effect description into live filters and an aggregate controller.
///
/// Each stage imports its named animations, transitions to its default animation
/// and starts playing. Any error aborts the whole chain.
#[tracing::instrument(skip(desc), fields(stages = desc.filters.len()))]
pub fn build_effect_chain(desc: &EffectDescription) -> FxResult<EffectChain> {
    let mut filters = Vec::with_capacity(desc.filters.len());
    let mut controller = AnimationController::new();

    for (index, spec) in desc.filters.iter().enumerate() {
        let kind = FilterKind::parse(&spec.kind)?;
        spec.validate()?;

        let mut filter = Filter::new(kind);
        let stage = filter.controller_mut();
        for (name, data) in spec.animations() {
            stage.import_animation(name, data)?;
        }
        stage.transition(&spec.default_animation)?;
        stage.play();

        let filter = Rc::new(filter);
        controller.import_channels(filter.controller(), &stage_namespace(index));
        tracing::debug!(
            stage = index,
            kind = kind.type_name(),
            default_animation = %spec.default_animation,
            "built filter stage"
        );
        filters.push(filter);
    }

    Ok(EffectChain {
        filters,
        controller,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chain.rs"]
mod tests;
