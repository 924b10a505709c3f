use std::{cell::RefCell, rc::Rc};

use crate::foundation::{
    core::Vec4,
    error::{FxError, FxResult},
};

/// Value of one shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    /// `float` uniform.
    Float(f32),
    /// `vec4` uniform.
    Vec4(Vec4),
}

/// Value type carried by an animatable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Plain scalar, driven by a scalar channel.
    Scalar,
    /// RGBA color, driven by a color channel.
    Color,
}

/// Value written to or read from an animatable parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// Scalar parameter value.
    Scalar(f32),
    /// RGBA parameter value, components in `[0, 1]`.
    Color(Vec4),
}

impl ParamValue {
    /// Value type of this parameter value.
    pub fn kind(self) -> ParamKind {
        match self {
            Self::Scalar(_) => ParamKind::Scalar,
            Self::Color(_) => ParamKind::Color,
        }
    }
}

/// Declares where an animatable parameter lives inside a filter's uniform block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamDecl {
    /// Parameter (and channel) name.
    pub name: &'static str,
    /// Backing uniform name.
    pub uniform: &'static str,
    /// Component of a `vec4` uniform, or `None` for the whole uniform.
    pub component: Option<usize>,
    /// Value type.
    pub kind: ParamKind,
}

impl ParamDecl {
    pub(crate) const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            uniform: name,
            component: None,
            kind: ParamKind::Scalar,
        }
    }

    pub(crate) const fn lane(name: &'static str, uniform: &'static str, component: usize) -> Self {
        Self {
            name,
            uniform,
            component: Some(component),
            kind: ParamKind::Scalar,
        }
    }

    pub(crate) const fn color(name: &'static str) -> Self {
        Self {
            name,
            uniform: name,
            component: None,
            kind: ParamKind::Color,
        }
    }
}

/// Ordered uniform block plus the dirty flag the renderer consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformSet {
    entries: Vec<(&'static str, UniformValue)>,
    dirty: bool,
}

impl UniformSet {
    /// Build a uniform block; a fresh block is dirty so it is uploaded once.
    pub fn new(entries: Vec<(&'static str, UniformValue)>) -> Self {
        Self {
            entries,
            dirty: true,
        }
    }

    /// Look up a uniform by name.
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Scalar uniform value, if present and scalar.
    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(v) => Some(v),
            UniformValue::Vec4(_) => None,
        }
    }

    /// `vec4` uniform value, if present and a vector.
    pub fn vec4(&self, name: &str) -> Option<Vec4> {
        match self.get(name)? {
            UniformValue::Vec4(v) => Some(v),
            UniformValue::Float(_) => None,
        }
    }

    /// Iterate uniforms in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, UniformValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Whether any uniform changed since the last [`UniformSet::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut UniformValue> {
        self.entries
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Replace a whole uniform; marks dirty when the value changes.
    pub(crate) fn set(&mut self, name: &str, value: UniformValue) -> bool {
        let Some(slot) = self.slot_mut(name) else {
            return false;
        };
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
        true
    }
}

/// Parameter set of one filter: declared parameters over a uniform block.
///
/// Every write through [`ParamSet::set`] marks the uniform block dirty.
#[derive(Clone, Debug)]
pub struct ParamSet {
    filter: &'static str,
    decls: &'static [ParamDecl],
    uniforms: UniformSet,
}

/// Shared handle to a filter's parameters, held by the filter and its channels.
pub type ParamHandle = Rc<RefCell<ParamSet>>;

impl ParamSet {
    pub(crate) fn new(
        filter: &'static str,
        decls: &'static [ParamDecl],
        uniforms: UniformSet,
    ) -> Self {
        Self {
            filter,
            decls,
            uniforms,
        }
    }

    pub(crate) fn into_handle(self) -> ParamHandle {
        Rc::new(RefCell::new(self))
    }

    /// Declared animatable parameters.
    pub fn decls(&self) -> &'static [ParamDecl] {
        self.decls
    }

    /// Resolve a parameter name against the declarations.
    pub fn decl(&self, name: &str) -> FxResult<&'static ParamDecl> {
        self.decls
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| FxError::UnknownParameter {
                filter: self.filter,
                param: name.to_string(),
            })
    }

    /// Read a parameter by name.
    pub fn get(&self, name: &str) -> FxResult<ParamValue> {
        let decl = self.decl(name)?;
        Ok(self.read(decl))
    }

    /// Write a parameter by name and mark the filter dirty.
    pub fn set(&mut self, name: &str, value: ParamValue) -> FxResult<()> {
        let decl = self.decl(name)?;
        if decl.kind != value.kind() {
            return Err(FxError::validation(format!(
                "{}.{} expects a {:?} value",
                self.filter, decl.name, decl.kind
            )));
        }
        self.write(decl, value);
        Ok(())
    }

    pub(crate) fn read(&self, decl: &ParamDecl) -> ParamValue {
        match (self.uniforms.get(decl.uniform), decl.component, decl.kind) {
            (Some(UniformValue::Float(v)), _, _) => ParamValue::Scalar(v),
            (Some(UniformValue::Vec4(v)), Some(i), _) => ParamValue::Scalar(v[i]),
            (Some(UniformValue::Vec4(v)), None, ParamKind::Color) => ParamValue::Color(v),
            (Some(UniformValue::Vec4(v)), None, ParamKind::Scalar) => ParamValue::Scalar(v[0]),
            (None, _, ParamKind::Scalar) => ParamValue::Scalar(0.0),
            (None, _, ParamKind::Color) => ParamValue::Color([0.0; 4]),
        }
    }

    /// Unconditional write; always marks dirty, matching a setter call.
    pub(crate) fn write(&mut self, decl: &ParamDecl, value: ParamValue) {
        let next = match (self.uniforms.get(decl.uniform), decl.component, value) {
            (Some(UniformValue::Vec4(mut v)), Some(i), ParamValue::Scalar(s)) => {
                v[i] = s;
                UniformValue::Vec4(v)
            }
            (_, _, ParamValue::Scalar(s)) => UniformValue::Float(s),
            (_, _, ParamValue::Color(c)) => UniformValue::Vec4(c),
        };
        self.uniforms.set(decl.uniform, next);
        self.uniforms.dirty = true;
    }

    /// Uniform block as the renderer sees it.
    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub(crate) fn uniforms_mut(&mut self) -> &mut UniformSet {
        &mut self.uniforms
    }

    /// Whether the renderer must re-read uniforms.
    pub fn is_dirty(&self) -> bool {
        self.uniforms.is_dirty()
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        self.uniforms.take_dirty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filters/params.rs"]
mod tests;
