//! The polymorphic visitor contract every validation rule implements.
//!
//! A validator instance is scoped to one point in the JSON container
//! nesting: it is created when its parent's `enter_object`, `enter_array`,
//! or `property_name` returns it, receives the callbacks for that scope,
//! and is discarded when the scope closes. Validators hold only the context
//! needed to check their own scope — never sibling or ancestor state.

use alloc::boxed::Box;

use crate::{
    diagnostic::ErrorSink,
    entity::{ArrayEntity, Entity, ObjectEntity, StringEntity},
};

/// Visitor over the stream of entities built from one JSON document.
///
/// Every method has a no-op default; `enter_*` and `property_name` default
/// to returning a [`NullValidator`], so a concrete rule overrides only the
/// methods relevant to its scope.
pub trait Validator {
    /// Called when an object opens in this scope. Returns the validator for
    /// the object's contents.
    fn enter_object(&mut self, _sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        Box::new(NullValidator)
    }

    /// Called when the object returned from [`enter_object`] closes.
    ///
    /// [`enter_object`]: Validator::enter_object
    fn leave_object(&mut self, _object: &ObjectEntity, _sink: &mut dyn ErrorSink) {}

    /// Called when an array opens in this scope. Returns the validator for
    /// the array's elements.
    fn enter_array(&mut self, _sink: &mut dyn ErrorSink) -> Box<dyn Validator> {
        Box::new(NullValidator)
    }

    /// Called when the array returned from [`enter_array`] closes.
    ///
    /// [`enter_array`]: Validator::enter_array
    fn leave_array(&mut self, _array: &ArrayEntity, _sink: &mut dyn ErrorSink) {}

    /// Called with each property name in an object scope. Returns the
    /// validator active while the property's value is parsed; the current
    /// validator is restored afterwards.
    fn property_name(
        &mut self,
        _name: &StringEntity,
        _sink: &mut dyn ErrorSink,
    ) -> Box<dyn Validator> {
        Box::new(NullValidator)
    }

    /// Called with each completed property value.
    fn property_value(&mut self, _value: &Entity, _sink: &mut dyn ErrorSink) {}

    /// Called with each completed array element.
    fn array_element(&mut self, _element: &Entity, _sink: &mut dyn ErrorSink) {}

    /// Called once per document with the root value (container or scalar).
    fn root_value(&mut self, _value: &Entity, _sink: &mut dyn ErrorSink) {}
}

/// The no-op validator: checks nothing, returns itself-alikes from every
/// `enter_*` call.
///
/// Used as the default for any property or array whose contents are
/// intentionally unvalidated, which keeps `Option`-checking out of the
/// listener adapter. It is stateless, so handing out fresh boxes per call
/// and sharing one instance are observationally identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValidator;

impl Validator for NullValidator {}
